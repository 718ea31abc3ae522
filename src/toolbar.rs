//! The horizontal menu bar.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Widget;
use rustc_hash::FxHashMap;

use crate::draw::fill;
use crate::event::{MouseAction, Outcome, RedrawFn, Status};
use crate::menu_list::MenuList;
use crate::style::Styles;
use crate::text::{format_label_with_shortcut, string_width};

/// One clickable button of the bar.
///
/// The button primitive tracks its own colors and focus so the per-button
/// mouse state machine can flip them independently of the open/active
/// bookkeeping of the toolbar.
struct MenuButton {
    label: Line<'static>,
    width: u16,
    area: Rect,
    background: Color,
    background_activated: Color,
    focused: bool,
}

impl MenuButton {
    fn new(label: Line<'static>, width: u16, styles: &Styles) -> Self {
        Self {
            label,
            width,
            area: Rect::default(),
            background: styles.background,
            background_activated: styles.menu_background_active,
            focused: false,
        }
    }

    fn current_background(&self) -> Color {
        if self.focused {
            self.background_activated
        } else {
            self.background
        }
    }

    fn contains(&self, position: Position) -> bool {
        self.area.contains(position)
    }
}

/// A drop-down menu bar: a one-row strip of menu buttons, an optional
/// right-aligned title, and at most one open [`MenuList`].
///
/// The toolbar receives raw crossterm input and either handles it itself
/// (button activation, cross-menu navigation, global shortcuts) or forwards
/// it to the open list, which resolves item navigation and selection. Render
/// it once per frame over the full screen area; the bar occupies the top
/// row and draws its open menu over the rows below.
pub struct Toolbar {
    lists: Vec<MenuList>,
    buttons: Vec<MenuButton>,
    /// The open (or drag-tracked) list. At most one; always an index into
    /// `lists`.
    open: Option<usize>,
    /// The button that was toggled on by a click or shortcut. Survives a
    /// plain close so the next click on it toggles off.
    active_button: Option<usize>,
    shortcuts: FxHashMap<char, usize>,
    styles: Styles,
    title: String,
    title_color: Color,
    redraw: Option<RedrawFn>,
    area: Rect,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolbar {
    /// Creates an empty toolbar with the stock [`Styles`].
    pub fn new() -> Self {
        Self::with_styles(Styles::default())
    }

    /// Creates an empty toolbar drawing with `styles`.
    pub fn with_styles(styles: Styles) -> Self {
        Self {
            lists: Vec::new(),
            buttons: Vec::new(),
            open: None,
            active_button: None,
            shortcuts: FxHashMap::default(),
            styles,
            title: String::new(),
            title_color: styles.text,
            redraw: None,
            area: Rect::default(),
        }
    }

    /// Installs the shared redraw-request handle, propagating it to every
    /// menu list added so far and to the ones added later.
    pub fn set_redraw(&mut self, redraw: RedrawFn) -> &mut Self {
        for list in &mut self.lists {
            list.set_redraw(Rc::clone(&redraw));
        }
        self.redraw = Some(redraw);
        self
    }

    /// Fires the redraw-request handle, if any.
    pub fn redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }

    /// Sets the title text shown right-aligned on the bar.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Sets the title color.
    pub fn set_title_text_color(&mut self, color: Color) -> &mut Self {
        self.title_color = color;
        self
    }

    /// The bar strip rectangle as of the last render.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether a menu list is currently open.
    pub fn has_open_menu(&self) -> bool {
        self.open.is_some()
    }

    /// The currently open menu list, if any.
    pub fn open_menu(&self) -> Option<&MenuList> {
        self.open.map(|index| &self.lists[index])
    }

    /// The menu list at `index`, or `None` when out of range.
    pub fn menu_list(&self, index: usize) -> Option<&MenuList> {
        self.lists.get(index)
    }

    /// Mutable access to the menu list at `index`, for registering items
    /// after construction.
    pub fn menu_list_mut(&mut self, index: usize) -> Option<&mut MenuList> {
        self.lists.get_mut(index)
    }

    /// Creates a new menu list with a companion button sized to `label` and
    /// returns the list for item registration.
    ///
    /// The list is wired with the toolbar's colors and redraw handle, and a
    /// `Some` shortcut is registered (lower-cased) as a global toggle for
    /// the list. Buttons pack left in registration order; the title keeps
    /// the right end of the bar.
    pub fn add_menu_list(&mut self, label: &str, shortcut: Option<char>) -> &mut MenuList {
        let index = self.lists.len();
        let formatted = format_label_with_shortcut(label, shortcut);

        let mut list = MenuList::new(formatted.clone(), index);
        list.set_background_color(self.styles.background)
            .set_text_color(self.styles.text)
            .set_selected_background_color(self.styles.menu_background_active);
        if let Some(redraw) = &self.redraw {
            list.set_redraw(Rc::clone(redraw));
        }
        self.lists.push(list);

        let width = string_width(label) as u16 + 4;
        self.buttons
            .push(MenuButton::new(formatted, width, &self.styles));

        if let Some(shortcut) = shortcut {
            let key = shortcut.to_lowercase().next().unwrap_or(shortcut);
            self.shortcuts.insert(key, index);
        }

        log::debug!("toolbar: added menu list {index} ({label:?})");
        &mut self.lists[index]
    }

    /// Opens the list at `index` when it is closed, closes it when it is
    /// the open one.
    pub fn toggle_menu_list(&mut self, index: usize) {
        if self.open == Some(index) {
            self.close_menu_list();
        } else {
            self.make_menu_list_active(index);
        }
    }

    /// Opens the list at `index`, deactivating any previously active
    /// button.
    pub fn make_menu_list_active(&mut self, index: usize) {
        if index >= self.lists.len() {
            return;
        }
        if let Some(previous) = self.active_button.take() {
            if previous != index {
                self.buttons[previous].background = self.styles.background;
                self.buttons[previous].focused = false;
            }
        }
        self.buttons[index].background = self.styles.menu_background_active;
        self.open = Some(index);
        self.active_button = Some(index);
        log::debug!("toolbar: menu list {index} active");
    }

    /// Closes the open menu list, if any, and requests a redraw.
    ///
    /// The active-button marker is left in place; only a click toggle
    /// clears it.
    pub fn close_menu_list(&mut self) {
        if let Some(index) = self.open.take() {
            let button = &mut self.buttons[index];
            button.focused = false;
            button.background = self.styles.background;
            self.lists[index].set_focused(false);
            log::debug!("toolbar: menu list {index} closed");
            self.redraw();
        }
    }

    /// Offers a key press to the toolbar.
    ///
    /// With a menu open: Escape closes it, Left/Right switch to the
    /// adjacent menu with wrap-around, and anything else goes to the open
    /// list first and then to the global shortcut map. With no menu open
    /// only the global shortcuts are consulted.
    pub fn handle_key(&mut self, event: KeyEvent) -> Status {
        if event.kind == KeyEventKind::Release {
            return Status::Ignored;
        }

        let Some(open) = self.open else {
            return self.run_shortcut(event);
        };

        match event.code {
            KeyCode::Esc => {
                self.close_menu_list();
                return Status::Captured;
            }
            KeyCode::Left => {
                self.go_to_menu_list(false);
                return Status::Captured;
            }
            KeyCode::Right => {
                self.go_to_menu_list(true);
                return Status::Captured;
            }
            _ => {}
        }

        match self.lists[open].handle_key(event) {
            Outcome::Selected(item) => {
                self.select_item(open, item);
                Status::Captured
            }
            Outcome::Captured => Status::Captured,
            Outcome::Ignored => self.run_shortcut(event),
        }
    }

    /// Offers a raw crossterm mouse event to the toolbar.
    ///
    /// A left release is processed as the release followed by a synthesized
    /// click at the same position.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> Status {
        let Some((action, position)) = MouseAction::from_event(event) else {
            return Status::Ignored;
        };
        let status = self.route_mouse(action, position);
        if action == MouseAction::LeftUp {
            return status.merge(self.route_mouse(MouseAction::LeftClick, position));
        }
        status
    }

    fn route_mouse(&mut self, action: MouseAction, position: Position) -> Status {
        if action == MouseAction::LeftClick {
            if let Some(open) = self.open {
                if self.lists[open].area().contains(position) {
                    return match self.lists[open].handle_mouse(action, position) {
                        Outcome::Selected(item) => {
                            self.select_item(open, item);
                            Status::Captured
                        }
                        outcome => outcome.into(),
                    };
                }
                let status = self.buttons_mouse(action, position);
                if status == Status::Ignored {
                    // Best-effort close on a click that nothing claimed.
                    if let Some(still_open) = self.open.take() {
                        self.lists[still_open].set_focused(false);
                        log::debug!("toolbar: menu list {still_open} closed by outside click");
                    }
                }
                return status;
            }

            let status = self.buttons_mouse(action, position);
            if status == Status::Captured {
                if let Some(open) = self.open {
                    self.lists[open].set_focused(true);
                }
            }
            return status;
        }

        // Everything else is offered to the open list first.
        if let Some(open) = self.open {
            match self.lists[open].handle_mouse(action, position) {
                Outcome::Selected(item) => {
                    self.select_item(open, item);
                    return Status::Captured;
                }
                Outcome::Captured => return Status::Captured,
                Outcome::Ignored => {}
            }
        }

        self.buttons_mouse(action, position)
    }

    /// Runs the per-button mouse state machine for every button, the way
    /// the host layout offers events to each of its children.
    fn buttons_mouse(&mut self, action: MouseAction, position: Position) -> Status {
        let mut status = Status::Ignored;
        for index in 0..self.buttons.len() {
            status = status.merge(self.button_mouse(index, action, position));
        }
        status
    }

    fn button_mouse(&mut self, index: usize, action: MouseAction, position: Position) -> Status {
        let inside = self.buttons[index].contains(position);
        match action {
            MouseAction::LeftDown => {
                if !inside {
                    return Status::Ignored;
                }
                let button = &mut self.buttons[index];
                button.background_activated = self.styles.menu_background_active;
                button.focused = true;
                self.open = Some(index);
                self.lists[index].set_in_drag(true);
                self.redraw();
                Status::Captured
            }
            MouseAction::LeftClick => {
                if inside {
                    if self.active_button == Some(index) {
                        self.deactivate(index);
                        log::debug!("toolbar: menu list {index} toggled off");
                    } else {
                        let previous = self.active_button;
                        self.buttons[index].background = self.styles.menu_background_active;
                        if let Some(previous) = previous {
                            self.buttons[previous].background = self.styles.background;
                            self.buttons[previous].focused = false;
                        }
                        self.open = Some(index);
                        self.lists[index].set_in_drag(false);
                        self.active_button = Some(index);
                        log::debug!("toolbar: menu list {index} toggled on");
                    }
                    Status::Captured
                } else if self.active_button == Some(index) {
                    // A click elsewhere while this button is active closes
                    // its menu the same way a toggle-off does.
                    self.deactivate(index);
                    Status::Ignored
                } else {
                    Status::Ignored
                }
            }
            MouseAction::Move { left_held } => {
                if self.buttons[index].focused {
                    if left_held {
                        if inside {
                            self.open = Some(index);
                            self.lists[index].set_in_drag(true);
                        } else {
                            // The pointer left the button mid-drag; hand
                            // the traversal over to whichever neighbour
                            // picks it up.
                            self.buttons[index].focused = false;
                            self.lists[index].set_in_drag(false);
                            if self.open == Some(index) {
                                self.open = None;
                            }
                            self.redraw();
                        }
                    }
                } else if left_held && inside {
                    self.buttons[index].focused = true;
                    self.open = Some(index);
                    self.lists[index].set_in_drag(true);
                    self.redraw();
                }
                Status::Ignored
            }
            MouseAction::LeftUp => Status::Ignored,
        }
    }

    /// Resets `index`'s button, ends any drag and closes the open list.
    fn deactivate(&mut self, index: usize) {
        let button = &mut self.buttons[index];
        button.background = self.styles.background;
        button.background_activated = self.styles.background;
        button.focused = false;
        if let Some(open) = self.open.take() {
            self.lists[open].set_in_drag(false);
            self.lists[open].set_focused(false);
        }
        self.active_button = None;
    }

    /// Selection dispatch: the menu closes before the callback runs.
    fn select_item(&mut self, list: usize, item: usize) {
        self.lists[list].set_in_drag(false);
        self.close_menu_list();
        self.lists[list].invoke_item(item);
    }

    fn run_shortcut(&mut self, event: KeyEvent) -> Status {
        if let KeyCode::Char(c) = event.code {
            let key = c.to_lowercase().next().unwrap_or(c);
            if let Some(&index) = self.shortcuts.get(&key) {
                self.toggle_menu_list(index);
                return Status::Captured;
            }
        }
        Status::Ignored
    }

    fn go_to_menu_list(&mut self, forward: bool) {
        let count = self.lists.len();
        let Some(open) = self.open else {
            return;
        };
        if count == 0 {
            return;
        }

        let next = if forward {
            if open < count - 1 { open + 1 } else { 0 }
        } else if open > 0 {
            open - 1
        } else {
            count - 1
        };
        self.make_menu_list_active(next);
    }
}

impl Widget for &mut Toolbar {
    /// Draws the bar strip across the top row of `area` and the open menu
    /// list (if any) over the rows below it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bar = Rect::new(area.x, area.y, area.width, 1).intersection(buf.area);
        self.area = bar;
        fill(
            buf,
            bar,
            Style::new().bg(self.styles.background).fg(self.styles.text),
        );

        // Buttons pack into the left two thirds of the bar; the title keeps
        // the rest.
        let buttons_width = bar.width / 3 * 2;
        let buttons_region = Rect::new(bar.x, bar.y, buttons_width, 1);
        let mut x = bar.x;
        for button in &mut self.buttons {
            button.area = Rect::new(x, bar.y, button.width, 1).intersection(buttons_region);
            if !button.area.is_empty() {
                fill(
                    buf,
                    button.area,
                    Style::new()
                        .bg(button.current_background())
                        .fg(self.styles.text),
                );
                button.label.clone().centered().render(button.area, buf);
            }
            x = x.saturating_add(button.width);
        }

        if !self.title.is_empty() {
            let title_area = Rect::new(
                bar.x + buttons_width,
                bar.y,
                bar.width.saturating_sub(buttons_width).saturating_sub(2),
                1,
            )
            .intersection(buf.area);
            Line::from(self.title.as_str())
                .style(Style::new().fg(self.title_color).bg(self.styles.background))
                .right_aligned()
                .render(title_area, buf);
        }

        if let Some(open) = self.open {
            let anchor = Position::new(self.buttons[open].area.x, bar.y);
            self.lists[open].render(anchor, buf);
        }
    }
}
