//! The dropdown panel attached to one toolbar button.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListState, StatefulWidget, Widget};
use rustc_hash::FxHashMap;

use crate::draw::fill;
use crate::event::{MouseAction, Outcome, RedrawFn};
use crate::item::{MenuItem, SelectedFn};
use crate::style::Styles;
use crate::text::{format_label_with_shortcut, line_width};

bitflags! {
    /// Transient UI state of a menu list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct ListFlags: u8 {
        /// A highlight has been established via keyboard or hover.
        const INITIAL_SELECTION_MADE = 1 << 0;
        /// A synthetic hover click is in flight; suppress real selection.
        const IN_FAKE_SELECTION = 1 << 1;
        /// The pointer is traversing with the primary button held.
        const IN_DRAG = 1 << 2;
    }
}

/// One column of frame around the group box.
const BOX_PADDING: u16 = 1;
/// Border plus inner padding of the group box.
const GROUP_PADDING: u16 = 1;

/// A dropdown list of menu entries.
///
/// The list keeps its own highlight, shortcut and drag state. Input is
/// offered through [`handle_key`](MenuList::handle_key) and
/// [`handle_mouse`](MenuList::handle_mouse), both reporting an [`Outcome`];
/// a [`Selected`](Outcome::Selected) outcome carries the item index so the
/// owner can close the menu before invoking the callback via
/// [`invoke_item`](MenuList::invoke_item).
pub struct MenuList {
    label: Line<'static>,
    index: usize,
    items: Vec<MenuItem>,
    state: ListState,
    flags: ListFlags,
    shortcuts: FxHashMap<char, usize>,
    background: Color,
    selected_background: Color,
    /// Background currently applied to the highlighted row. Kept at the
    /// plain background until navigation or hover begins.
    highlight: Color,
    text: Color,
    focused: bool,
    redraw: Option<RedrawFn>,
    area: Rect,
    list_area: Rect,
}

impl MenuList {
    /// Creates an empty list labelled `label` at position `index` within
    /// its toolbar.
    pub fn new(label: impl Into<Line<'static>>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
            items: Vec::new(),
            state: ListState::default(),
            flags: ListFlags::empty(),
            shortcuts: FxHashMap::default(),
            background: Color::Reset,
            selected_background: Color::Reset,
            highlight: Color::Reset,
            text: Color::Reset,
            focused: false,
            redraw: None,
            area: Rect::default(),
            list_area: Rect::default(),
        }
    }

    /// The position of this list within its toolbar, fixed at creation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The label shown on the owning toolbar button.
    pub fn label(&self) -> &Line<'static> {
        &self.label
    }

    /// Sets the background and, while no selected-background has been
    /// configured, the highlight background along with it.
    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.background = color;
        if self.selected_background == Color::Reset {
            self.highlight = color;
        }
        self
    }

    /// Sets the background applied to the highlighted row once keyboard or
    /// hover navigation begins.
    pub fn set_selected_background_color(&mut self, color: Color) -> &mut Self {
        self.selected_background = color;
        self
    }

    /// Sets the color of labels and the group border.
    pub fn set_text_color(&mut self, color: Color) -> &mut Self {
        self.text = color;
        self
    }

    /// Installs the shared redraw-request handle.
    pub fn set_redraw(&mut self, redraw: RedrawFn) -> &mut Self {
        self.redraw = Some(redraw);
        self
    }

    /// Marks or clears the drag-traversal state.
    pub fn set_in_drag(&mut self, in_drag: bool) {
        self.flags.set(ListFlags::IN_DRAG, in_drag);
    }

    /// Whether the list is part of an ongoing button drag.
    pub fn in_drag(&self) -> bool {
        self.flags.contains(ListFlags::IN_DRAG)
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the list currently holds focus.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Appends an entry at the next sequential index and returns the list
    /// for chaining.
    ///
    /// A `Some` shortcut is registered lower-cased when a callback is
    /// present; registering the same character again replaces the earlier
    /// entry. The shortcut letter is emphasized in the displayed label.
    pub fn add_item(
        &mut self,
        label: &str,
        shortcut: Option<char>,
        on_selected: Option<SelectedFn>,
    ) -> &mut Self {
        let index = self.items.len();
        if let Some(shortcut) = shortcut {
            if on_selected.is_some() {
                let key = shortcut.to_lowercase().next().unwrap_or(shortcut);
                self.shortcuts.insert(key, index);
            }
        }

        let mut item = MenuItem::new(format_label_with_shortcut(label, shortcut), index);
        item.set_on_selected(on_selected);
        self.items.push(item);
        self
    }

    /// Returns the item at `index`, or `None` when out of range.
    pub fn get_item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    /// Mutable access to the item at `index`, or `None` when out of range.
    pub fn get_item_mut(&mut self, index: usize) -> Option<&mut MenuItem> {
        self.items.get_mut(index)
    }

    /// Number of entries.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// The currently highlighted row, if navigation has set one.
    pub fn current_item(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Fires the callback of the item at `index`, if any.
    pub fn invoke_item(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            log::trace!("menu list {}: invoking item {index}", self.index);
            item.invoke();
        }
    }

    /// The rectangle of the whole panel as of the last render.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Offers a key press to the list.
    ///
    /// Down/Up move the highlight with wrap-around, Enter reports the
    /// highlighted entry, and any other character is matched against the
    /// registered shortcuts case-insensitively. Everything else is returned
    /// to the caller as [`Outcome::Ignored`].
    pub fn handle_key(&mut self, event: KeyEvent) -> Outcome {
        if event.kind == KeyEventKind::Release {
            return Outcome::Ignored;
        }

        match event.code {
            KeyCode::Down => {
                let count = self.items.len() as isize;
                let mut index = self.current_index();
                if !self.flags.contains(ListFlags::INITIAL_SELECTION_MADE) {
                    index = -1;
                    self.flags.insert(ListFlags::INITIAL_SELECTION_MADE);
                }
                let next = if index < count - 1 { index + 1 } else { 0 };
                self.move_highlight(index, next);
                Outcome::Captured
            }
            KeyCode::Up => {
                let mut index = self.current_index();
                if !self.flags.contains(ListFlags::INITIAL_SELECTION_MADE) {
                    // The mirror of the Down synthesis: start from 1 so the
                    // first Up lands on the first item instead of wrapping.
                    index = 1;
                    self.flags.insert(ListFlags::INITIAL_SELECTION_MADE);
                }
                let next = if index > 0 {
                    index - 1
                } else {
                    self.items.len() as isize - 1
                };
                self.move_highlight(index, next);
                Outcome::Captured
            }
            KeyCode::Enter => {
                let index = self.current_index() as usize;
                if index < self.items.len() {
                    Outcome::Selected(index)
                } else {
                    Outcome::Captured
                }
            }
            KeyCode::Char(c) => {
                let key = c.to_lowercase().next().unwrap_or(c);
                match self.shortcuts.get(&key) {
                    Some(&index) => Outcome::Selected(index),
                    None => Outcome::Ignored,
                }
            }
            _ => Outcome::Ignored,
        }
    }

    /// Offers a translated mouse action at `position` to the list.
    ///
    /// Pointer movement over the rows previews the hovered entry without
    /// firing its callback; a click (or a release ending a button drag)
    /// over a row reports it as selected.
    pub fn handle_mouse(&mut self, action: MouseAction, position: Position) -> Outcome {
        match action {
            MouseAction::Move { .. } => {
                if self.list_area.contains(position) {
                    self.highlight = self.selected_background;
                    // Hover is a synthetic click that must not fire the
                    // row's callback.
                    self.flags.insert(ListFlags::IN_FAKE_SELECTION);
                    let (hit, _) = self.click_at(position);
                    self.flags.remove(ListFlags::IN_FAKE_SELECTION);
                    if hit {
                        self.flags.insert(ListFlags::INITIAL_SELECTION_MADE);
                        return Outcome::Captured;
                    }
                    Outcome::Ignored
                } else {
                    self.highlight = self.background;
                    self.request_redraw();
                    Outcome::Ignored
                }
            }
            MouseAction::LeftDown => {
                if self.list_area.contains(position) {
                    self.focused = true;
                    Outcome::Captured
                } else {
                    Outcome::Ignored
                }
            }
            MouseAction::LeftUp => {
                if self.flags.contains(ListFlags::IN_DRAG) {
                    self.set_in_drag(false);
                    if self.list_area.contains(position) {
                        // Releasing a drag over a row counts as a click.
                        let (hit, selected) = self.click_at(position);
                        if let Some(row) = selected {
                            return Outcome::Selected(row);
                        }
                        if hit {
                            return Outcome::Captured;
                        }
                    }
                }
                Outcome::Ignored
            }
            MouseAction::LeftClick => {
                if self.list_area.contains(position) {
                    let (hit, selected) = self.click_at(position);
                    match selected {
                        Some(row) => Outcome::Selected(row),
                        None if hit => Outcome::Captured,
                        None => Outcome::Ignored,
                    }
                } else {
                    Outcome::Ignored
                }
            }
        }
    }

    /// Draws the panel anchored directly below its button at `anchor`:
    /// shadow first, then the background box, the bordered group frame and
    /// the inner list.
    pub fn render(&mut self, anchor: Position, buf: &mut Buffer) {
        let x = anchor.x;
        let y = anchor.y + 1;

        let inner = self
            .items
            .iter()
            .map(|item| line_width(item.label()) as u16)
            .max()
            .unwrap_or(0);
        let width = inner + BOX_PADDING * 2 + GROUP_PADDING * 2;
        let height = self.items.len() as u16 + GROUP_PADDING * 2;

        let shadow = Rect::new(x.saturating_add(2), y.saturating_add(1), width, height);
        fill(buf, shadow, Style::new().bg(Styles::DEFAULT.shadow));

        self.area = Rect::new(x, y, width, height);
        fill(buf, self.area, Style::new().bg(self.background));

        let group = Rect::new(x + BOX_PADDING, y, width - BOX_PADDING * 2, height)
            .intersection(buf.area);
        Block::bordered()
            .border_style(Style::new().fg(self.text).bg(self.background))
            .style(Style::new().bg(self.background))
            .render(group, buf);

        self.list_area = Rect::new(
            x + BOX_PADDING + GROUP_PADDING,
            y + GROUP_PADDING,
            width - (BOX_PADDING * 2 + GROUP_PADDING * 2),
            height - GROUP_PADDING * 2,
        );
        let rows: Vec<Line<'_>> = self.items.iter().map(|item| item.label().clone()).collect();
        let list = List::new(rows)
            .style(Style::new().fg(self.text).bg(self.background))
            .highlight_style(Style::new().bg(self.highlight));
        StatefulWidget::render(
            list,
            self.list_area.intersection(buf.area),
            buf,
            &mut self.state,
        );
    }

    /// The highlight index as tracked by the underlying list state, which
    /// reports the first row while nothing has been selected yet.
    fn current_index(&self) -> isize {
        self.state.selected().unwrap_or(0) as isize
    }

    fn move_highlight(&mut self, from: isize, to: isize) {
        if to != from && to >= 0 {
            self.state.select(Some(to as usize));
            self.highlight = self.selected_background;
        }
    }

    /// Synthesizes a click at `position`, moving the highlight to the row
    /// under it. The second element carries the row only when a real
    /// (non-preview) selection fired.
    fn click_at(&mut self, position: Position) -> (bool, Option<usize>) {
        let row = (position.y - self.list_area.y) as usize;
        if row >= self.items.len() {
            return (false, None);
        }
        self.state.select(Some(row));
        if self.flags.contains(ListFlags::IN_FAKE_SELECTION) {
            (true, None)
        } else {
            (true, Some(row))
        }
    }

    fn request_redraw(&self) {
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn three_item_list() -> MenuList {
        let mut list = MenuList::new("File", 0);
        list.add_item("New", None, None)
            .add_item("Open", None, None)
            .add_item("Quit", None, None);
        list
    }

    fn counting_item(list: &mut MenuList, label: &str, shortcut: Option<char>) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        list.add_item(
            label,
            shortcut,
            Some(Box::new(move || counter.set(counter.get() + 1))),
        );
        hits
    }

    fn rendered(list: &mut MenuList) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 12));
        list.render(Position::new(0, 0), &mut buf);
        buf
    }

    #[test]
    fn down_visits_items_in_order_then_wraps() {
        let mut list = three_item_list();
        for expected in [0, 1, 2, 0] {
            assert_eq!(list.handle_key(key(KeyCode::Down)), Outcome::Captured);
            assert_eq!(list.current_item(), Some(expected));
        }
    }

    #[test]
    fn up_from_uninitialized_lands_on_first_item() {
        let mut list = three_item_list();
        for expected in [0, 2, 1, 0, 2] {
            assert_eq!(list.handle_key(key(KeyCode::Up)), Outcome::Captured);
            assert_eq!(list.current_item(), Some(expected));
        }
    }

    #[test]
    fn single_item_down_stays_put() {
        let mut list = MenuList::new("File", 0);
        list.add_item("Only", None, None);
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.current_item(), Some(0));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.current_item(), Some(0));
    }

    #[test]
    fn enter_reports_the_highlighted_entry() {
        let mut list = three_item_list();
        list.handle_key(key(KeyCode::Down));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Outcome::Selected(1));
    }

    #[test]
    fn enter_defaults_to_the_first_entry() {
        let mut list = three_item_list();
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Outcome::Selected(0));
    }

    #[test]
    fn enter_on_an_empty_list_is_captured() {
        let mut list = MenuList::new("File", 0);
        assert_eq!(list.handle_key(key(KeyCode::Enter)), Outcome::Captured);
    }

    #[test]
    fn shortcut_lookup_is_case_insensitive() {
        let mut list = MenuList::new("File", 0);
        let hits = counting_item(&mut list, "New", Some('N'));
        assert_eq!(list.handle_key(key(KeyCode::Char('n'))), Outcome::Selected(0));
        assert_eq!(list.handle_key(key(KeyCode::Char('N'))), Outcome::Selected(0));
        // Selection outcomes do not fire callbacks by themselves.
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn unknown_rune_is_returned_to_the_caller() {
        let mut list = MenuList::new("File", 0);
        counting_item(&mut list, "New", Some('N'));
        assert_eq!(list.handle_key(key(KeyCode::Char('z'))), Outcome::Ignored);
    }

    #[test]
    fn duplicate_shortcut_last_registration_wins() {
        let mut list = MenuList::new("File", 0);
        counting_item(&mut list, "New", Some('N'));
        counting_item(&mut list, "Next", Some('N'));
        assert_eq!(list.handle_key(key(KeyCode::Char('n'))), Outcome::Selected(1));
    }

    #[test]
    fn shortcut_without_callback_is_not_registered() {
        let mut list = MenuList::new("File", 0);
        list.add_item("New", Some('N'), None);
        assert_eq!(list.handle_key(key(KeyCode::Char('n'))), Outcome::Ignored);
    }

    #[test]
    fn invoke_item_fires_the_callback() {
        let mut list = MenuList::new("File", 0);
        let hits = counting_item(&mut list, "New", Some('N'));
        list.invoke_item(0);
        assert_eq!(hits.get(), 1);
        // Out of range is a no-op.
        list.invoke_item(7);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn get_item_out_of_range_is_none() {
        let list = three_item_list();
        assert!(list.get_item(2).is_some());
        assert!(list.get_item(3).is_none());
    }

    #[test]
    fn hover_previews_without_firing_the_callback() {
        let mut list = MenuList::new("File", 0);
        let hits = counting_item(&mut list, "New", Some('N'));
        counting_item(&mut list, "Open", Some('O'));
        rendered(&mut list);

        // Rows start at (2, 2): one column of box padding plus the border.
        let outcome = list.handle_mouse(MouseAction::Move { left_held: false }, Position::new(2, 2));
        assert_eq!(outcome, Outcome::Captured);
        assert_eq!(list.current_item(), Some(0));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn move_outside_reverts_the_highlight_and_requests_a_redraw() {
        let mut list = three_item_list();
        list.set_background_color(Color::Gray);
        list.set_selected_background_color(Color::Green);
        let requests = Rc::new(Cell::new(0));
        let counter = Rc::clone(&requests);
        list.set_redraw(Rc::new(move || counter.set(counter.get() + 1)));
        rendered(&mut list);

        list.handle_mouse(MouseAction::Move { left_held: false }, Position::new(2, 2));
        assert_eq!(list.highlight, Color::Green);

        let outcome =
            list.handle_mouse(MouseAction::Move { left_held: false }, Position::new(30, 8));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(list.highlight, Color::Gray);
        assert_eq!(requests.get(), 1);
    }

    #[test]
    fn click_selects_the_row_under_the_pointer() {
        let mut list = three_item_list();
        rendered(&mut list);
        let outcome = list.handle_mouse(MouseAction::LeftClick, Position::new(3, 3));
        assert_eq!(outcome, Outcome::Selected(1));
    }

    #[test]
    fn drag_release_over_a_row_selects_it() {
        let mut list = three_item_list();
        rendered(&mut list);
        list.set_in_drag(true);
        let outcome = list.handle_mouse(MouseAction::LeftUp, Position::new(2, 4));
        assert_eq!(outcome, Outcome::Selected(2));
        assert!(!list.in_drag());
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut list = three_item_list();
        rendered(&mut list);
        let outcome = list.handle_mouse(MouseAction::LeftUp, Position::new(2, 2));
        assert_eq!(outcome, Outcome::Ignored);
    }

    #[test]
    fn panel_is_sized_from_the_widest_label() {
        let mut list = three_item_list();
        rendered(&mut list);
        // Widest label is 4 columns; plus box and group padding on both
        // sides that makes 8, and three rows plus the frame makes 5.
        assert_eq!(list.area(), Rect::new(0, 1, 8, 5));
    }
}
