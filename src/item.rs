//! A single row of a menu list.

use ratatui::text::Line;

use crate::text::format_label_with_shortcut;

/// Callback fired when a menu entry is selected.
pub type SelectedFn = Box<dyn FnMut()>;

/// One entry of a [`MenuList`](crate::MenuList): a display label, its stable
/// position within the list, and an optional selection callback.
pub struct MenuItem {
    label: Line<'static>,
    index: usize,
    on_selected: Option<SelectedFn>,
}

impl MenuItem {
    /// Creates an item displaying `label` at `index`.
    pub fn new(label: impl Into<Line<'static>>, index: usize) -> Self {
        Self {
            label: label.into(),
            index,
            on_selected: None,
        }
    }

    /// The position of this item within its list, fixed at creation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current display label.
    pub fn label(&self) -> &Line<'static> {
        &self.label
    }

    /// Replaces the label, emphasizing `shortcut` where it occurs in it.
    ///
    /// The owning list renders item labels directly, so the new text shows
    /// up on the next frame.
    pub fn set_label(&mut self, label: &str, shortcut: Option<char>) {
        self.label = format_label_with_shortcut(label, shortcut);
    }

    pub(crate) fn set_on_selected(&mut self, on_selected: Option<SelectedFn>) {
        self.on_selected = on_selected;
    }

    /// Fires the selection callback; a no-op when none is registered.
    pub fn invoke(&mut self) {
        if let Some(on_selected) = &mut self.on_selected {
            on_selected();
        }
    }
}
