//! Input plumbing shared by the toolbar and its menu lists.

use std::rc::Rc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Handle used to request a repaint from the host event loop.
///
/// Firing the handle must not mutate widget state; it only posts a redraw
/// request (for example over an `mpsc` sender), non-blocking, once per call.
/// No ordering is guaranteed beyond eventual delivery.
pub type RedrawFn = Rc<dyn Fn()>;

/// The mouse actions the widget distinguishes.
///
/// A left release is reported as [`MouseAction::LeftUp`]; the toolbar
/// follows it with a synthesized [`MouseAction::LeftClick`] at the same
/// position, mirroring the click semantics of terminal UI frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Pointer movement; `left_held` is true while the primary button is
    /// down (a drag).
    Move {
        /// Whether the primary button is held during the move.
        left_held: bool,
    },
    /// The primary button was pressed.
    LeftDown,
    /// The primary button was released.
    LeftUp,
    /// A completed primary-button click.
    LeftClick,
}

impl MouseAction {
    /// Translates a crossterm mouse event into the action set together with
    /// the cell position. Events the widget does not care about (other
    /// buttons, scrolling) map to `None`.
    pub fn from_event(event: &MouseEvent) -> Option<(Self, Position)> {
        let action = match event.kind {
            MouseEventKind::Moved => Self::Move { left_held: false },
            MouseEventKind::Drag(MouseButton::Left) => Self::Move { left_held: true },
            MouseEventKind::Down(MouseButton::Left) => Self::LeftDown,
            MouseEventKind::Up(MouseButton::Left) => Self::LeftUp,
            _ => return None,
        };
        Some((action, Position::new(event.column, event.row)))
    }
}

/// The status of an input event after being offered to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The event was **not** handled and should be routed further.
    Ignored,
    /// The event was handled by the widget.
    Captured,
}

impl Status {
    /// Merges two [`Status`] into one.
    ///
    /// `Captured` takes precedence over `Ignored`:
    ///
    /// ```
    /// use termbar::Status;
    ///
    /// assert_eq!(Status::Ignored.merge(Status::Ignored), Status::Ignored);
    /// assert_eq!(Status::Ignored.merge(Status::Captured), Status::Captured);
    /// assert_eq!(Status::Captured.merge(Status::Ignored), Status::Captured);
    /// ```
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match self {
            Self::Ignored => other,
            Self::Captured => Self::Captured,
        }
    }
}

/// What a menu list did with an input event.
///
/// `Selected` reports the item index instead of firing the callback right
/// away, so the owning widget can close the menu first and invoke the
/// callback afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was not handled; offer it elsewhere.
    Ignored,
    /// The event was handled without selecting an entry.
    Captured,
    /// The entry at the index was selected.
    Selected(usize),
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ignored => Self::Ignored,
            Outcome::Captured | Outcome::Selected(_) => Self::Captured,
        }
    }
}
