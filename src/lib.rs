//! A drop-down menu bar widget for terminal user interfaces.
//!
//! `termbar` renders a one-row bar of menu buttons across the top of the
//! screen. Each button owns a dropdown [`MenuList`] of entries with optional
//! shortcut letters; the [`Toolbar`] routes keyboard and mouse input between
//! the bar, the open list and a global shortcut map, and dispatches the
//! selection callbacks registered for each entry.
//!
//! The widget draws with [ratatui] and consumes [crossterm] input events, so
//! it composes into an existing event loop like any other widget:
//!
//! ```
//! use termbar::Toolbar;
//!
//! let mut toolbar = Toolbar::new();
//! toolbar
//!     .add_menu_list("File", Some('F'))
//!     .add_item("New", Some('N'), Some(Box::new(|| { /* ... */ })))
//!     .add_item("Quit", Some('Q'), Some(Box::new(|| { /* ... */ })));
//! toolbar.add_menu_list("Help", Some('H'));
//!
//! // In the event loop:
//! //     toolbar.handle_key(key_event);
//! //     toolbar.handle_mouse(&mouse_event);
//! // and once per frame:
//! //     frame.render_widget(&mut toolbar, frame.area());
//! ```
//!
//! Opening a menu, switching between menus with the arrow keys or by
//! dragging across the buttons, previewing entries under the pointer and
//! firing a selection all follow the conventions of classic text-mode menu
//! bars. Redraws triggered from inside event handling are not painted
//! inline; install a handle with [`Toolbar::set_redraw`] that posts a
//! request to your event loop instead.
//!
//! [ratatui]: https://docs.rs/ratatui
//! [crossterm]: https://docs.rs/crossterm

mod draw;
mod event;
mod item;
mod menu_list;
mod style;
mod text;
mod toolbar;

pub use event::{MouseAction, Outcome, RedrawFn, Status};
pub use item::{MenuItem, SelectedFn};
pub use menu_list::MenuList;
pub use style::Styles;
pub use text::{format_label_with_shortcut, line_width, string_width};
pub use toolbar::Toolbar;
