//! Shared color table for toolbars and menu lists.

use ratatui::style::Color;

/// The colors a [`Toolbar`](crate::Toolbar) and its menu lists draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    /// Bar strip and inactive button background.
    pub background: Color,
    /// Labels, borders and the title.
    pub text: Color,
    /// Emphasized shortcut letters inside labels.
    pub text_hot_key: Color,
    /// Background of an activated button and of the highlighted menu row.
    pub menu_background_active: Color,
    /// Drop shadow behind an open menu list.
    pub shadow: Color,
}

impl Styles {
    /// The stock palette.
    pub const DEFAULT: Self = Self {
        background: Color::Gray,
        text: Color::Black,
        text_hot_key: Color::Rgb(190, 0, 0),
        menu_background_active: Color::Rgb(87, 192, 56),
        shadow: Color::Rgb(40, 35, 29),
    };
}

impl Default for Styles {
    fn default() -> Self {
        Self::DEFAULT
    }
}
