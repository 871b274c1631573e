//! Inline style state applied to page elements
//!
//! The controller only ever touches three properties: `display`,
//! `background` and `font-weight`. A property left at `None` has never been
//! written and falls back to the page stylesheet.

use std::fmt;

/// Background of the selected sidebar entry
pub const ACTIVE_BACKGROUND: &str = "#e8f8e8";

/// Background of every other sidebar entry
pub const NEUTRAL_BACKGROUND: &str = "#ecffe6";

/// CSS `display` values used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

/// Sidebar entry backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Active,
    Neutral,
}

impl Background {
    /// CSS color value
    pub fn css(self) -> &'static str {
        match self {
            Background::Active => ACTIVE_BACKGROUND,
            Background::Neutral => NEUTRAL_BACKGROUND,
        }
    }
}

/// CSS `font-weight` values used by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Bold,
    Normal,
}

/// Inline style of one element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub display: Option<Display>,
    pub background: Option<Background>,
    pub font_weight: Option<FontWeight>,
}

impl Style {
    /// Emphasis of the selected sidebar entry
    pub fn activate(&mut self) {
        self.background = Some(Background::Active);
        self.font_weight = Some(FontWeight::Bold);
        self.display = Some(Display::Block);
    }

    /// Neutral emphasis of an unselected sidebar entry
    pub fn deactivate(&mut self) {
        self.font_weight = Some(FontWeight::Normal);
        self.background = Some(Background::Neutral);
    }

    pub fn show(&mut self) {
        self.display = Some(Display::Block);
    }

    pub fn hide(&mut self) {
        self.display = Some(Display::None);
    }

    /// Whether the controller explicitly made this element visible
    pub fn is_shown(&self) -> bool {
        self.display == Some(Display::Block)
    }

    /// Whether the element carries the selected emphasis
    pub fn is_active(&self) -> bool {
        self.font_weight == Some(FontWeight::Bold)
    }
}

/// Renders the style the way it would appear in a `style` attribute
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut declarations = Vec::new();
        if let Some(display) = self.display {
            declarations.push(match display {
                Display::Block => "display: block".to_string(),
                Display::None => "display: none".to_string(),
            });
        }
        if let Some(background) = self.background {
            declarations.push(format!("background: {}", background.css()));
        }
        if let Some(weight) = self.font_weight {
            declarations.push(match weight {
                FontWeight::Bold => "font-weight: bold".to_string(),
                FontWeight::Normal => "font-weight: normal".to_string(),
            });
        }
        write!(f, "{}", declarations.join("; "))
    }
}
