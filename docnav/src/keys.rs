//! Key events recognized by the navigation controller

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key code of Page Up
pub const PAGE_UP_CODE: u32 = 33;

/// Key code of Page Down
pub const PAGE_DOWN_CODE: u32 = 34;

/// Error returned when a key name cannot be understood
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown key '{0}' (expected pgup, pgdn or a numeric key code)")]
pub struct KeyParseError(pub String);

/// A key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    PageUp,
    PageDown,
    /// Any other key, passed through untouched
    Other(u32),
}

impl Key {
    /// Map a browser key code
    pub fn from_code(code: u32) -> Self {
        match code {
            PAGE_UP_CODE => Key::PageUp,
            PAGE_DOWN_CODE => Key::PageDown,
            other => Key::Other(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Key::PageUp => PAGE_UP_CODE,
            Key::PageDown => PAGE_DOWN_CODE,
            Key::Other(code) => code,
        }
    }

    /// Navigation step bound to the key, if any
    pub fn offset(self) -> Option<i32> {
        match self {
            Key::PageUp => Some(-1),
            Key::PageDown => Some(1),
            Key::Other(_) => None,
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Accepts `pgup`, `PageUp`, `page-up`, `pgdn`, `PageDown`, ... or a key code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        match name.as_str() {
            "pgup" | "pageup" | "prior" => Ok(Key::PageUp),
            "pgdn" | "pgdown" | "pagedown" | "next" => Ok(Key::PageDown),
            _ => name
                .parse::<u32>()
                .map(Key::from_code)
                .map_err(|_| KeyParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Other(code) => write!(f, "key {}", code),
        }
    }
}
