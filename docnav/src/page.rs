//! Reader for generated documentation pages
//!
//! Scans the start tags of an HTML page and keeps every element whose `class`
//! attribute names one of the navigation categories. The rest of the markup
//! is irrelevant to navigation and is skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::document::{Category, Document};

/// Errors that can occur when reading a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Page {path} has no navigation elements", path = .path.display())]
    NoNavigation { path: PathBuf },
}

static START_TAG: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
static NON_MARKUP: OnceLock<Regex> = OnceLock::new();

/// Start tag, its attribute text and the text that directly follows it
fn start_tag() -> &'static Regex {
    START_TAG.get_or_init(|| {
        Regex::new(r"<[A-Za-z][A-Za-z0-9]*(\s[^<>]*?)?/?>([^<]*)").expect("start tag pattern")
    })
}

fn attribute() -> &'static Regex {
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)(id|class)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("attribute pattern")
    })
}

/// Comments and the bodies of `<script>` / `<style>` elements
fn non_markup() -> &'static Regex {
    NON_MARKUP.get_or_init(|| {
        Regex::new(
            r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
        )
        .expect("non-markup pattern")
    })
}

/// Read a page from disk
///
/// # Parameters
/// * `path` - Path of the generated HTML page
///
/// # Returns
/// * `Ok(Document)` - The navigable elements of the page
/// * `Err(PageError)` - The page could not be read or has nothing to navigate
pub fn load_page(path: &Path) -> Result<Document, PageError> {
    let html = fs::read_to_string(path).map_err(|source| PageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_page(&html);
    if document.is_empty() {
        return Err(PageError::NoNavigation {
            path: path.to_path_buf(),
        });
    }

    log::info!(
        "Read {} navigable elements from {}",
        document.len(),
        path.display()
    );
    Ok(document)
}

/// Extract the navigable elements of an HTML page
pub fn parse_page(html: &str) -> Document {
    let mut document = Document::new();
    let markup = non_markup().replace_all(html, "");

    for tag in start_tag().captures_iter(&markup) {
        let Some(attributes) = tag.get(1) else {
            continue;
        };

        let mut id = None;
        let mut class = None;
        for attr in attribute().captures_iter(attributes.as_str()) {
            let value = attr
                .get(2)
                .or_else(|| attr.get(3))
                .or_else(|| attr.get(4))
                .map_or("", |m| m.as_str());
            if attr[1].eq_ignore_ascii_case("id") {
                id.get_or_insert(value);
            } else {
                class.get_or_insert(value);
            }
        }

        let Some(category) = class.and_then(|c| c.split_whitespace().find_map(Category::from_class_name))
        else {
            continue;
        };
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            log::warn!("Skipping {} element without an id", category);
            continue;
        };

        let label = tag
            .get(2)
            .map(|text| unescape_html(text.as_str().trim()))
            .filter(|text| !text.is_empty());

        document.push(id, category, label);
    }

    document
}

/// Decode the handful of entities a page generator emits in plain text
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
