//! API outline from docnav.toml
//!
//! An outline lists the documented classes and their members in page order.
//! It produces the same navigable structure the page generator emits, so a
//! page can be browsed and checked without the HTML at hand.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::document::{Category, Document};
use crate::node_id::{DomRole, MemberId, NodeId};

/// Outline of a documented API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Optional page title
    pub title: Option<String>,

    /// Documented classes in sidebar order
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassOutline>,
}

/// One documented class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassOutline {
    /// Class name shown in the sidebar
    pub name: String,

    /// Class-level description
    pub description: Option<String>,

    /// Constructor and methods in sidebar order
    #[serde(rename = "member", default)]
    pub members: Vec<MemberOutline>,
}

/// One constructor or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberOutline {
    /// Member name shown in the sidebar
    pub name: String,

    #[serde(default)]
    pub kind: MemberKind,

    /// Member-level description
    pub description: Option<String>,
}

/// Kind of a class member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    #[default]
    Method,
}

impl MemberKind {
    /// Sidebar category of the member entry
    pub fn category(self) -> Category {
        match self {
            MemberKind::Constructor => Category::NavConstructor,
            MemberKind::Method => Category::NavMethod,
        }
    }
}

impl Outline {
    /// Load an outline from a docnav.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the outline file
    ///
    /// # Returns
    /// * `Ok(Outline)` - Successfully loaded outline
    /// * `Err(OutlineError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OutlineError> {
        let content = fs::read_to_string(&path).map_err(OutlineError::Read)?;
        let outline = toml::from_str(&content)?;
        log::info!(
            "Loaded outline with {} classes from {}",
            Outline::class_count(&outline),
            path.as_ref().display()
        );
        Ok(outline)
    }

    /// Save the outline to a docnav.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OutlineError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(OutlineError::Write)
    }

    /// Number of documented classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Build the navigable elements of the page this outline describes
    ///
    /// Classes are numbered from 1 in outline order and members from 1 within
    /// their class. Sidebar elements come first, description panels after.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();

        for (class_id, class) in (1u32..).zip(&self.classes) {
            let id = NodeId::Class(class_id);
            document.push(id.nav_dom_id(), Category::NavClass, Some(class.name.clone()));
            document.push(
                DomRole::Title.dom_id(&id),
                Category::NavTitleMemberList,
                Some(class.name.clone()),
            );
            document.push(DomRole::List.dom_id(&id), Category::NavMemberList, None);

            for (index, member) in (1u32..).zip(&class.members) {
                if member.kind == MemberKind::Constructor && index != 1 {
                    log::warn!(
                        "Constructor '{}' of class '{}' is not the first member",
                        member.name,
                        class.name
                    );
                }
                let member_id = NodeId::Member(MemberId::new(class_id, index));
                document.push(
                    member_id.nav_dom_id(),
                    member.kind.category(),
                    Some(member.name.clone()),
                );
            }
        }

        for (class_id, class) in (1u32..).zip(&self.classes) {
            let id = NodeId::Class(class_id);
            document.push(
                id.description_dom_id(),
                Category::ClassDescription,
                class.description.clone(),
            );
            for (index, member) in (1u32..).zip(&class.members) {
                let member_id = NodeId::Member(MemberId::new(class_id, index));
                document.push(
                    member_id.description_dom_id(),
                    Category::MemberDescription,
                    member.description.clone(),
                );
            }
        }

        document
    }
}

/// Errors that can occur when loading or saving an outline
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to read outline: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write outline: {0}")]
    Write(#[source] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
