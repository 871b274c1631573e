//! Checks that a page follows the navigation contract
//!
//! Keyboard paging assumes class ids `1..=n`, member indices `1..=m` per
//! class with the constructor first, and a description panel for every
//! sidebar entry. A page that breaks one of these still works, but some
//! entries become unreachable or show nothing.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::document::{Category, Document};
use crate::node_id::{DomRole, MemberId, NodeId};
use crate::page::{self, PageError};

/// A violation of the navigation contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractIssue {
    /// Element id does not match its category
    UnexpectedId { dom_id: String, category: Category },
    /// Two elements share an id
    DuplicateId(String),
    /// No sidebar entry for class 1, so nothing is shown on load
    NoInitialClass,
    /// Class ids are not contiguous
    MissingClass(u32),
    /// Class without any member entries
    EmptyClass(u32),
    /// Member entries for a class without a sidebar entry
    OrphanMembers(u32),
    /// Member indices of a class are not contiguous
    MissingMember(MemberId),
    /// Constructor that is not the first member
    MisplacedConstructor(MemberId),
    /// Sidebar entry without its companion element
    MissingPanel { nav_id: String, expected: String },
}

impl fmt::Display for ContractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractIssue::UnexpectedId { dom_id, category } => {
                write!(f, "Element '{}' ({}) has an unexpected id", dom_id, category)
            }
            ContractIssue::DuplicateId(dom_id) => write!(f, "Duplicate element id '{}'", dom_id),
            ContractIssue::NoInitialClass => write!(f, "No sidebar entry for class 1"),
            ContractIssue::MissingClass(class) => {
                write!(f, "Class {} is missing from the sidebar", class)
            }
            ContractIssue::EmptyClass(class) => write!(f, "Class {} has no members", class),
            ContractIssue::OrphanMembers(class) => {
                write!(f, "Members listed for unknown class {}", class)
            }
            ContractIssue::MissingMember(member) => {
                write!(f, "Member {} is missing from the sidebar", member)
            }
            ContractIssue::MisplacedConstructor(member) => {
                write!(f, "Constructor {} is not the first member", member)
            }
            ContractIssue::MissingPanel { nav_id, expected } => {
                write!(f, "Sidebar entry '{}' has no '{}'", nav_id, expected)
            }
        }
    }
}

/// Result of checking one page
#[derive(Debug)]
pub struct PageReport {
    pub path: PathBuf,
    pub classes: usize,
    pub members: usize,
    pub issues: Vec<ContractIssue>,
}

impl PageReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check one document against the navigation contract
pub fn check_document(document: &Document) -> Vec<ContractIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for element in document.elements() {
        if !seen.insert(element.dom_id.as_str()) {
            issues.push(ContractIssue::DuplicateId(element.dom_id.clone()));
        }
        if !id_matches_category(element.node_id(), element.category) {
            issues.push(ContractIssue::UnexpectedId {
                dom_id: element.dom_id.clone(),
                category: element.category,
            });
        }
    }

    let classes = document.class_ids();
    let members = document.members_by_class();

    if !classes.is_empty() && !classes.contains(&1) {
        issues.push(ContractIssue::NoInitialClass);
    }
    if let Some(&last) = classes.last() {
        issues.extend(
            (1..last)
                .filter(|class| !classes.contains(class))
                .map(ContractIssue::MissingClass),
        );
    }

    for &class in &classes {
        let id = NodeId::Class(class);
        let nav_id = id.nav_dom_id();
        for expected in [DomRole::List.dom_id(&id), id.description_dom_id()] {
            if !document.contains(&expected) {
                issues.push(ContractIssue::MissingPanel {
                    nav_id: nav_id.clone(),
                    expected,
                });
            }
        }

        let Some(indices) = members.get(&class) else {
            issues.push(ContractIssue::EmptyClass(class));
            continue;
        };
        if let Some(&last) = indices.last() {
            issues.extend(
                (1..last)
                    .filter(|index| !indices.contains(index))
                    .map(|index| ContractIssue::MissingMember(MemberId::new(class, index))),
            );
        }
    }

    for (&class, indices) in &members {
        if !classes.contains(&class) {
            issues.push(ContractIssue::OrphanMembers(class));
        }
        for &index in indices {
            let member = NodeId::Member(MemberId::new(class, index));
            let expected = member.description_dom_id();
            if !document.contains(&expected) {
                issues.push(ContractIssue::MissingPanel {
                    nav_id: member.nav_dom_id(),
                    expected,
                });
            }
        }
    }

    for element in document.by_category(Category::NavConstructor) {
        if let Some((DomRole::Nav, NodeId::Member(member))) = element.node_id() {
            if member.index != 1 {
                issues.push(ContractIssue::MisplacedConstructor(member));
            }
        }
    }

    issues
}

fn id_matches_category(id: Option<(DomRole, NodeId)>, category: Category) -> bool {
    match (category, id) {
        (Category::NavClass, Some((DomRole::Nav, NodeId::Class(_))))
        | (Category::NavMemberList, Some((DomRole::List, NodeId::Class(_))))
        | (Category::NavTitleMemberList, Some((DomRole::Title, NodeId::Class(_))))
        | (Category::ClassDescription, Some((DomRole::Description, NodeId::Class(_))))
        | (Category::MemberDescription, Some((DomRole::Description, NodeId::Member(_)))) => true,
        (c, Some((DomRole::Nav, NodeId::Member(_)))) => c.is_member_nav(),
        _ => false,
    }
}

/// Find the pages to check under `root`
///
/// A file is returned as is; a directory is searched for `.html` / `.htm`
/// files, sorted by path.
pub fn discover_pages(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|s| s.to_str()),
                Some("html") | Some("htm")
            )
        })
        .map(|e| e.path().to_path_buf())
        .sorted()
        .collect()
}

/// Read and check a single page
pub fn check_page(path: &Path) -> Result<PageReport, PageError> {
    let document = page::load_page(path)?;
    let issues = check_document(&document);
    if !issues.is_empty() {
        log::warn!("{} contract issues in {}", issues.len(), path.display());
    }

    Ok(PageReport {
        path: path.to_path_buf(),
        classes: document.class_ids().len(),
        members: document.members_by_class().values().map(|m| m.len()).sum(),
        issues,
    })
}

/// Check several pages (optionally in parallel), preserving their order
pub fn check_pages(paths: &[PathBuf]) -> Vec<Result<PageReport, PageError>> {
    #[cfg(feature = "parallel")]
    let reports = paths.par_iter().map(|path| check_page(path)).collect();

    #[cfg(not(feature = "parallel"))]
    let reports = paths.iter().map(|path| check_page(path)).collect();

    reports
}
