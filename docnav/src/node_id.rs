//! Navigation identifiers
//!
//! Every navigable entity on a documentation page is addressed either by a
//! class id (`"3"`) or by a compound member id (`"3_2"`, the second member of
//! class 3). The DOM ids of the page elements prefix these with a role, for
//! example `nav_3_2` or `description_3`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the parts of a compound id
pub const ID_SEPARATOR: char = '_';

/// Errors that can occur when parsing a navigation id
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeIdError {
    /// The id was empty
    #[error("navigation id is empty")]
    Empty,

    /// A part of the id is not a non-negative integer
    #[error("invalid navigation id '{id}': '{part}' is not a number")]
    NotNumeric {
        /// The full id that was parsed
        id: String,
        /// The offending part
        part: String,
    },

    /// The id has more than two parts
    #[error("invalid navigation id '{id}': expected <class> or <class>_<member>")]
    TooManyParts {
        /// The full id that was parsed
        id: String,
    },
}

/// A member of a class, addressed as `<class>_<index>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId {
    /// Id of the owning class
    pub class: u32,
    /// 1-based position of the member inside its class
    pub index: u32,
}

impl MemberId {
    /// Create a member id
    pub fn new(class: u32, index: u32) -> Self {
        Self { class, index }
    }

    /// The first member of a class, normally its constructor
    pub fn first_of(class: u32) -> Self {
        Self { class, index: 1 }
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.class, ID_SEPARATOR, self.index)
    }
}

impl FromStr for MemberId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<NodeId>()? {
            NodeId::Member(member) => Ok(member),
            NodeId::Class(class) => Ok(MemberId::first_of(class)),
        }
    }
}

/// A class or member id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// Top-level class id
    Class(u32),
    /// Compound member id
    Member(MemberId),
}

impl NodeId {
    /// The class this id belongs to
    pub fn class_id(&self) -> u32 {
        match self {
            NodeId::Class(class) => *class,
            NodeId::Member(member) => member.class,
        }
    }

    /// DOM id of the sidebar entry (`nav_<id>`)
    pub fn nav_dom_id(&self) -> String {
        DomRole::Nav.dom_id(self)
    }

    /// DOM id of the description panel (`description_<id>`)
    pub fn description_dom_id(&self) -> String {
        DomRole::Description.dom_id(self)
    }
}

impl From<MemberId> for NodeId {
    fn from(member: MemberId) -> Self {
        NodeId::Member(member)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Class(class) => write!(f, "{}", class),
            NodeId::Member(member) => write!(f, "{}", member),
        }
    }
}

impl FromStr for NodeId {
    type Err = NodeIdError;

    /// Parse `"3"` or `"3_2"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NodeIdError::Empty);
        }

        // Only canonical decimal numbers: "01" or "+1" would name an id
        // whose DOM lookups never match.
        let parse_part = |part: &str| -> Result<u32, NodeIdError> {
            let not_numeric = || NodeIdError::NotNumeric {
                id: s.to_string(),
                part: part.to_string(),
            };
            let number = part.parse::<u32>().map_err(|_| not_numeric())?;
            if number.to_string() != part {
                return Err(not_numeric());
            }
            Ok(number)
        };

        let mut parts = s.split(ID_SEPARATOR);
        let class = parse_part(parts.next().unwrap_or_default())?;
        let Some(index) = parts.next() else {
            return Ok(NodeId::Class(class));
        };
        let index = parse_part(index)?;
        if parts.next().is_some() {
            return Err(NodeIdError::TooManyParts { id: s.to_string() });
        }

        Ok(NodeId::Member(MemberId { class, index }))
    }
}

/// Role prefix of a DOM id on the generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomRole {
    /// Sidebar entry of a class or member
    Nav,
    /// Member list of a class
    List,
    /// Title above the member list of a class
    Title,
    /// Description panel of a class or member
    Description,
}

impl DomRole {
    /// The prefix written before the navigation id
    pub fn prefix(self) -> &'static str {
        match self {
            DomRole::Nav => "nav",
            DomRole::List => "list",
            DomRole::Title => "title",
            DomRole::Description => "description",
        }
    }

    /// Build the DOM id of `id` for this role
    pub fn dom_id(self, id: &NodeId) -> String {
        format!("{}{}{}", self.prefix(), ID_SEPARATOR, id)
    }

    /// Split a DOM id such as `nav_3_2` into its role and navigation id
    ///
    /// Returns `None` for ids that do not follow the page convention.
    pub fn split_dom_id(dom_id: &str) -> Option<(DomRole, NodeId)> {
        let (prefix, rest) = dom_id.split_once(ID_SEPARATOR)?;
        let role = match prefix {
            "nav" => DomRole::Nav,
            "list" => DomRole::List,
            "title" => DomRole::Title,
            "description" => DomRole::Description,
            _ => return None,
        };
        rest.parse().ok().map(|id| (role, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_id() {
        assert_eq!("7".parse::<NodeId>(), Ok(NodeId::Class(7)));
    }

    #[test]
    fn test_parse_member_id() {
        assert_eq!(
            "3_12".parse::<NodeId>(),
            Ok(NodeId::Member(MemberId::new(3, 12)))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<NodeId>(), Err(NodeIdError::Empty));
        assert!(matches!(
            "a_1".parse::<NodeId>(),
            Err(NodeIdError::NotNumeric { .. })
        ));
        assert!(matches!(
            "1_".parse::<NodeId>(),
            Err(NodeIdError::NotNumeric { .. })
        ));
        assert!(matches!(
            "1_2_3".parse::<NodeId>(),
            Err(NodeIdError::TooManyParts { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_canonical_numbers() {
        for id in ["01", "+1", "1_01", "1_+2", "00"] {
            assert!(
                matches!(id.parse::<NodeId>(), Err(NodeIdError::NotNumeric { .. })),
                "'{}' should be rejected",
                id
            );
        }
        assert_eq!("0".parse::<NodeId>(), Ok(NodeId::Class(0)));
        assert_eq!(DomRole::split_dom_id("nav_01"), None);
    }

    #[test]
    fn test_display_matches_parse_input() {
        for id in ["1", "12", "1_1", "4_10"] {
            assert_eq!(id.parse::<NodeId>().unwrap().to_string(), id);
        }
    }

    #[test]
    fn test_member_id_from_class_id_defaults_to_first_member() {
        assert_eq!("5".parse::<MemberId>(), Ok(MemberId::first_of(5)));
    }

    #[test]
    fn test_dom_ids() {
        let member = NodeId::Member(MemberId::new(2, 3));
        assert_eq!(member.nav_dom_id(), "nav_2_3");
        assert_eq!(member.description_dom_id(), "description_2_3");
        assert_eq!(DomRole::List.dom_id(&NodeId::Class(2)), "list_2");
        assert_eq!(DomRole::Title.dom_id(&NodeId::Class(2)), "title_2");
    }

    #[test]
    fn test_split_dom_id() {
        assert_eq!(
            DomRole::split_dom_id("nav_1_2"),
            Some((DomRole::Nav, NodeId::Member(MemberId::new(1, 2))))
        );
        assert_eq!(
            DomRole::split_dom_id("description_4"),
            Some((DomRole::Description, NodeId::Class(4)))
        );
        assert_eq!(DomRole::split_dom_id("sidebar"), None);
        assert_eq!(DomRole::split_dom_id("footer_1"), None);
        assert_eq!(DomRole::split_dom_id("nav_x"), None);
    }
}
