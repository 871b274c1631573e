//! In-memory model of a generated documentation page
//!
//! Only the elements that take part in navigation are kept: each one has its
//! DOM id, its category (the CSS class the page generator assigned) and the
//! inline style the controller has written so far. Elements are indexed by id
//! and by category when they are added, so the controller never has to walk
//! the whole page.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::node_id::{DomRole, MemberId, NodeId};
use crate::style::Style;

/// Category tag of a navigable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Sidebar entry of a class (`navclass`)
    NavClass,
    /// Member list of a class (`navmemberlist`)
    NavMemberList,
    /// Title above a member list (`nav_title_memberlist`)
    NavTitleMemberList,
    /// Sidebar entry of a constructor (`navconstructor`)
    NavConstructor,
    /// Sidebar entry of a method (`navmethod`)
    NavMethod,
    /// Class-level description panel (`classdescription`)
    ClassDescription,
    /// Member-level description panel (`memberdescription`)
    MemberDescription,
}

impl Category {
    /// All categories, in page order
    pub const ALL: [Category; 7] = [
        Category::NavClass,
        Category::NavMemberList,
        Category::NavTitleMemberList,
        Category::NavConstructor,
        Category::NavMethod,
        Category::ClassDescription,
        Category::MemberDescription,
    ];

    /// CSS class name used on the generated page
    pub fn class_name(self) -> &'static str {
        match self {
            Category::NavClass => "navclass",
            Category::NavMemberList => "navmemberlist",
            Category::NavTitleMemberList => "nav_title_memberlist",
            Category::NavConstructor => "navconstructor",
            Category::NavMethod => "navmethod",
            Category::ClassDescription => "classdescription",
            Category::MemberDescription => "memberdescription",
        }
    }

    /// Look up a category by its CSS class name
    pub fn from_class_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.class_name() == name)
    }

    /// Constructor and method entries are navigated identically
    pub fn is_member_nav(self) -> bool {
        matches!(self, Category::NavConstructor | Category::NavMethod)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One navigable element of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// DOM id, e.g. `nav_1_2`
    pub dom_id: String,
    pub category: Category,
    /// Visible text of the element, when known
    pub label: Option<String>,
    pub style: Style,
}

impl Element {
    /// The role and navigation id encoded in the DOM id
    pub fn node_id(&self) -> Option<(DomRole, NodeId)> {
        DomRole::split_dom_id(&self.dom_id)
    }
}

/// Indexed collection of the navigable elements of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
    by_id: HashMap<String, usize>,
    by_category: HashMap<Category, Vec<usize>>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and index it
    ///
    /// If the id is already taken the element is still styled with its
    /// category, but id lookups keep resolving to the first one.
    pub fn push(&mut self, dom_id: impl Into<String>, category: Category, label: Option<String>) {
        let dom_id = dom_id.into();
        let position = self.elements.len();

        if self.by_id.contains_key(&dom_id) {
            log::warn!("Duplicate element id '{}' ({})", dom_id, category);
        } else {
            self.by_id.insert(dom_id.clone(), position);
        }
        self.by_category.entry(category).or_default().push(position);

        self.elements.push(Element {
            dom_id,
            category,
            label,
            style: Style::default(),
        });
    }

    /// All elements in page order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether an element with this DOM id exists
    pub fn contains(&self, dom_id: &str) -> bool {
        self.by_id.contains_key(dom_id)
    }

    /// Find an element by DOM id
    pub fn get(&self, dom_id: &str) -> Option<&Element> {
        self.by_id.get(dom_id).map(|&i| &self.elements[i])
    }

    /// Elements of one category, in page order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Element> {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .map(move |&i| &self.elements[i])
    }

    /// Visit every element of a category mutably
    pub fn for_each_in(&mut self, category: Category, mut visit: impl FnMut(&mut Element)) {
        if let Some(positions) = self.by_category.get(&category) {
            for &i in positions {
                visit(&mut self.elements[i]);
            }
        }
    }

    /// Number of elements of a category
    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    /// Whether the sidebar has an entry for this class or member
    pub fn has_nav(&self, id: &NodeId) -> bool {
        self.contains(&id.nav_dom_id())
    }

    /// Class ids that have a sidebar entry, in ascending order
    pub fn class_ids(&self) -> BTreeSet<u32> {
        self.by_category(Category::NavClass)
            .filter_map(|e| match e.node_id() {
                Some((DomRole::Nav, NodeId::Class(class))) => Some(class),
                _ => None,
            })
            .collect()
    }

    /// Member ids with a sidebar entry, grouped by class and sorted
    pub fn members_by_class(&self) -> BTreeMap<u32, BTreeSet<u32>> {
        let mut members: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
        for element in self
            .by_category(Category::NavConstructor)
            .chain(self.by_category(Category::NavMethod))
        {
            if let Some((DomRole::Nav, NodeId::Member(MemberId { class, index }))) =
                element.node_id()
            {
                members.entry(class).or_default().insert(index);
            }
        }
        members
    }
}
