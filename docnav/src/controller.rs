//! Navigation controller for a documentation page
//!
//! The controller owns the page model and the current selection. Selecting a
//! class emphasizes its sidebar entry and reveals its member list and class
//! description; selecting a member does the same for the member entry and its
//! description. Page Up / Page Down walk the members of all classes as one
//! flat sequence without materializing it.
//!
//! Lookups of ids that are not on the page never fail: the affected element
//! simply stays unstyled, and navigation past either end stays where it is.

use std::collections::BTreeMap;

use crate::document::{Category, Document};
use crate::keys::Key;
use crate::node_id::{DomRole, MemberId, NodeId};
use crate::style::{Background, Style};

/// Class selected when the page finishes loading
pub const INITIAL_CLASS: u32 = 1;

/// Selection state and page model of one documentation page
#[derive(Debug, Clone)]
pub struct NavigationController {
    document: Document,
    class_selection: u32,
    member_selection: MemberId,
    /// Highest member index per class, filled once after load
    last_index: BTreeMap<u32, u32>,
}

/// What the page currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pub class_selection: u32,
    pub member_selection: MemberId,
    /// DOM ids of the emphasized class entries
    pub active_classes: Vec<String>,
    /// DOM ids of the emphasized member entries
    pub active_members: Vec<String>,
    /// DOM ids of the member lists that are shown
    pub visible_member_lists: Vec<String>,
    /// DOM ids of the class descriptions that are shown
    pub visible_class_descriptions: Vec<String>,
    /// DOM ids of the member descriptions that are shown
    pub visible_member_descriptions: Vec<String>,
}

impl NavigationController {
    /// Wrap a page model; nothing is styled until [`Self::on_load`] runs
    pub fn new(document: Document) -> Self {
        Self {
            document,
            class_selection: INITIAL_CLASS,
            member_selection: MemberId::first_of(INITIAL_CLASS),
            last_index: BTreeMap::new(),
        }
    }

    /// Page load hook: open the first class and index the member counts
    pub fn on_load(&mut self) {
        log::info!(
            "Page loaded with {} navigable elements",
            self.document.len()
        );
        self.activate_initial(INITIAL_CLASS);
        self.build_last_index_table();
    }

    /// Key-down hook
    ///
    /// Returns `false` for keys the controller does not handle, so the event
    /// can pass through to the host.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        let Some(offset) = key.offset() else {
            return false;
        };

        let target = self.navigate_id(NodeId::Member(self.member_selection), offset);
        log::debug!("{}: {} -> {}", key, self.member_selection, target);

        self.select_class(target.class_id());
        match target {
            NodeId::Member(member) => self.select_member(member),
            // Member ids always navigate to member ids.
            NodeId::Class(class) => self.select_member(MemberId::first_of(class)),
        }
        true
    }

    /// Emphasize a class and reveal its member list and description
    ///
    /// Every other class entry is reset to the neutral style and its member
    /// list, title and description are hidden. All member descriptions are
    /// hidden and all member entries lose their background. An id without a
    /// sidebar entry leaves nothing emphasized.
    pub fn select_class(&mut self, class: u32) {
        let id = NodeId::Class(class);
        let nav_id = id.nav_dom_id();
        let list_id = DomRole::List.dom_id(&id);
        let title_id = DomRole::Title.dom_id(&id);
        let description_id = id.description_dom_id();

        if !self.document.contains(&nav_id) {
            log::debug!("No sidebar entry for class {}", class);
        }

        self.document.for_each_in(Category::NavClass, |e| {
            if e.dom_id == nav_id {
                e.style.activate();
            } else {
                e.style.deactivate();
            }
        });
        self.document.for_each_in(Category::NavMemberList, |e| {
            if e.dom_id == list_id {
                e.style.background = Some(Background::Active);
                e.style.show();
            } else {
                e.style.background = Some(Background::Neutral);
                e.style.hide();
            }
        });
        self.document.for_each_in(Category::NavTitleMemberList, |e| {
            if e.dom_id == title_id {
                e.style.show();
            } else {
                e.style.hide();
            }
        });
        self.document.for_each_in(Category::ClassDescription, |e| {
            if e.dom_id == description_id {
                e.style.show();
            } else {
                e.style.hide();
            }
        });
        self.document
            .for_each_in(Category::MemberDescription, |e| e.style.hide());
        for category in [Category::NavConstructor, Category::NavMethod] {
            self.document.for_each_in(category, |e| {
                e.style.background = Some(Background::Neutral);
            });
        }

        self.class_selection = class;
    }

    /// Emphasize a constructor or method and reveal its description
    pub fn select_member(&mut self, member: MemberId) {
        let id = NodeId::Member(member);
        let nav_id = id.nav_dom_id();
        let description_id = id.description_dom_id();

        if !self.document.contains(&nav_id) {
            log::debug!("No sidebar entry for member {}", member);
        }

        for category in [Category::NavConstructor, Category::NavMethod] {
            self.document.for_each_in(category, |e| {
                if e.dom_id == nav_id {
                    e.style.activate();
                } else {
                    e.style.deactivate();
                }
            });
        }
        self.document.for_each_in(Category::MemberDescription, |e| {
            if e.dom_id == description_id {
                e.style.show();
            } else {
                e.style.hide();
            }
        });

        self.member_selection = member;
    }

    /// Open a class on its first member
    pub fn activate_initial(&mut self, class: u32) {
        self.select_class(class);
        self.select_member(MemberId::first_of(class));
    }

    /// Record the highest member index of every class
    ///
    /// Needed to step backwards into the last member of the previous class.
    /// The page is static, so the table is never rebuilt once filled.
    pub fn build_last_index_table(&mut self) {
        let mut table = BTreeMap::new();
        for category in [
            Category::NavConstructor,
            Category::NavMethod,
            Category::NavClass,
        ] {
            for element in self.document.by_category(category) {
                if let Some((DomRole::Nav, NodeId::Member(member))) = element.node_id() {
                    let last = table.entry(member.class).or_insert(member.index);
                    *last = (*last).max(member.index);
                }
            }
        }
        log::info!("Indexed member counts of {} classes", table.len());
        self.last_index = table;
    }

    /// Id `offset` steps away from `id` in the flattened class/member order
    ///
    /// Class ids step over classes, member ids step over members and cross
    /// into the neighbouring class at either end of a class. Steps that would
    /// leave the page return `id` unchanged. Offsets larger than one are
    /// taken as repeated single steps.
    pub fn navigate_id(&self, id: NodeId, offset: i32) -> NodeId {
        let step = offset.signum();
        let mut current = id;
        for _ in 0..offset.unsigned_abs() {
            let next = self.step(current, step);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn step(&self, id: NodeId, offset: i32) -> NodeId {
        if offset == 0 {
            return id;
        }

        let member = match id {
            NodeId::Class(class) => {
                return match class.checked_add_signed(offset) {
                    Some(next) if self.document.has_nav(&NodeId::Class(next)) => {
                        NodeId::Class(next)
                    }
                    _ => id,
                };
            }
            NodeId::Member(member) => member,
        };

        if let Some(index) = member.index.checked_add_signed(offset) {
            let candidate = NodeId::Member(MemberId::new(member.class, index));
            if self.document.has_nav(&candidate) {
                return candidate;
            }
        }

        let prefix = NodeId::Class(member.class);
        if offset > 0 {
            match self.step(prefix, 1) {
                next if next == prefix => {
                    log::debug!("Already at the last member ({})", member);
                    id
                }
                next => NodeId::Member(MemberId::first_of(next.class_id())),
            }
        } else {
            let previous = self.step(prefix, -1);
            match self.last_index.get(&previous.class_id()) {
                Some(&last) if previous != prefix => {
                    NodeId::Member(MemberId::new(previous.class_id(), last))
                }
                _ => {
                    log::debug!("Cannot step back from {}", member);
                    id
                }
            }
        }
    }

    /// Currently selected class
    pub fn class_selection(&self) -> u32 {
        self.class_selection
    }

    /// Currently selected member
    pub fn member_selection(&self) -> MemberId {
        self.member_selection
    }

    /// Highest member index per class (empty before load)
    pub fn last_index_table(&self) -> &BTreeMap<u32, u32> {
        &self.last_index
    }

    /// The page model with its current styles
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Every member id in page-down order
    pub fn navigation_order(&self) -> Vec<MemberId> {
        self.document
            .members_by_class()
            .into_iter()
            .flat_map(|(class, indices)| {
                indices
                    .into_iter()
                    .map(move |index| MemberId::new(class, index))
            })
            .collect()
    }

    /// Capture what the page currently shows
    pub fn snapshot(&self) -> NavigationSnapshot {
        let ids = |category: Category, pick: fn(&Style) -> bool| {
            self.document
                .by_category(category)
                .filter(|e| pick(&e.style))
                .map(|e| e.dom_id.clone())
                .collect::<Vec<_>>()
        };

        let mut active_members = ids(Category::NavConstructor, Style::is_active);
        active_members.extend(ids(Category::NavMethod, Style::is_active));

        NavigationSnapshot {
            class_selection: self.class_selection,
            member_selection: self.member_selection,
            active_classes: ids(Category::NavClass, Style::is_active),
            active_members,
            visible_member_lists: ids(Category::NavMemberList, Style::is_shown),
            visible_class_descriptions: ids(Category::ClassDescription, Style::is_shown),
            visible_member_descriptions: ids(Category::MemberDescription, Style::is_shown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Page with the given member count per class, ids starting at 1
    fn page(member_counts: &[u32]) -> Document {
        let mut doc = Document::new();
        for (i, &count) in member_counts.iter().enumerate() {
            let class = i as u32 + 1;
            doc.push(format!("nav_{class}"), Category::NavClass, None);
            doc.push(format!("title_{class}"), Category::NavTitleMemberList, None);
            doc.push(format!("list_{class}"), Category::NavMemberList, None);
            for index in 1..=count {
                let category = if index == 1 {
                    Category::NavConstructor
                } else {
                    Category::NavMethod
                };
                doc.push(format!("nav_{class}_{index}"), category, None);
            }
        }
        for (i, &count) in member_counts.iter().enumerate() {
            let class = i as u32 + 1;
            doc.push(format!("description_{class}"), Category::ClassDescription, None);
            for index in 1..=count {
                doc.push(
                    format!("description_{class}_{index}"),
                    Category::MemberDescription,
                    None,
                );
            }
        }
        doc
    }

    fn loaded(member_counts: &[u32]) -> NavigationController {
        let mut controller = NavigationController::new(page(member_counts));
        controller.on_load();
        controller
    }

    fn id(s: &str) -> NodeId {
        s.parse().unwrap()
    }

    fn nav(controller: &NavigationController, from: &str, offset: i32) -> String {
        controller.navigate_id(id(from), offset).to_string()
    }

    #[test]
    fn test_on_load_selects_first_member_of_first_class() {
        let controller = loaded(&[2, 1]);
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.class_selection, 1);
        assert_eq!(snapshot.member_selection, MemberId::new(1, 1));
        assert_eq!(snapshot.active_classes, vec!["nav_1"]);
        assert_eq!(snapshot.active_members, vec!["nav_1_1"]);
        assert_eq!(snapshot.visible_member_lists, vec!["list_1"]);
        assert_eq!(snapshot.visible_class_descriptions, vec!["description_1"]);
        assert_eq!(snapshot.visible_member_descriptions, vec!["description_1_1"]);
        assert_eq!(controller.last_index_table().get(&1), Some(&2));
        assert_eq!(controller.last_index_table().get(&2), Some(&1));
    }

    #[test]
    fn test_select_class_is_idempotent() {
        let mut once = loaded(&[2, 3]);
        once.select_class(2);

        let mut twice = once.clone();
        twice.select_class(2);

        assert_eq!(once.snapshot(), twice.snapshot());
        assert_eq!(once.document(), twice.document());
    }

    #[test]
    fn test_select_class_hides_member_descriptions_and_other_panels() {
        let mut controller = loaded(&[2, 1]);
        controller.select_class(2);
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.active_classes, vec!["nav_2"]);
        assert_eq!(snapshot.visible_member_lists, vec!["list_2"]);
        assert_eq!(snapshot.visible_class_descriptions, vec!["description_2"]);
        assert!(snapshot.visible_member_descriptions.is_empty());

        let title_1 = controller.document().get("title_1").unwrap();
        let title_2 = controller.document().get("title_2").unwrap();
        assert!(!title_1.style.is_shown());
        assert!(title_2.style.is_shown());

        let class_1 = controller.document().get("nav_1").unwrap();
        assert_eq!(
            class_1.style.background,
            Some(Background::Neutral)
        );
    }

    #[test]
    fn test_select_unknown_class_leaves_nothing_active() {
        let mut controller = loaded(&[1]);
        controller.select_class(9);
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.class_selection, 9);
        assert!(snapshot.active_classes.is_empty());
        assert!(snapshot.visible_class_descriptions.is_empty());
    }

    #[test]
    fn test_select_member_moves_emphasis() {
        let mut controller = loaded(&[3]);
        controller.select_member(MemberId::new(1, 3));
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.active_members, vec!["nav_1_3"]);
        assert_eq!(snapshot.visible_member_descriptions, vec!["description_1_3"]);
        assert_eq!(controller.member_selection(), MemberId::new(1, 3));
    }

    #[test]
    fn test_activate_initial_selects_first_member() {
        let mut controller = loaded(&[2, 4, 1]);
        for class in 1..=3 {
            controller.activate_initial(class);
            assert_eq!(controller.class_selection(), class);
            assert_eq!(controller.member_selection(), MemberId::first_of(class));
        }
    }

    #[test]
    fn test_zero_offset_is_identity() {
        let controller = loaded(&[2, 1]);
        for s in ["1", "2", "1_1", "1_2", "2_1", "7_7"] {
            assert_eq!(nav(&controller, s, 0), s);
        }
    }

    #[test]
    fn test_class_ids_step_without_wrapping() {
        let controller = loaded(&[1, 1, 1]);
        assert_eq!(nav(&controller, "1", 1), "2");
        assert_eq!(nav(&controller, "3", -1), "2");
        assert_eq!(nav(&controller, "3", 1), "3");
        assert_eq!(nav(&controller, "1", -1), "1");
    }

    #[test]
    fn test_interior_round_trip() {
        let controller = loaded(&[4, 3]);
        for s in ["1_2", "1_3", "2_2"] {
            let forward = controller.navigate_id(id(s), 1);
            assert_eq!(controller.navigate_id(forward, -1).to_string(), s);
        }
    }

    #[test]
    fn test_forward_crosses_class_boundary() {
        let controller = loaded(&[2, 1]);
        assert_eq!(nav(&controller, "1_2", 1), "2_1");
    }

    #[test]
    fn test_backward_crosses_class_boundary() {
        let controller = loaded(&[2, 1]);
        assert_eq!(nav(&controller, "2_1", -1), "1_2");
    }

    #[test]
    fn test_last_member_overall_is_a_forward_boundary() {
        let controller = loaded(&[2, 1]);
        assert_eq!(nav(&controller, "2_1", 1), "2_1");
    }

    #[test]
    fn test_first_member_is_a_backward_boundary_before_table_is_built() {
        let controller = NavigationController::new(page(&[2, 1]));
        assert_eq!(nav(&controller, "1_1", -1), "1_1");
        // Without the table there is no way back into class 1 either.
        assert_eq!(nav(&controller, "2_1", -1), "2_1");
    }

    #[test]
    fn test_first_member_is_a_backward_boundary_after_load() {
        let controller = loaded(&[2, 1]);
        assert_eq!(nav(&controller, "1_1", -1), "1_1");
    }

    #[test]
    fn test_constructor_only_class_is_reachable_backwards() {
        let controller = loaded(&[1, 2]);
        assert_eq!(nav(&controller, "2_1", -1), "1_1");
    }

    #[test]
    fn test_multi_step_offsets_repeat_single_steps() {
        let controller = loaded(&[2, 1, 3]);
        assert_eq!(nav(&controller, "1_1", 3), "3_1");
        assert_eq!(nav(&controller, "3_2", -3), "1_2");
        assert_eq!(nav(&controller, "3_2", 10), "3_3");
        assert_eq!(nav(&controller, "1_2", -10), "1_1");
    }

    #[test]
    fn test_page_down_walks_all_members_then_stops() {
        let mut controller = loaded(&[2, 1]);
        let mut visited = vec![controller.member_selection().to_string()];
        for _ in 0..3 {
            assert!(controller.on_key_down(Key::PageDown));
            visited.push(controller.member_selection().to_string());
        }
        assert_eq!(visited, vec!["1_1", "1_2", "2_1", "2_1"]);
        assert_eq!(controller.class_selection(), 2);
    }

    #[test]
    fn test_page_up_walks_back_across_classes() {
        let mut controller = loaded(&[2, 1]);
        controller.activate_initial(2);
        let mut visited = Vec::new();
        for _ in 0..3 {
            controller.on_key_down(Key::PageUp);
            visited.push(controller.member_selection().to_string());
        }
        assert_eq!(visited, vec!["1_2", "1_1", "1_1"]);

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.active_classes, vec!["nav_1"]);
        assert_eq!(snapshot.active_members, vec!["nav_1_1"]);
        assert_eq!(snapshot.visible_member_descriptions, vec!["description_1_1"]);
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut controller = loaded(&[2, 1]);
        let before = controller.snapshot();
        assert!(!controller.on_key_down(Key::Other(13)));
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_navigation_order_flattens_classes() {
        let controller = loaded(&[2, 1]);
        let order: Vec<String> = controller
            .navigation_order()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(order, vec!["1_1", "1_2", "2_1"]);
    }
}
