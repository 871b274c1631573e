use std::path::PathBuf;

use docnav::check::{self, ContractIssue};
use docnav::outline::Outline;
use docnav::page;
use docnav::{Key, MemberId, NavigationController};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn loaded_page(name: &str) -> NavigationController {
    let document = page::load_page(&data_dir().join(name)).expect("page should load");
    let mut controller = NavigationController::new(document);
    controller.on_load();
    controller
}

#[test]
fn test_page_down_visits_every_member_then_stops() {
    let mut controller = loaded_page("bindings.html");

    let mut visited = vec![controller.member_selection().to_string()];
    for _ in 0..3 {
        controller.on_key_down(Key::PageDown);
        visited.push(controller.member_selection().to_string());
    }

    assert_eq!(visited, vec!["1_1", "1_2", "2_1", "2_1"]);
}

#[test]
fn test_page_up_returns_to_last_member_of_previous_class() {
    let mut controller = loaded_page("bindings.html");
    controller.activate_initial(2);

    controller.on_key_down(Key::PageUp);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.class_selection, 1);
    assert_eq!(snapshot.member_selection, MemberId::new(1, 2));
    assert_eq!(snapshot.active_classes, vec!["nav_1"]);
    assert_eq!(snapshot.active_members, vec!["nav_1_2"]);
    assert_eq!(snapshot.visible_member_lists, vec!["list_1"]);
    assert_eq!(snapshot.visible_class_descriptions, vec!["description_1"]);
    assert_eq!(snapshot.visible_member_descriptions, vec!["description_1_2"]);
}

#[test]
fn test_outline_and_page_navigate_identically() {
    let outline = Outline::load(data_dir().join("docnav.toml")).expect("outline should load");
    let mut from_outline = NavigationController::new(outline.to_document());
    from_outline.on_load();
    let mut from_page = loaded_page("bindings.html");

    assert_eq!(
        from_outline.last_index_table(),
        from_page.last_index_table()
    );
    assert_eq!(
        from_outline.navigation_order(),
        from_page.navigation_order()
    );

    for key in [Key::PageDown, Key::PageDown, Key::PageUp, Key::Other(40)] {
        from_outline.on_key_down(key);
        from_page.on_key_down(key);
        assert_eq!(from_outline.snapshot(), from_page.snapshot());
    }
}

#[test]
fn test_outline_save_and_load() {
    let outline = Outline::load(data_dir().join("docnav.toml")).expect("outline should load");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("docnav.toml");
    outline.save(&path).expect("outline should save");

    let reloaded = Outline::load(&path).expect("saved outline should load");
    assert_eq!(reloaded, outline);
}

#[test]
fn test_check_reports_contract_issues() {
    let pages = check::discover_pages(&data_dir());
    let names: Vec<_> = pages
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["bindings.html", "broken.html"]);

    let reports = check::check_pages(&pages);
    let clean = reports[0].as_ref().expect("bindings.html should load");
    assert!(clean.is_clean(), "unexpected issues: {:?}", clean.issues);
    assert_eq!(clean.classes, 2);
    assert_eq!(clean.members, 3);

    let broken = reports[1].as_ref().expect("broken.html should load");
    assert!(broken
        .issues
        .contains(&ContractIssue::MissingMember(MemberId::new(1, 2))));
    assert!(broken
        .issues
        .contains(&ContractIssue::MisplacedConstructor(MemberId::new(1, 3))));
}

#[test]
fn test_check_empty_page_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.html");
    std::fs::write(&path, "<html><body></body></html>").expect("write page");

    let result = check::check_page(&path);
    assert!(matches!(result, Err(page::PageError::NoNavigation { .. })));
}
