//! Integration tests for TestHarness.
//!
//! Drives full placement sessions headlessly: add, stack, move, duplicate,
//! courses and layout persistence.

use assise_gui_lib::harness::TestHarness;
use assise_gui_lib::input::EditorKey;
use assise_gui_lib::state::{ClickOutcome, Mode, ToolKind};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn position(h: &TestHarness, id: u64) -> [f64; 3] {
    h.state.element(id).unwrap().transform.position
}

#[test]
fn test_harness_place_on_ground() {
    let mut h = TestHarness::new();
    h.tool(ToolKind::Add).unwrap();
    assert_eq!(h.mode(), Mode::AddIdle);

    // Hovering never shows the add ghost
    assert!(!h.hover_ground(10.0, 10.0));
    assert_eq!(h.ghost_position(), None);

    assert_eq!(h.click_ground(10.0, 4.0).unwrap(), ClickOutcome::GhostPlaced);
    assert_eq!(h.mode(), Mode::AddPositioning);
    let ghost = h.ghost_position().unwrap();
    // M50: 19 x 5 x 9, joint 1.2
    assert!(close(ghost.x, 9.6));
    assert!(close(ghost.y, 3.7));
    assert!(close(ghost.z, 3.6));

    let id = h.state.confirm_add().unwrap();
    assert_eq!(h.element_count(), 1);
    assert_eq!(h.mode(), Mode::AddIdle);
    assert_eq!(position(&h, id), [ghost.x, ghost.y, ghost.z]);
}

#[test]
fn test_harness_stack_elements() {
    let mut h = TestHarness::new();
    let below = h.place_at(0.0, 0.0).unwrap();
    h.click_at(0.0, 0.0).unwrap();
    let above = h.state.confirm_add().unwrap();

    let bottom_top = position(&h, below)[1] + 2.5;
    let upper_bottom = position(&h, above)[1] - 2.5;
    assert!(close(upper_bottom - bottom_top, 1.2));
    assert_eq!(h.element_count(), 2);
}

#[test]
fn test_harness_courses_snap_vertically() {
    let mut h = TestHarness::new();
    let course = h.state.create_course().unwrap();
    assert_eq!(h.state.courses().active_id(), course);
    assert!(close(h.state.courses().active_height().unwrap(), 6.2));

    let first = h.place_at(0.0, 0.0).unwrap();
    assert!(close(position(&h, first)[1], 2.5));

    h.click_at(0.0, 0.0).unwrap();
    let second = h.state.confirm_add().unwrap();
    assert!(close(position(&h, second)[1], 6.2 + 2.5));

    // Same height again is refused
    assert!(h.state.create_course().is_err());
}

#[test]
fn test_harness_positioning_keys() {
    let mut h = TestHarness::new();
    h.state.create_course().unwrap();
    h.tool(ToolKind::Add).unwrap();
    h.click_ground(0.0, 0.0).unwrap();

    assert!(h.key(EditorKey::PageUp).unwrap());
    assert!(close(h.ghost_position().unwrap().y, 6.2 + 2.5));
    assert!(h.key(EditorKey::PageDown).unwrap());
    assert!(h.key(EditorKey::PageDown).unwrap());
    assert!(close(h.ghost_position().unwrap().y, 2.5));

    assert!(h.key(EditorKey::ArrowRight).unwrap());
    assert!(h.key(EditorKey::Char('s')).unwrap());
    let ghost = h.ghost_position().unwrap();
    assert!(close(ghost.x, 1.0));
    assert!(close(ghost.z, 1.0));

    assert!(h.key(EditorKey::Enter).unwrap());
    assert_eq!(h.element_count(), 1);
    assert_eq!(h.mode(), Mode::AddIdle);
}

#[test]
fn test_harness_escape_cancels_add() {
    let mut h = TestHarness::new();
    h.tool(ToolKind::Add).unwrap();
    h.click_ground(0.0, 0.0).unwrap();
    h.key(EditorKey::Escape).unwrap();
    assert_eq!(h.mode(), Mode::AddIdle);
    assert_eq!(h.ghost_position(), None);
    assert_eq!(h.element_count(), 0);
}

#[test]
fn test_harness_move_flow() {
    let mut h = TestHarness::new();
    let id = h.place_at(0.0, 0.0).unwrap();
    h.tool(ToolKind::Select).unwrap();
    h.click_element(id).unwrap();

    h.state.toolbar_action(ToolKind::Move).unwrap();
    assert_eq!(h.mode(), Mode::MovePositioning);
    assert_eq!(h.state.hidden_element(), Some(id));
    assert!(!h.state.navigation_enabled());

    // The moved element is not a surface for itself
    assert!(h.hover_at(50.0, 0.0));
    let ghost = h.ghost_position().unwrap();
    assert!(close(ghost.x, 50.4));
    assert!(close(ghost.y, 3.7));

    h.state.confirm().unwrap();
    assert_eq!(h.mode(), Mode::Select);
    assert_eq!(h.state.hidden_element(), None);
    assert!(close(position(&h, id)[0], 50.4));
    assert_eq!(h.element_count(), 1);
}

#[test]
fn test_harness_move_cancel_restores_pose() {
    let mut h = TestHarness::new();
    let id = h.place_at(12.0, 0.0).unwrap();
    let before = position(&h, id);
    h.tool(ToolKind::Select).unwrap();
    h.click_element(id).unwrap();
    h.state.toolbar_action(ToolKind::Move).unwrap();
    h.hover_ground(80.0, 80.0);

    h.key(EditorKey::Escape).unwrap();
    assert_eq!(h.mode(), Mode::Select);
    assert_eq!(position(&h, id), before);
}

#[test]
fn test_harness_duplicate_flow() {
    let mut h = TestHarness::new();
    let id = h.place_at(0.0, 0.0).unwrap();
    h.tool(ToolKind::Select).unwrap();
    h.click_element(id).unwrap();

    h.state.toolbar_action(ToolKind::Duplicate).unwrap();
    assert_eq!(h.mode(), Mode::Duplicate);
    let seeded = h.ghost_position().unwrap();
    assert!(close(seeded.x, 10.0));

    let outcome = h.click_ground(30.0, 0.0).unwrap();
    let ClickOutcome::Duplicated(copy) = outcome else {
        panic!("expected a duplicate, got {outcome:?}");
    };
    assert_ne!(copy, id);
    assert_eq!(h.element_count(), 2);
    assert_eq!(h.state.selection(), Some(copy));
    assert_eq!(h.mode(), Mode::Select);
    assert!(close(position(&h, copy)[0], 30.0));
    assert_eq!(
        h.state.element(copy).unwrap().kind,
        h.state.element(id).unwrap().kind
    );
}

#[test]
fn test_harness_duplicate_without_selection_reverts() {
    let mut h = TestHarness::new();
    h.place_at(0.0, 0.0).unwrap();
    h.tool(ToolKind::Duplicate).unwrap();
    assert_eq!(h.ghost_position(), None);
    assert_eq!(h.click_ground(40.0, 0.0).unwrap(), ClickOutcome::RevertedToSelect);
    assert_eq!(h.mode(), Mode::Select);
    assert_eq!(h.element_count(), 1);
}

#[test]
fn test_harness_rotate_and_delete() {
    let mut h = TestHarness::new();
    let id = h.place_at(0.0, 0.0).unwrap();
    h.tool(ToolKind::Select).unwrap();
    h.click_element(id).unwrap();

    h.state.toolbar_action(ToolKind::Rotate).unwrap();
    let rotation = h.state.element(id).unwrap().transform.rotation_y;
    assert!(close(rotation, std::f64::consts::FRAC_PI_4));
    assert_eq!(h.mode(), Mode::Select);

    h.key(EditorKey::Delete).unwrap();
    assert_eq!(h.element_count(), 0);
    assert_eq!(h.state.selection(), None);
}

#[test]
fn test_harness_context_menu_actions() {
    use assise_gui_lib::state::ContextAction;

    let mut h = TestHarness::new();
    let id = h.place_at(0.0, 0.0).unwrap();
    h.tool(ToolKind::Select).unwrap();
    h.long_press(id, 1.0);
    assert!(h.state.context_menu().is_some());

    h.state.context_menu_action(ContextAction::Move).unwrap();
    assert!(h.state.context_menu().is_none());
    assert_eq!(h.mode(), Mode::MovePositioning);
    h.state.cancel().unwrap();

    h.long_press(id, 1.0);
    h.state.context_menu_action(ContextAction::Delete).unwrap();
    assert_eq!(h.element_count(), 0);
}

#[test]
fn test_harness_long_press_ignored_outside_select() {
    let mut h = TestHarness::new();
    let id = h.place_at(0.0, 0.0).unwrap();
    h.long_press(id, 1.0);
    assert!(h.state.context_menu().is_none());
}

#[test]
fn test_harness_custom_element() {
    let mut h = TestHarness::new();
    h.state.choose_type("CUSTOM").unwrap();
    {
        let inputs = h.state.custom_inputs_mut();
        inputs.name = "Linteau".into();
        inputs.width = "2*50".into();
        inputs.height = "20".into();
        inputs.depth = "10".into();
    }
    let id = h.place_at(0.0, 0.0).unwrap();
    let element = h.state.element(id).unwrap();
    assert!(element.kind.is_custom());
    assert!(close(element.transform.position[1], 1.2 + 10.0));

    let json = h.export_layout_json();
    let mut h2 = TestHarness::new();
    assert_eq!(h2.load_layout_json(&json).unwrap(), 1);
    assert_eq!(h2.state.element(id).unwrap().kind, h.state.element(id).unwrap().kind);
}

#[test]
fn test_harness_load_export_json() {
    let mut h = TestHarness::new();
    h.state.create_course().unwrap();
    let a = h.place_at(0.0, 0.0).unwrap();
    let b = h.place_at(60.0, 0.0).unwrap();
    let json = h.export_layout_json();

    let mut h2 = TestHarness::new();
    assert_eq!(h2.load_layout_json(&json).unwrap(), 2);
    assert_eq!(h2.element_count(), 2);
    assert_eq!(position(&h2, a), position(&h, a));
    assert_eq!(position(&h2, b), position(&h, b));
    assert_eq!(h2.state.courses().active_id(), h.state.courses().active_id());
    assert!(h2.state.next_id() > b);

    assert!(h2.load_layout_json("not json").is_err());
    assert_eq!(h2.element_count(), 2);
}
