//! Filter tests
//!
//! The visible projection must be exactly the subsequence of the backing
//! layers owned by the filtered actor, in backing order.

use picture_layer_edit::{Noop, PictureListEditState};
use pretty_assertions::assert_eq;

use super::{create_test_state, id_of, layer, names, visible_names};

#[test]
fn test_no_filter_shows_everything() {
    let state = create_test_state();
    assert_eq!(visible_names(&state), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_filter_is_the_backing_subsequence() {
    let mut state = PictureListEditState::from_layers(vec![
        layer("a1", 1, &[]),
        layer("b1", 2, &[]),
        layer("a2", 1, &[]),
        layer("c1", 3, &[]),
        layer("b2", 2, &[]),
        layer("a3", 1, &[]),
    ]);

    for actor_id in 0..5 {
        state.set_filter(actor_id);
        let expected: Vec<&str> = state
            .layers()
            .iter()
            .filter(|layer| layer.actor_id == actor_id)
            .map(|layer| layer.name.as_str())
            .collect();
        assert_eq!(visible_names(&state), expected, "actor {actor_id}");
    }
}

#[test]
fn test_filter_does_not_touch_backing_layers() {
    let mut state = create_test_state();
    let before = state.layers().to_vec();

    state.set_filter(2);
    state.clear_filter();
    state.set_filter(7);

    assert_eq!(state.layers(), before.as_slice());
    assert!(visible_names(&state).is_empty());
}

#[test]
fn test_apply_filter_parses_text() {
    let mut state = create_test_state();

    assert!(state.apply_filter(" 02 ").is_applied());
    assert_eq!(state.filter(), Some(2));
    assert_eq!(visible_names(&state), vec!["B", "D"]);
}

#[test]
fn test_apply_blank_filter_is_ignored() {
    let mut state = create_test_state();
    state.set_filter(1);

    assert_eq!(state.apply_filter("  ").noop(), Some(&Noop::BlankValue));
    assert_eq!(state.filter(), Some(1));
}

#[test]
fn test_apply_non_numeric_filter_is_ignored() {
    let mut state = create_test_state();

    let outcome = state.apply_filter("hero");

    assert_eq!(outcome.noop(), Some(&Noop::InvalidNumber("hero".into())));
    assert_eq!(state.filter(), None);
}

#[test]
fn test_changing_filter_clears_selection() {
    let mut state = create_test_state();
    let _ = state.toggle_select(id_of(&state, "A"), true);

    state.set_filter(1);
    assert_eq!(state.selected_count(), 0);

    let _ = state.toggle_select(id_of(&state, "C"), true);
    state.clear_filter();
    assert_eq!(state.selected_count(), 0);
}

#[test]
fn test_visible_row_to_id() {
    let mut state = create_test_state();
    state.set_filter(2);

    assert_eq!(state.visible_row_to_id(0), Some(id_of(&state, "B")));
    assert_eq!(state.visible_row_to_id(1), Some(id_of(&state, "D")));
    assert_eq!(state.visible_row_to_id(2), None);
    assert!(!state.is_visible(id_of(&state, "A")));
}

#[test]
fn test_edits_under_filter_reach_backing_layers() {
    let mut state = create_test_state();
    state.set_filter(2);

    let id = state.visible_row_to_id(1).unwrap();
    assert!(state.add_file(id).is_applied());
    state.clear_filter();

    assert_eq!(state.layer(id_of(&state, "D")).unwrap().file_list.len(), 1);
    assert_eq!(names(&state), vec!["A", "B", "C", "D"]);
}
