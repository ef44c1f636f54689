//! Tests for file operations (add, delete, move, split, layer variable id)

use picture_layer_edit::{FileField, HostNumber, LayerId, MoveDirection, Noop, PictureFile, PictureListEditState};
use pretty_assertions::assert_eq;

use super::{create_test_state, file_names, id_of, layer, names};

// ============================================================================
// Add / Delete / Move
// ============================================================================

#[test]
fn test_add_file_appends_default_file() {
    let mut state = create_test_state();
    let c = id_of(&state, "C");

    assert_eq!(state.add_file(c).applied(), Some(0));
    assert_eq!(state.add_file(c).applied(), Some(1));

    let files = &state.layer(c).unwrap().file_list;
    assert_eq!(files[0], PictureFile::default());
    assert_eq!(files[0].file_name, "");
    assert_eq!(files[0].input_skill_type, 1);
}

#[test]
fn test_add_file_to_unknown_layer_is_ignored() {
    let mut state = create_test_state();
    let unknown = LayerId::next();
    assert_eq!(state.add_file(unknown).noop(), Some(&Noop::UnknownLayer(unknown)));
}

#[test]
fn test_delete_file() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    let removed = state.delete_file(a, 1).applied().unwrap();

    assert_eq!(removed.file_name, "a/two");
    assert_eq!(file_names(&state, a), vec!["a/one", "a/three"]);
}

#[test]
fn test_delete_file_out_of_range_is_ignored() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    let outcome = state.delete_file(a, 3);

    assert_eq!(outcome.noop(), Some(&Noop::FileIndexOutOfRange { layer: a, index: 3, len: 3 }));
    assert_eq!(file_names(&state, a), vec!["a/one", "a/two", "a/three"]);
}

#[test]
fn test_move_file() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    assert!(state.move_file(a, 0, MoveDirection::Down).is_applied());
    assert_eq!(file_names(&state, a), vec!["a/two", "a/one", "a/three"]);

    assert!(state.move_file(a, 2, MoveDirection::Up).is_applied());
    assert_eq!(file_names(&state, a), vec!["a/two", "a/three", "a/one"]);
}

#[test]
fn test_move_file_at_boundary_is_noop() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    assert_eq!(state.move_file(a, 0, MoveDirection::Up).noop(), Some(&Noop::AtBoundary));
    assert_eq!(state.move_file(a, 2, MoveDirection::Down).noop(), Some(&Noop::AtBoundary));
    assert_eq!(file_names(&state, a), vec!["a/one", "a/two", "a/three"]);
}

// ============================================================================
// Split
// ============================================================================

#[test]
fn test_split_file_to_new_layer() {
    let mut source = layer("A", 1, &["a/one", "a/two", "a/three"]);
    source.opacity = HostNumber::from(200);
    source.mirror_switch = 9;
    let mut state = PictureListEditState::from_layers(vec![source, layer("B", 2, &[])]);
    let a = id_of(&state, "A");

    let new_id = state.split_file_to_new_layer(a, 1).applied().unwrap();

    assert_eq!(file_names(&state, a), vec!["a/one", "a/three"]);
    assert_eq!(names(&state), vec!["A", "B", "A_two"]);
    assert_eq!(state.position(new_id), Some(2));

    let split = state.layer(new_id).unwrap();
    assert_eq!(file_names(&state, new_id), vec!["a/two"]);
    assert_eq!(split.actor_id, 1);
    assert_eq!(split.opacity.value(), 200.0);
    assert_eq!(split.mirror_switch, 9);
    assert_ne!(new_id, a);
}

#[test]
fn test_split_from_unnamed_layer_uses_segment() {
    let mut state = PictureListEditState::from_layers(vec![layer("", 1, &["child/misaki/emotion/joy", ""])]);
    let id = state.layers()[0].id();

    let joy = state.split_file_to_new_layer(id, 0).applied().unwrap();
    assert_eq!(state.layer(joy).unwrap().name, "joy");

    let unnamed = state.split_file_to_new_layer(id, 0).applied().unwrap();
    assert_eq!(state.layer(unnamed).unwrap().name, "Split");
    assert_eq!(file_names(&state, unnamed), vec![""]);
    assert!(state.layer(id).unwrap().file_list.is_empty());
}

#[test]
fn test_split_out_of_range_is_ignored() {
    let mut state = create_test_state();
    let c = id_of(&state, "C");

    assert!(!state.split_file_to_new_layer(c, 0).is_applied());
    assert_eq!(state.len(), 4);
}

// ============================================================================
// Layer variable id
// ============================================================================

#[test]
fn test_set_layer_variable_id_sets_every_file() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    assert_eq!(state.set_layer_variable_id(a, "12").applied(), Some(3));

    assert!(state.layer(a).unwrap().file_list.iter().all(|file| file.variable == 12));
    assert_eq!(state.layer_variable_id(a), Some(12));
}

#[test]
fn test_layer_variable_id_reads_first_file() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");
    let _ = state.update_file_field(a, 1, FileField::Variable, "5");

    assert_eq!(state.layer_variable_id(a), Some(0));
    let _ = state.move_file(a, 1, MoveDirection::Up);
    assert_eq!(state.layer_variable_id(a), Some(5));
}

#[test]
fn test_layer_without_files_has_variable_id_zero() {
    let mut state = create_test_state();
    let c = id_of(&state, "C");

    assert_eq!(state.layer_variable_id(c), Some(0));
    assert_eq!(state.set_layer_variable_id(c, "4").noop(), Some(&Noop::NoFiles(c)));
    assert_eq!(state.layer_variable_id(LayerId::next()), None);
}

#[test]
fn test_set_layer_variable_id_rejects_text() {
    let mut state = create_test_state();
    let a = id_of(&state, "A");

    assert_eq!(state.set_layer_variable_id(a, "x").noop(), Some(&Noop::InvalidNumber("x".into())));
    assert_eq!(state.layer_variable_id(a), Some(0));
}
