//! Image browser tests

use picture_layer_edit::{ImageListing, ImageTarget, LayerId, Noop, PictureListEditState};
use pretty_assertions::assert_eq;

use super::{create_test_state, file_names, id_of, names};

fn with_images(mut state: PictureListEditState) -> PictureListEditState {
    let listing = ImageListing::new(["hikari/normal.png", "onne/shy.png", "child/body.png", "hikari/niya.png"]);
    let count = state.scan_available_images(&listing).unwrap();
    assert_eq!(count, 4);
    state
}

#[test]
fn test_scan_lists_sorted_paths_without_extension() {
    let state = with_images(create_test_state());
    assert_eq!(state.available_images(), ["child/body", "hikari/niya", "hikari/normal", "onne/shy"]);
}

#[test]
fn test_toggle_image_selection() {
    let mut state = with_images(create_test_state());

    assert_eq!(state.toggle_image_selection("onne/shy").applied(), Some(true));
    assert_eq!(state.toggle_image_selection("child/body").applied(), Some(true));
    assert_eq!(state.selected_images().collect::<Vec<_>>(), vec!["child/body", "onne/shy"]);

    assert_eq!(state.toggle_image_selection("onne/shy").applied(), Some(false));
    assert_eq!(state.selected_image_count(), 1);

    state.clear_image_selection();
    assert_eq!(state.selected_image_count(), 0);
}

#[test]
fn test_unknown_image_cannot_be_selected() {
    let mut state = with_images(create_test_state());
    assert_eq!(
        state.toggle_image_selection("onne/shy.png").noop(),
        Some(&Noop::UnknownImage("onne/shy.png".into()))
    );
}

#[test]
fn test_rescan_drops_missing_selections() {
    let mut state = with_images(create_test_state());
    let _ = state.toggle_image_selection("onne/shy");
    let _ = state.toggle_image_selection("hikari/niya");

    state.scan_available_images(&ImageListing::new(["hikari/niya.png"])).unwrap();

    assert_eq!(state.selected_images().collect::<Vec<_>>(), vec!["hikari/niya"]);
}

#[test]
fn test_add_selected_images_to_new_layer() {
    let mut state = with_images(create_test_state());
    state.set_filter(2);
    let _ = state.toggle_image_selection("onne/shy");
    let _ = state.toggle_image_selection("hikari/normal");

    let id = state.add_selected_images_to_layer(ImageTarget::NewLayer).applied().unwrap();

    assert_eq!(names(&state), vec!["A", "B", "C", "D", "New Layer"]);
    assert_eq!(state.layer(id).unwrap().actor_id, 2);
    assert_eq!(file_names(&state, id), vec!["hikari/normal", "onne/shy"]);
    assert_eq!(state.selected_image_count(), 0);

    let file = &state.layer(id).unwrap().file_list[0];
    assert_eq!(file.input_skill_type, 1);
}

#[test]
fn test_add_selected_images_to_existing_layer() {
    let mut state = with_images(create_test_state());
    let b = id_of(&state, "B");
    let _ = state.toggle_image_selection("child/body");

    assert_eq!(state.add_selected_images_to_layer(ImageTarget::Layer(b)).applied(), Some(b));

    assert_eq!(file_names(&state, b), vec!["b/one", "child/body"]);
    assert_eq!(state.len(), 4);
}

#[test]
fn test_add_without_selected_images_is_ignored() {
    let mut state = with_images(create_test_state());

    let outcome = state.add_selected_images_to_layer(ImageTarget::NewLayer);

    assert_eq!(outcome.noop(), Some(&Noop::NoImagesSelected));
    assert_eq!(state.len(), 4);
}

#[test]
fn test_add_to_unknown_layer_keeps_selection() {
    let mut state = with_images(create_test_state());
    let _ = state.toggle_image_selection("child/body");
    let unknown = LayerId::next();

    let outcome = state.add_selected_images_to_layer(ImageTarget::Layer(unknown));

    assert_eq!(outcome.noop(), Some(&Noop::UnknownLayer(unknown)));
    assert_eq!(state.selected_image_count(), 1);
}
