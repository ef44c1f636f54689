use picture_layer_edit::{decode_layers, encode_layers, PictureListEditState, VariableOperator};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::host_text;

fn sample_text() -> String {
    host_text(vec![
        json!({
            "ActorId": "1",
            "Name": "Body",
            "Opacity": "255",
            "X": "-12", "Y": "40",
            "ScaleX": "100", "ScaleY": "100",
            "OutOfShake": "true",
            "FileList": [
                {"FileName": "child/body", "HpUpperLimit": "50", "HpLowerLimit": "0", "Inputting": "false",
                 "InputCommand": "", "InputSkillType": "1", "Action": "false", "Motion": "", "State": "0",
                 "Weapon": "0", "Armor": "0", "Scene": "", "Note": "base", "Message": "false", "Face": "false",
                 "Speaker": "true", "Switch": "3", "Variable": "7", "VariableType": "3", "VariableOperand": "2",
                 "Script": "$gameParty.gold() > 10"},
                {"FileName": "child/cloth/pajama", "Variable": "7"}
            ],
            "ShowPictureSwitch": "11", "UnFocusSwitch": "0", "MirrorSwitch": "4", "TouchSwitch": "0"
        }),
        json!({
            "ActorId": "2",
            "Name": "",
            "Opacity": "128",
            "FileList": []
        }),
    ])
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_load_add_file_export_scenario() {
    let mut state = PictureListEditState::new();
    let loaded = state.load(r#"["{\"Name\":\"A\",\"ActorId\":\"1\",\"FileList\":\"[]\"}"]"#).unwrap();
    assert_eq!(loaded.applied(), Some(1));

    let layer = &state.layers()[0];
    assert_eq!(layer.name, "A");
    assert_eq!(layer.actor_id, 1);
    assert!(layer.file_list.is_empty());

    let id = layer.id();
    assert_eq!(state.add_file(id).applied(), Some(0));

    let exported = state.export().unwrap();
    let decoded = decode_layers(&exported).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0], state.layers()[0]);
    assert_eq!(decoded[0].file_list.len(), 1);
    assert_eq!(decoded[0].file_list[0].file_name, "");
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_keeps_every_field() {
    let first = decode_layers(&sample_text()).unwrap();
    let second = decode_layers(&encode_layers(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_round_trip_regenerates_ids() {
    let first = decode_layers(&sample_text()).unwrap();
    let second = decode_layers(&encode_layers(&first).unwrap()).unwrap();
    for (a, b) in first.iter().zip(&second) {
        assert_ne!(a.id(), b.id());
    }
}

#[test]
fn test_decoded_values() {
    let layers = decode_layers(&sample_text()).unwrap();
    assert_eq!(layers.len(), 2);

    let body = &layers[0];
    assert_eq!(body.x.value(), -12.0);
    assert_eq!(body.y.value(), 40.0);
    assert!(body.out_of_shake);
    assert_eq!(body.show_picture_switch, 11);
    assert_eq!(body.mirror_switch, 4);
    assert_eq!(body.file_list.len(), 2);

    let file = &body.file_list[0];
    assert_eq!(file.file_name, "child/body");
    assert_eq!(file.hp_upper_limit, 50);
    assert!(file.speaker);
    assert_eq!(file.variable_type, VariableOperator::Greater);
    assert_eq!(file.variable_operand, 2);
    assert_eq!(file.script, "$gameParty.gold() > 10");

    // missing keys take the defaults
    let partial = &body.file_list[1];
    assert_eq!(partial.input_skill_type, 1);
    assert_eq!(partial.variable, 7);
    assert!(!partial.inputting);

    let second = &layers[1];
    assert_eq!(second.name, "");
    assert_eq!(second.opacity.value(), 128.0);
    assert_eq!(second.scale_x.value(), 100.0);
}

#[test]
fn test_unknown_fields_survive_round_trip() {
    let text = host_text(vec![json!({
        "Name": "A",
        "ActorId": "1",
        "Blend": "1",
        "FileList": [{"FileName": "a", "Tint": "red"}]
    })]);
    let layers = decode_layers(&text).unwrap();
    assert_eq!(layers[0].extra.get("Blend"), Some(&json!("1")));
    assert_eq!(layers[0].file_list[0].extra.get("Tint"), Some(&json!("red")));

    let again = decode_layers(&encode_layers(&layers).unwrap()).unwrap();
    assert_eq!(layers, again);
}
