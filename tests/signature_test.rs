use blockfunc::model::signature::{ArgType, Signature};
use serde_json::json;

#[test]
fn test_identity_maps_round_trip() {
    let signature = Signature::new("doStuff")
        .arg("a", ArgType::Number)
        .arg("b", ArgType::Text);

    let by_name = signature.name_to_id();
    let by_id = signature.id_to_name();

    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name.get("a"), Some(&signature.args[0].id));
    assert_eq!(by_name.get("b"), Some(&signature.args[1].id));

    // 两张映射互为逆
    assert_eq!(by_id.get(&signature.args[0].id), Some(&"a".to_string()));
    assert_eq!(by_id.get(&signature.args[1].id), Some(&"b".to_string()));
}

#[test]
fn test_payload_round_trip_preserves_everything() {
    let signature = Signature::new("doStuff")
        .arg("speed", ArgType::Number)
        .arg("label", ArgType::Text)
        .arg("loop", ArgType::Boolean);

    let payload = signature.to_payload().expect("Failed to serialize payload");
    let restored = Signature::from_payload(&payload).expect("Failed to parse payload");

    assert_eq!(restored, signature);
    assert_eq!(restored.function_id, signature.function_id);
    assert_eq!(restored.args[0].id, signature.args[0].id);
}

#[test]
fn test_payload_shape() {
    let signature = Signature::new("doStuff")
        .arg("a", ArgType::Number)
        .arg("b", ArgType::Text);

    let payload = signature.to_payload().expect("Failed to serialize payload");
    let value: serde_json::Value =
        serde_json::from_str(&payload).expect("Payload should be valid JSON");

    // 根节点携带 name 和 functionid
    assert_eq!(value["name"], json!("doStuff"));
    assert_eq!(value["functionid"], json!(signature.function_id.to_string()));

    // 每个参数携带 id / name / type，顺序与签名一致
    let args = value["args"].as_array().expect("args should be an array");
    assert_eq!(args.len(), 2);
    assert_eq!(args[0]["name"], json!("a"));
    assert_eq!(args[0]["type"], json!("number"));
    assert_eq!(args[0]["id"], json!(signature.args[0].id.to_string()));
    assert_eq!(args[1]["name"], json!("b"));
    assert_eq!(args[1]["type"], json!("string"));
}

#[test]
fn test_arg_type_wire_names() {
    let signature = Signature::new("typed")
        .arg("flag", ArgType::Boolean)
        .arg("count", ArgType::Number)
        .arg("message", ArgType::Text)
        .arg("target", ArgType::Custom("Sprite".to_string()));

    let payload = signature.to_payload().expect("Failed to serialize payload");
    let restored = Signature::from_payload(&payload).expect("Failed to parse payload");

    assert_eq!(restored.args[0].ty, ArgType::Boolean);
    assert_eq!(restored.args[1].ty, ArgType::Number);
    assert_eq!(restored.args[2].ty, ArgType::Text);
    assert_eq!(restored.args[3].ty, ArgType::Custom("Sprite".to_string()));

    let value: serde_json::Value =
        serde_json::from_str(&payload).expect("Payload should be valid JSON");
    assert_eq!(value["args"][0]["type"], json!("boolean"));
    assert_eq!(value["args"][2]["type"], json!("string"));
    assert_eq!(value["args"][3]["type"], json!("Sprite"));
}

#[test]
fn test_from_payload_rejects_garbage() {
    assert!(Signature::from_payload("not json at all").is_err());
    assert!(Signature::from_payload("{\"name\": \"missing the rest\"}").is_err());
}

#[test]
fn test_display_format() {
    let empty = Signature::new("doStuff");
    assert_eq!(empty.to_string(), "doStuff()");

    let full = Signature::new("doStuff")
        .arg("a", ArgType::Number)
        .arg("b", ArgType::Text);
    assert_eq!(full.to_string(), "doStuff(a: number, b: string)");
}
