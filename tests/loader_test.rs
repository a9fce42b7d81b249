use blockfunc::functions::registry;
use blockfunc::model::builder::WorkspaceBuilder;
use blockfunc::model::loader;
use blockfunc::model::signature::{ArgType, Signature};
use blockfunc::model::{Block, BlockKind, Position};
use std::fs;

#[test]
fn test_workspace_round_trips_through_yaml() {
    let signature = Signature::new("doStuff")
        .arg("a", ArgType::Number)
        .arg("b", ArgType::Text);
    let workspace = WorkspaceBuilder::new("round-trip")
        .variable("score")
        .definition(signature.clone())
        .statement_with_reporter("text_print", ArgType::Number, "a")
        .reporter(ArgType::Text, "b")
        .build()
        .call(&signature)
        .value("a", Block::plain("math_number"))
        .build()
        .build();

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("workspace.yaml");

    loader::save_workspace_to_yaml(&workspace, &file_path.to_string_lossy())
        .expect("Failed to save workspace");
    let loaded = loader::load_workspace_from_yaml(&file_path.to_string_lossy())
        .expect("Failed to load workspace");

    assert_eq!(loaded, workspace);

    // Cleanup
    temp_dir.close().expect("Failed to close temp dir");
}

#[test]
fn test_load_handwritten_yaml_workspace() {
    let yaml_content = r#"
id: "handwritten"
blocks:
  - id: "7c0f36a2-9d1e-4f5a-8b3c-2d4e6f8a0b1c"
    type: "Definition"
    signature:
      name: "greet"
      functionid: "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d"
      args:
        - id: "11111111-2222-4333-8444-555555555555"
          name: "who"
          type: "string"
    body: []
    position:
      x: 10
      y: 20
top_level:
  - "7c0f36a2-9d1e-4f5a-8b3c-2d4e6f8a0b1c"
variables: []
"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("handwritten.yaml");
    fs::write(&file_path, yaml_content).expect("Failed to write temp file");

    let workspace = loader::load_workspace_from_yaml(&file_path.to_string_lossy())
        .expect("Failed to load workspace from YAML");

    assert_eq!(workspace.id, "handwritten");
    assert_eq!(workspace.blocks.len(), 1);

    let definition = registry::find_definition(&workspace, "GREET")
        .and_then(|id| workspace.block(id))
        .expect("definition missing");
    assert_eq!(definition.position, Position::new(10, 20));
    if let BlockKind::Definition { signature, body } = &definition.kind {
        assert_eq!(signature.name, "greet");
        assert_eq!(signature.args.len(), 1);
        assert_eq!(signature.args[0].name, "who");
        assert_eq!(signature.args[0].ty, ArgType::Text);
        assert!(body.is_empty());
    } else {
        panic!("Block type mismatch");
    }

    temp_dir.close().expect("Failed to close temp dir");
}

#[test]
fn test_load_missing_file_fails_with_context() {
    let result = loader::load_workspace_from_yaml("/nonexistent/workspace.yaml");
    assert!(result.is_err());

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("/nonexistent/workspace.yaml"));
}
