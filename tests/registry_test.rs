use blockfunc::functions::registry;
use blockfunc::model::builder::WorkspaceBuilder;
use blockfunc::model::signature::{ArgType, Signature};
use blockfunc::model::{Block, BlockKind, Position, Workspace};

#[test]
fn test_find_definition_is_case_insensitive() {
    let signature = Signature::new("doStuff").arg("a", ArgType::Number);
    let workspace = WorkspaceBuilder::new("registry")
        .definition(signature)
        .build()
        .build();

    let found = registry::find_definition(&workspace, "DOSTUFF");
    assert!(found.is_some());
    assert_eq!(found, registry::find_definition(&workspace, "doStuff"));
    assert_eq!(registry::find_definition(&workspace, "other"), None);
}

#[test]
fn test_find_definition_scans_top_level_only() {
    // A definition buried inside another block is not a real definition;
    // the scan must not see it.
    let mut workspace = Workspace::new("registry");
    let inner = workspace.add_block(Block::definition(
        Signature::new("hidden"),
        Position::default(),
    ));
    let mut wrapper = Block::plain("wrapper");
    if let BlockKind::Plain { children, .. } = &mut wrapper.kind {
        children.push(inner);
    }
    workspace.add_top_level(wrapper);

    assert_eq!(registry::find_definition(&workspace, "hidden"), None);
}

#[test]
fn test_find_definition_first_match_wins() {
    // Two same-named definitions are invalid but can exist transiently.
    let mut workspace = Workspace::new("registry");
    let first = workspace.add_top_level(Block::definition(
        Signature::new("twice"),
        Position::new(0, 0),
    ));
    workspace.add_top_level(Block::definition(
        Signature::new("Twice"),
        Position::new(0, 100),
    ));

    assert_eq!(registry::find_definition(&workspace, "twice"), Some(first));
}

#[test]
fn test_find_callers_across_scopes() {
    let helper = Signature::new("helper").arg("a", ArgType::Number);
    let outer = Signature::new("outer");

    let mut workspace = WorkspaceBuilder::new("registry")
        .definition(helper.clone())
        .build()
        .definition(outer)
        .statement("control_repeat")
        .build()
        .build();

    // 在 repeat 语句里嵌一个调用
    let nested_call = workspace.add_block(Block::call(&helper, Position::default()));
    let repeat = workspace
        .blocks
        .iter()
        .find(|b| matches!(&b.kind, BlockKind::Plain { opcode, .. } if opcode == "control_repeat"))
        .map(|b| b.id)
        .expect("repeat statement missing");
    if let Some(block) = workspace.block_mut(repeat) {
        if let BlockKind::Plain { children, .. } = &mut block.kind {
            children.push(nested_call);
        }
    }

    // Plus one at top level.
    let top_call = workspace.add_top_level(Block::call(&helper, Position::new(0, 300)));

    let callers = registry::find_callers(&workspace, "HELPER");
    assert_eq!(callers.len(), 2);
    assert!(callers.contains(&nested_call));
    assert!(callers.contains(&top_call));
}

#[test]
fn test_find_callers_skips_unresolved_calls() {
    let mut workspace = Workspace::new("registry");
    workspace.add_top_level(Block::call(&Signature::new(""), Position::default()));

    assert!(registry::find_callers(&workspace, "").is_empty());
    assert!(registry::find_callers(&workspace, "anything").is_empty());
}

#[test]
fn test_all_definitions_in_document_order() {
    let first = Signature::new("first");
    let second = Signature::new("second");
    let workspace = WorkspaceBuilder::new("registry")
        .definition(first)
        .build()
        .call(&Signature::new("first"))
        .build()
        .definition(second)
        .build()
        .build();

    let definitions = registry::all_definitions(&workspace);
    assert_eq!(definitions.len(), 2);

    let names: Vec<String> = definitions
        .iter()
        .filter_map(|id| workspace.block(*id))
        .filter_map(|b| b.signature())
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
}
