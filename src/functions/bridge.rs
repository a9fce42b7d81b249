use anyhow::Result;
use tracing::{debug, warn};

use crate::editor::events::EventKind;
use crate::editor::session::EditorSession;
use crate::functions::{propagate, registry};
use crate::model::{Block, BlockId, BlockKind, Position, Workspace};
use crate::model::signature::Signature;

/// Default name for a freshly created function, before the user renames it.
pub const DEFAULT_FUNCTION_NAME: &str = "doStuff";

/// Callback key the host binds to the flyout's create button.
pub const NEW_FUNCTION_CALLBACK_KEY: &str = "CREATE_FUNCTION";

pub const MAKE_FUNCTION_LABEL: &str = "Make a Function";
pub const EDIT_FUNCTION_LABEL: &str = "Edit Function";

/// Vertical gap between a new definition and the previous topmost block.
const DEFINITION_GAP: i64 = 40;

/// One element of the toolbox flyout's function category.
#[derive(Debug, Clone, PartialEq)]
pub enum FlyoutItem {
    /// The create button; the host binds `callback_key` to `create_function`.
    Button {
        label: String,
        callback_key: String,
    },
    /// An invocable entry carrying a function's full signature.
    FunctionCall { signature: Signature },
}

/// Populate the function category of the block palette: the create button
/// first, then one entry per existing definition in document order.
pub fn flyout_category(workspace: &Workspace) -> Vec<FlyoutItem> {
    let mut items = vec![FlyoutItem::Button {
        label: MAKE_FUNCTION_LABEL.to_string(),
        callback_key: NEW_FUNCTION_CALLBACK_KEY.to_string(),
    }];
    for def_id in registry::all_definitions(workspace) {
        if let Some(signature) = workspace.block(def_id).and_then(|b| b.signature()) {
            items.push(FlyoutItem::FunctionCall {
                signature: signature.clone(),
            });
        }
    }
    items
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    EditFunction { block: BlockId },
}

/// A context-menu entry with a bound action.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuOption {
    pub label: String,
    pub enabled: bool,
    pub action: MenuAction,
}

/// The "edit" context-menu entry for a block. Only definition and call
/// blocks offer one.
pub fn edit_option(block: &Block) -> Option<ContextMenuOption> {
    match block.kind {
        BlockKind::Definition { .. } | BlockKind::Call { .. } => Some(ContextMenuOption {
            label: EDIT_FUNCTION_LABEL.to_string(),
            enabled: true,
            action: MenuAction::EditFunction { block: block.id },
        }),
        _ => None,
    }
}

/// Entry point behind the create button. Synthesizes a fresh default
/// signature, hands it to the external editor, and on confirmation inserts
/// the new definition above the topmost block, focused, as one grouped step.
/// Returns None when the user cancels or the result fails validation.
pub fn create_function(session: &mut EditorSession) -> Option<BlockId> {
    session.clear_transient_ui();

    // Fresh identity, default name, no parameters.
    let draft = Signature::new(DEFAULT_FUNCTION_NAME);
    let confirmed = session.signature_editor().edit(&draft)?;

    if session.ensure_valid(&confirmed).is_err() {
        return None;
    }

    // Land the new definition a fixed gap above the current topmost block.
    let position = match session.workspace.topmost() {
        Some(top) => Position::new(top.position.x, top.position.y - DEFINITION_GAP),
        None => Position::default(),
    };

    session.journal.begin_group("create-function");
    let block_id = session
        .workspace
        .add_top_level(Block::definition(confirmed, position));
    session.journal.record(EventKind::BlockCreated { block: block_id });
    session.ui().focus_block(block_id);
    session.journal.end_group();

    debug!(block = %block_id, "Created function definition");
    Some(block_id)
}

/// Entry point behind the edit menu option, for a right-clicked definition
/// or call block. `source` may live outside the session's workspace (e.g. a
/// call sitting in a read-only preview pane); resolution always lands on the
/// definition inside the session workspace. Returns Ok(true) when a mutation
/// was propagated.
pub fn edit_function(session: &mut EditorSession, source: &Block) -> Result<bool> {
    let definition_id = match &source.kind {
        BlockKind::Definition { signature, .. } => {
            if session.workspace.contains(source.id) {
                Some(source.id)
            } else {
                registry::find_definition(&session.workspace, &signature.name)
            }
        }
        BlockKind::Call { signature, .. } => {
            registry::find_definition(&session.workspace, &signature.name)
        }
        _ => None,
    };
    let definition_id = match definition_id {
        Some(id) => id,
        None => {
            warn!(block = %source.id, "No matching definition to edit");
            return Ok(false);
        }
    };

    session.clear_transient_ui();

    let current = match session.workspace.block(definition_id).and_then(|b| b.signature()) {
        Some(signature) => signature.clone(),
        None => return Ok(false),
    };

    let confirmed = match session.signature_editor().edit(&current) {
        Some(signature) => signature,
        None => return Ok(false), // cancelled
    };

    if session.ensure_valid(&confirmed).is_err() {
        return Ok(false);
    }

    // The propagator looks the function up under its pre-edit name.
    propagate::mutate_callers_and_definition(
        &mut session.workspace,
        &mut session.journal,
        &mut session.repairs,
        &current.name,
        &confirmed,
    )
}
