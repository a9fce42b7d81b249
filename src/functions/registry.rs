use crate::model::{BlockId, BlockKind, Workspace};

/// Find a function's definition block by name, case-insensitive. Definitions
/// are never nested, so only top-level blocks are scanned; on a (transient,
/// invalid) name collision the first match in document order wins.
pub fn find_definition(workspace: &Workspace, name: &str) -> Option<BlockId> {
    let wanted = name.to_lowercase();
    workspace
        .top_level_blocks()
        .find(|block| match &block.kind {
            BlockKind::Definition { signature, .. } => signature.name.to_lowercase() == wanted,
            _ => false,
        })
        .map(|block| block.id)
}

/// Find every caller of a function, across all scopes of the document.
/// A half-constructed call whose name is still empty is skipped, never an
/// error.
pub fn find_callers(workspace: &Workspace, name: &str) -> Vec<BlockId> {
    let wanted = name.to_lowercase();
    workspace
        .blocks
        .iter()
        .filter(|block| match &block.kind {
            BlockKind::Call { signature, .. } => {
                !signature.name.is_empty() && signature.name.to_lowercase() == wanted
            }
            _ => false,
        })
        .map(|block| block.id)
        .collect()
}

/// All top-level definition blocks, in document order.
pub fn all_definitions(workspace: &Workspace) -> Vec<BlockId> {
    workspace
        .top_level_blocks()
        .filter(|block| matches!(block.kind, BlockKind::Definition { .. }))
        .map(|block| block.id)
        .collect()
}
