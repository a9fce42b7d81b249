use anyhow::Result;
use tracing::{debug, warn};

use crate::editor::events::{EventJournal, EventKind};
use crate::editor::repair::{RepairQueue, RepairTask};
use crate::functions::registry;
use crate::model::{ArgSlot, BlockId, BlockKind, Workspace};
use crate::model::signature::Signature;

/// Group label stamped on every event of one whole signature mutation.
pub const MUTATION_GROUP: &str = "mutate-function";

/// Field name under which an argument reporter stores its display name.
pub const REPORTER_FIELD: &str = "VALUE";

/// Apply a new signature to a function's definition and every caller, then
/// repair the argument reporters inside the definition body.
///
/// `name` is the function's current (pre-edit) name; the new signature may
/// rename it. Returns Ok(false) when no definition by that name exists, in
/// which case nothing is mutated.
pub fn mutate_callers_and_definition(
    workspace: &mut Workspace,
    journal: &mut EventJournal,
    repairs: &mut RepairQueue,
    name: &str,
    new_signature: &Signature,
) -> Result<bool> {
    // 1. Locate the definition. Absence is non-fatal: the function may have
    //    been deleted while an edit dialog was open.
    let definition_id = match registry::find_definition(workspace, name) {
        Some(id) => id,
        None => {
            warn!(function = %name, "No definition found, skipping signature propagation");
            return Ok(false);
        }
    };

    // 2. Affected set: every caller plus the definition itself.
    let mut affected = registry::find_callers(workspace, name);
    affected.push(definition_id);
    debug!(function = %name, affected = affected.len(), "Propagating signature");

    // 3. One group spans the whole operation, error paths included.
    journal.begin_group(MUTATION_GROUP);
    let result = mutate_affected(
        workspace,
        journal,
        repairs,
        &affected,
        definition_id,
        new_signature,
    );
    journal.end_group();
    result?;

    Ok(true)
}

fn mutate_affected(
    workspace: &mut Workspace,
    journal: &mut EventJournal,
    repairs: &mut RepairQueue,
    affected: &[BlockId],
    definition_id: BlockId,
    new_signature: &Signature,
) -> Result<()> {
    let new_payload = new_signature.to_payload()?;

    for &block_id in affected {
        // 4. Snapshot the old signature before touching the block.
        let old_signature = match workspace.block(block_id).and_then(|b| b.signature()) {
            Some(signature) => signature.clone(),
            None => continue,
        };
        let old_payload = old_signature.to_payload()?;

        // 5. Swap in the new payload; callers also re-derive their slot shape.
        let orphans = apply_signature(workspace, block_id, new_signature);

        let changed = old_payload != new_payload;
        if changed {
            journal.record(EventKind::SignatureChanged {
                block: block_id,
                old: old_payload,
                new: new_payload.clone(),
            });
        }

        if block_id == definition_id {
            // 6. Relabel or destroy the reporters inside the definition body.
            repair_references(workspace, journal, definition_id, &old_signature, new_signature);
        } else if changed {
            // 7. A reshaped caller gets a deferred bump pass for anything it
            //    orphaned.
            repairs.schedule(RepairTask::BumpNeighbours {
                around: block_id,
                orphans,
            });
        }
    }

    Ok(())
}

/// Replace one block's signature. For callers the argument slots are rebuilt
/// keyed by parameter id; attached values whose parameter disappeared are
/// promoted to top level at the caller's position (the stale connection
/// point) and returned for the deferred bump pass.
fn apply_signature(
    workspace: &mut Workspace,
    block_id: BlockId,
    new_signature: &Signature,
) -> Vec<BlockId> {
    let stale_point = workspace
        .block(block_id)
        .map(|b| b.position)
        .unwrap_or_default();

    let mut orphans = Vec::new();
    if let Some(block) = workspace.block_mut(block_id) {
        match &mut block.kind {
            BlockKind::Definition { signature, .. } => {
                *signature = new_signature.clone();
            }
            BlockKind::Call { signature, args } => {
                let old_slots = std::mem::take(args);
                *args = new_signature
                    .args
                    .iter()
                    .map(|param| ArgSlot {
                        param_id: param.id,
                        value: old_slots
                            .iter()
                            .find(|slot| slot.param_id == param.id)
                            .and_then(|slot| slot.value),
                    })
                    .collect();
                for slot in &old_slots {
                    let survives = new_signature.args.iter().any(|p| p.id == slot.param_id);
                    if !survives {
                        if let Some(value) = slot.value {
                            orphans.push(value);
                        }
                    }
                }
                *signature = new_signature.clone();
            }
            // Only definition and call blocks carry signatures.
            BlockKind::ArgumentReporter { .. } | BlockKind::Plain { .. } => {}
        }
    }

    for &orphan in &orphans {
        workspace.promote_to_top_level(orphan, stale_point);
    }

    orphans
}

/// Reference repair inside the definition body. Resolution goes strictly
/// through stable ids (old name -> id -> new name), never name to name, so an
/// id-preserving rename survives lexical collisions with another parameter's
/// old name (e.g. two parameters swapping names).
fn repair_references(
    workspace: &mut Workspace,
    journal: &mut EventJournal,
    definition_id: BlockId,
    old_signature: &Signature,
    new_signature: &Signature,
) {
    let old_name_to_id = old_signature.name_to_id();
    let id_to_new_name = new_signature.id_to_name();

    // 先收集再修改，避免一边遍历 arena 一边销毁
    let mut renames: Vec<(BlockId, String, String)> = Vec::new();
    let mut doomed: Vec<BlockId> = Vec::new();

    for descendant in workspace.descendants(definition_id) {
        let block = match workspace.block(descendant) {
            Some(block) => block,
            None => continue,
        };
        if let BlockKind::ArgumentReporter { value, .. } = &block.kind {
            match old_name_to_id.get(value).and_then(|id| id_to_new_name.get(id)) {
                // The parameter is gone, or the reporter never resolved.
                None => doomed.push(descendant),
                // Same id, new display name.
                Some(new_name) if new_name != value => {
                    renames.push((descendant, value.clone(), new_name.clone()));
                }
                _ => {}
            }
        }
    }

    for (block_id, old_name, new_name) in renames {
        if let Some(block) = workspace.block_mut(block_id) {
            if let BlockKind::ArgumentReporter { value, .. } = &mut block.kind {
                *value = new_name.clone();
            }
        }
        journal.record(EventKind::FieldChanged {
            block: block_id,
            field: REPORTER_FIELD.to_string(),
            old: old_name,
            new: new_name,
        });
    }

    for block_id in doomed {
        for removed in workspace.destroy_block(block_id) {
            journal.record(EventKind::BlockDeleted { block: removed });
        }
    }
}
