use std::collections::VecDeque;

use tracing::debug;

use crate::editor::events::{EventJournal, EventKind};
use crate::model::{BlockId, Workspace};

/// How far the bump pass pushes an orphaned block away from its stale
/// connection point.
pub const BUMP_SHIFT: i64 = 24;

/// 待执行的外观修复任务
/// 只影响块的摆放，不影响文档语义；相对后续用户操作无顺序保证
#[derive(Debug, Clone, PartialEq)]
pub enum RepairTask {
    /// Nudge the blocks orphaned by a caller's shape change away from it.
    BumpNeighbours {
        around: BlockId,
        orphans: Vec<BlockId>,
    },
}

/// FIFO queue of pending cosmetic repairs. Draining is the host's job, at
/// whatever pace it likes; tasks are best-effort against the current document.
pub struct RepairQueue {
    tasks: VecDeque<RepairTask>,
}

impl RepairQueue {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn schedule(&mut self, task: RepairTask) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn drain(&mut self) -> Vec<RepairTask> {
        self.tasks.drain(..).collect()
    }
}

/// Apply one repair task against the current document. Blocks that no longer
/// exist are skipped silently.
pub fn apply(workspace: &mut Workspace, journal: &mut EventJournal, task: &RepairTask) {
    match task {
        RepairTask::BumpNeighbours { around, orphans } => {
            debug!(around = %around, count = orphans.len(), "Bumping orphaned neighbours");
            // Stagger the shifts so orphans do not land on top of each other.
            for (i, orphan) in orphans.iter().enumerate() {
                let step = (i as i64 + 1) * BUMP_SHIFT;
                if let Some(block) = workspace.block_mut(*orphan) {
                    let from = block.position;
                    block.position.x += BUMP_SHIFT;
                    block.position.y += step;
                    journal.record(EventKind::BlockMoved {
                        block: *orphan,
                        from,
                        to: block.position,
                    });
                }
            }
        }
    }
}
