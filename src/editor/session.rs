use std::sync::Arc;

use tracing::debug;

use crate::editor::events::{Event, EventJournal};
use crate::editor::ports::{EditorUi, SignatureEditor};
use crate::editor::repair::{self, RepairQueue};
use crate::functions::validate::{self, ValidationError};
use crate::model::{BlockId, Workspace};
use crate::model::signature::Signature;

/// 编辑会话：工作区 + 事件日志 + 修复队列 + 宿主端口
/// 两个端口都是构造参数，缺一不可；会话内所有操作在调用线程上同步完成
pub struct EditorSession {
    pub workspace: Workspace,
    pub journal: EventJournal,
    pub repairs: RepairQueue,
    ui: Arc<dyn EditorUi>,
    signature_editor: Arc<dyn SignatureEditor>,
    selection: Option<BlockId>,
}

impl EditorSession {
    pub fn new(
        workspace: Workspace,
        ui: Arc<dyn EditorUi>,
        signature_editor: Arc<dyn SignatureEditor>,
    ) -> Self {
        Self {
            workspace,
            journal: EventJournal::new(),
            repairs: RepairQueue::new(),
            ui,
            signature_editor,
            selection: None,
        }
    }

    pub fn ui(&self) -> &dyn EditorUi {
        self.ui.as_ref()
    }

    pub fn signature_editor(&self) -> &dyn SignatureEditor {
        self.signature_editor.as_ref()
    }

    pub fn select(&mut self, block: BlockId) {
        self.selection = Some(block);
    }

    pub fn selection(&self) -> Option<BlockId> {
        self.selection
    }

    /// Drop the selection and fold away transient UI chrome. Runs before any
    /// modal flow opens.
    pub fn clear_transient_ui(&mut self) {
        self.selection = None;
        self.ui.hide_chaff();
    }

    /// Run the name validator against this workspace; a failure surfaces its
    /// reason as a modal alert before being returned.
    pub fn ensure_valid(&self, candidate: &Signature) -> Result<(), ValidationError> {
        match validate::validate_signature(&self.workspace, candidate) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.ui.alert(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.journal.drain()
    }

    /// Apply every pending cosmetic repair.
    pub fn flush_repairs(&mut self) {
        let tasks = self.repairs.drain();
        if tasks.is_empty() {
            return;
        }
        debug!(count = tasks.len(), "Flushing pending repairs");
        for task in &tasks {
            repair::apply(&mut self.workspace, &mut self.journal, task);
        }
    }
}
