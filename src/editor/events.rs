use serde::Serialize;

use crate::model::{BlockId, Position};

/// A single change notification, stamped with the logical group it belongs to.
/// The host drains these to drive re-render batching and its undo journal;
/// everything in one group undoes as one step.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub group: Option<String>,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event")]
pub enum EventKind {
    BlockCreated {
        block: BlockId,
    },
    BlockDeleted {
        block: BlockId,
    },
    /// 签名变更通知，携带变更前后的序列化负载 (驱动重绘与撤销)
    SignatureChanged {
        block: BlockId,
        old: String,
        new: String,
    },
    FieldChanged {
        block: BlockId,
        field: String,
        old: String,
        new: String,
    },
    BlockMoved {
        block: BlockId,
        from: Position,
        to: Position,
    },
}

/// In-memory change journal shared by one editing session.
pub struct EventJournal {
    events: Vec<Event>,
    group: Option<String>,
    depth: usize,
}

impl EventJournal {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            group: None,
            depth: 0,
        }
    }

    /// Open a named group. Nesting is allowed; the outermost label wins.
    pub fn begin_group(&mut self, label: &str) {
        if self.depth == 0 {
            self.group = Some(label.to_string());
        }
        self.depth += 1;
    }

    pub fn end_group(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
            if self.depth == 0 {
                self.group = None;
            }
        }
    }

    pub fn record(&mut self, kind: EventKind) {
        self.events.push(Event {
            group: self.group.clone(),
            kind,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Hand all recorded events to the host, leaving the journal empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
