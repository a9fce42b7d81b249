use crate::model::{Block, BlockId, BlockKind, Position, Workspace};
use crate::model::signature::{ArgType, Signature};

/// Fluent construction of workspace documents, mainly for tests and demos.
/// Top-level blocks are stacked downwards in insertion order.
pub struct WorkspaceBuilder {
    workspace: Workspace,
    next_y: i64,
}

impl WorkspaceBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            workspace: Workspace::new(id),
            next_y: 0,
        }
    }

    pub fn variable(mut self, name: &str) -> Self {
        self.workspace.add_variable(name);
        self
    }

    /// Add an arbitrary block as a top-level root.
    pub fn block(mut self, mut block: Block) -> Self {
        block.position = self.place();
        self.workspace.add_top_level(block);
        self
    }

    /// 开始一个函数定义块，随后用 DefinitionBuilder 填充函数体
    pub fn definition(self, signature: Signature) -> DefinitionBuilder {
        DefinitionBuilder {
            builder: self,
            signature,
            body: Vec::new(),
        }
    }

    /// Begin a call block for the given signature, slots initially empty.
    pub fn call(self, signature: &Signature) -> CallBuilder {
        CallBuilder {
            builder: self,
            signature: signature.clone(),
            values: Vec::new(),
        }
    }

    fn place(&mut self) -> Position {
        let position = Position::new(0, self.next_y);
        self.next_y += 100;
        position
    }

    pub fn build(self) -> Workspace {
        self.workspace
    }
}

pub struct DefinitionBuilder {
    builder: WorkspaceBuilder,
    signature: Signature,
    body: Vec<BlockId>,
}

impl DefinitionBuilder {
    /// Put an argument reporter directly into the body.
    pub fn reporter(mut self, arg_type: ArgType, name: &str) -> Self {
        let id = self
            .builder
            .workspace
            .add_block(Block::argument_reporter(arg_type, name));
        self.body.push(id);
        self
    }

    /// Put an opaque statement block into the body.
    pub fn statement(mut self, opcode: &str) -> Self {
        let id = self.builder.workspace.add_block(Block::plain(opcode));
        self.body.push(id);
        self
    }

    /// Put a statement into the body that nests one argument reporter.
    pub fn statement_with_reporter(mut self, opcode: &str, arg_type: ArgType, name: &str) -> Self {
        let reporter = self
            .builder
            .workspace
            .add_block(Block::argument_reporter(arg_type, name));
        let mut statement = Block::plain(opcode);
        if let BlockKind::Plain { children, .. } = &mut statement.kind {
            children.push(reporter);
        }
        let id = self.builder.workspace.add_block(statement);
        self.body.push(id);
        self
    }

    pub fn build(mut self) -> WorkspaceBuilder {
        let position = self.builder.place();
        let mut block = Block::definition(self.signature, position);
        if let BlockKind::Definition { body, .. } = &mut block.kind {
            *body = self.body;
        }
        self.builder.workspace.add_top_level(block);
        self.builder
    }
}

pub struct CallBuilder {
    builder: WorkspaceBuilder,
    signature: Signature,
    values: Vec<(String, Block)>,
}

impl CallBuilder {
    /// Attach an argument block to the slot of the named parameter.
    pub fn value(mut self, param_name: &str, block: Block) -> Self {
        self.values.push((param_name.to_string(), block));
        self
    }

    pub fn build(mut self) -> WorkspaceBuilder {
        let position = self.builder.place();
        let mut call = Block::call(&self.signature, position);
        for (param_name, value_block) in self.values {
            let param_id = match self.signature.param_by_name(&param_name) {
                Some(param) => param.id,
                None => continue, // unknown parameter name, nothing to attach to
            };
            let value_id = self.builder.workspace.add_block(value_block);
            if let BlockKind::Call { args, .. } = &mut call.kind {
                if let Some(slot) = args.iter_mut().find(|s| s.param_id == param_id) {
                    slot.value = Some(value_id);
                }
            }
        }
        self.builder.workspace.add_top_level(call);
        self.builder
    }
}
