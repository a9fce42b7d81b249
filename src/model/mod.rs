pub mod builder;
pub mod loader;
pub mod signature;

use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::model::signature::{ArgType, Signature};

pub type BlockId = Uuid;

/// 画布坐标 (尺寸与折叠状态归渲染层管，这里只保留位置)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// 工作区变量，参与函数命名的冲突检查
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub id: Uuid,
    pub name: String,
}

/// 调用块上的实参插槽，按参数 id 定位而不是按名称
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArgSlot {
    pub param_id: Uuid,
    /// Attached argument block, if any.
    pub value: Option<BlockId>,
}

/// 文档图中的块类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// 函数定义：签名 + 函数体语句链
    Definition {
        signature: Signature,
        body: Vec<BlockId>,
    },
    /// 函数调用：签名副本 + 按参数 id 定位的实参插槽
    Call {
        signature: Signature,
        args: Vec<ArgSlot>,
    },
    /// 参数引用：按显示名记录所读的参数
    ArgumentReporter {
        arg_type: ArgType,
        value: String,
    },
    /// 其他任意块，本子系统只遍历不解释
    Plain {
        opcode: String,
        children: Vec<BlockId>,
    },
}

/// 文档图中的一个块
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    #[serde(default)]
    pub position: Position,
}

impl Block {
    pub fn definition(signature: Signature, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: BlockKind::Definition {
                signature,
                body: Vec::new(),
            },
            position,
        }
    }

    /// Build a call block; one empty slot per parameter of the signature.
    pub fn call(signature: &Signature, position: Position) -> Self {
        let args = signature
            .args
            .iter()
            .map(|p| ArgSlot {
                param_id: p.id,
                value: None,
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            kind: BlockKind::Call {
                signature: signature.clone(),
                args,
            },
            position,
        }
    }

    pub fn argument_reporter(arg_type: ArgType, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: BlockKind::ArgumentReporter {
                arg_type,
                value: name.to_string(),
            },
            position: Position::default(),
        }
    }

    pub fn plain(opcode: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: BlockKind::Plain {
                opcode: opcode.to_string(),
                children: Vec::new(),
            },
            position: Position::default(),
        }
    }

    /// Directly attached blocks, in document order.
    pub fn child_ids(&self) -> Vec<BlockId> {
        match &self.kind {
            BlockKind::Definition { body, .. } => body.clone(),
            BlockKind::Call { args, .. } => args.iter().filter_map(|s| s.value).collect(),
            BlockKind::ArgumentReporter { .. } => Vec::new(),
            BlockKind::Plain { children, .. } => children.clone(),
        }
    }

    /// The signature carried by definition and call blocks.
    pub fn signature(&self) -> Option<&Signature> {
        match &self.kind {
            BlockKind::Definition { signature, .. } | BlockKind::Call { signature, .. } => {
                Some(signature)
            }
            _ => None,
        }
    }
}

/// 工作区：一次编辑会话操作的可变文档
/// blocks 是全量 arena，top_level 记录根块的文档顺序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub id: String,
    pub blocks: Vec<Block>,
    pub top_level: Vec<BlockId>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Workspace {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            blocks: Vec::new(),
            top_level: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Add a block to the arena without attaching it anywhere.
    pub fn add_block(&mut self, block: Block) -> BlockId {
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Add a block as a new top-level root.
    pub fn add_top_level(&mut self, block: Block) -> BlockId {
        let id = self.add_block(block);
        self.top_level.push(id);
        id
    }

    pub fn add_variable(&mut self, name: &str) {
        self.variables.push(Variable {
            id: Uuid::new_v4(),
            name: name.to_string(),
        });
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.iter().any(|b| b.id == id)
    }

    pub fn top_level_blocks(&self) -> impl Iterator<Item = &Block> {
        self.top_level.iter().filter_map(|id| self.block(*id))
    }

    /// Every transitive child of a block, in document order, the block itself
    /// excluded.
    pub fn descendants(&self, id: BlockId) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut stack = match self.block(id) {
            Some(block) => block.child_ids(),
            None => return out,
        };
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(block) = self.block(next) {
                let mut children = block.child_ids();
                children.reverse();
                stack.extend(children);
            }
        }
        out
    }

    /// The top-level block closest to the top of the canvas.
    pub fn topmost(&self) -> Option<&Block> {
        self.top_level_blocks().min_by_key(|b| b.position.y)
    }

    /// Detach a block from whatever parent references it and make it a root
    /// at the given position. The block keeps its own subtree.
    pub fn promote_to_top_level(&mut self, id: BlockId, position: Position) {
        self.detach(id);
        if let Some(block) = self.block_mut(id) {
            block.position = position;
        }
        if !self.top_level.contains(&id) {
            self.top_level.push(id);
        }
    }

    /// Destroy a block together with its whole subtree. Returns the removed
    /// ids in document order, the root first.
    pub fn destroy_block(&mut self, id: BlockId) -> Vec<BlockId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));
        self.detach(id);
        self.top_level.retain(|t| *t != id);
        self.blocks.retain(|b| !doomed.contains(&b.id));
        doomed
    }

    /// Remove every parent-side reference to `id`. There are no parent
    /// pointers, so this is a full scan over the arena.
    fn detach(&mut self, id: BlockId) {
        for block in &mut self.blocks {
            match &mut block.kind {
                BlockKind::Definition { body, .. } => body.retain(|c| *c != id),
                BlockKind::Call { args, .. } => {
                    for slot in args.iter_mut() {
                        if slot.value == Some(id) {
                            slot.value = None;
                        }
                    }
                }
                BlockKind::ArgumentReporter { .. } => {}
                BlockKind::Plain { children, .. } => children.retain(|c| *c != id),
            }
        }
    }
}
