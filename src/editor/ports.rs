use crate::model::BlockId;
use crate::model::signature::Signature;

/// 签名编辑器端口
/// 宿主在构造会话时必须提供；编辑流程对用户是模态的
pub trait SignatureEditor: Send + Sync {
    /// 打开编辑器并阻塞到用户确认或取消
    /// 返回 None 表示取消，文档保持原样
    fn edit(&self, current: &Signature) -> Option<Signature>;
}

/// 宿主 UI 端口
pub trait EditorUi: Send + Sync {
    /// 弹出模态提示框
    fn alert(&self, message: &str);

    /// 收起瞬态 UI (下拉框、气泡等)
    fn hide_chaff(&self);

    /// 将视图聚焦到指定块
    fn focus_block(&self, block: BlockId);
}
