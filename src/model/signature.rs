use std::collections::HashMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// 参数类型标签 (boolean / number / string，或宿主扩展的自定义类型)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum ArgType {
    Boolean,
    Number,
    Text,
    Custom(String),
}

impl From<String> for ArgType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "boolean" => ArgType::Boolean,
            "number" => ArgType::Number,
            "string" => ArgType::Text,
            _ => ArgType::Custom(raw),
        }
    }
}

impl From<ArgType> for String {
    fn from(ty: ArgType) -> Self {
        match ty {
            ArgType::Boolean => "boolean".to_string(),
            ArgType::Number => "number".to_string(),
            ArgType::Text => "string".to_string(),
            ArgType::Custom(name) => name,
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Boolean => write!(f, "boolean"),
            ArgType::Number => write!(f, "number"),
            ArgType::Text => write!(f, "string"),
            ArgType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// 签名中的单个参数
/// id 是稳定身份：重命名保留 id，删除再新建则产生新 id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ArgType,
}

/// 函数签名：名称 + 稳定函数 id + 有序参数表
/// 定义块和调用块各自持有一份副本，由传播器保持一致
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signature {
    pub name: String,
    #[serde(rename = "functionid")]
    pub function_id: Uuid,
    pub args: Vec<Parameter>,
}

impl Signature {
    /// A fresh signature with no parameters and a newly minted function id.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            function_id: Uuid::new_v4(),
            args: Vec::new(),
        }
    }

    /// Append a parameter with a fresh id.
    pub fn arg(mut self, name: &str, ty: ArgType) -> Self {
        self.args.push(Parameter {
            id: Uuid::new_v4(),
            name: name.to_string(),
            ty,
        });
        self
    }

    /// Append a parameter with a known id. Used when rebuilding an edited
    /// signature that keeps some of the old parameters.
    pub fn arg_with_id(mut self, id: Uuid, name: &str, ty: ArgType) -> Self {
        self.args.push(Parameter {
            id,
            name: name.to_string(),
            ty,
        });
        self
    }

    /// Map from display name to stable id. Names are unique within a valid
    /// signature, so no entry is lost.
    pub fn name_to_id(&self) -> HashMap<String, Uuid> {
        self.args.iter().map(|p| (p.name.clone(), p.id)).collect()
    }

    /// Inverse map, stable id to display name.
    pub fn id_to_name(&self) -> HashMap<Uuid, String> {
        self.args.iter().map(|p| (p.id, p.name.clone())).collect()
    }

    pub fn param_by_name(&self, name: &str) -> Option<&Parameter> {
        self.args.iter().find(|p| p.name == name)
    }

    /// Serialize to the interchange payload carried by definition and call
    /// blocks: the root holds `name` and `functionid`, each entry of `args`
    /// holds `id`, `name` and `type`.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize signature payload")
    }

    pub fn from_payload(payload: &str) -> Result<Signature> {
        serde_json::from_str(payload)
            .with_context(|| format!("Failed to parse signature payload: {}", payload))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ")")
    }
}
