use thiserror::Error;

use crate::functions::registry;
use crate::model::Workspace;
use crate::model::signature::Signature;

/// 签名校验失败的原因；Display 文本就是给用户看的警告消息
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Function name cannot be empty.")]
    EmptyFunctionName,
    #[error("Argument names cannot be empty.")]
    EmptyArgumentName,
    #[error("Argument name \"{0}\" is used more than once.")]
    DuplicateArgumentName(String),
    #[error("Argument \"{0}\" cannot have the same name as the function.")]
    ArgumentNameIsFunctionName(String),
    #[error("A variable named \"{0}\" already exists.")]
    NameIsVariable(String),
    #[error("A function named \"{0}\" already exists.")]
    NameIsFunction(String),
}

/// Check a candidate signature against the workspace it is destined for.
/// Checks run in a fixed order and stop at the first failure, so the user
/// sees one actionable message at a time. All comparisons are
/// case-insensitive.
pub fn validate_signature(
    workspace: &Workspace,
    candidate: &Signature,
) -> Result<(), ValidationError> {
    let function_name = candidate.name.to_lowercase();

    // 1. The function name must not be empty.
    if function_name.is_empty() {
        return Err(ValidationError::EmptyFunctionName);
    }

    // 2. No argument name may be empty.
    for param in &candidate.args {
        if param.name.is_empty() {
            return Err(ValidationError::EmptyArgumentName);
        }
    }

    // 3. Argument names must be mutually distinct.
    let mut seen: Vec<String> = Vec::new();
    for param in &candidate.args {
        let lowered = param.name.to_lowercase();
        if seen.contains(&lowered) {
            return Err(ValidationError::DuplicateArgumentName(param.name.clone()));
        }
        seen.push(lowered);
    }

    // 4. No argument may shadow the function's own name.
    for param in &candidate.args {
        if param.name.to_lowercase() == function_name {
            return Err(ValidationError::ArgumentNameIsFunctionName(
                param.name.clone(),
            ));
        }
    }

    // 5. The function name must not collide with a workspace variable.
    for variable in &workspace.variables {
        if variable.name.to_lowercase() == function_name {
            return Err(ValidationError::NameIsVariable(candidate.name.clone()));
        }
    }

    // 6. The function name must not collide with another function. The
    //    definition being edited carries the same stable id and is exempt,
    //    so saving without renaming is always legal.
    for def_id in registry::all_definitions(workspace) {
        if let Some(existing) = workspace.block(def_id).and_then(|b| b.signature()) {
            if existing.function_id != candidate.function_id
                && existing.name.to_lowercase() == function_name
            {
                return Err(ValidationError::NameIsFunction(candidate.name.clone()));
            }
        }
    }

    Ok(())
}
