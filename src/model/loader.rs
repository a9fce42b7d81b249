use anyhow::{Result, Context as AnyhowContext};
use std::fs;
use crate::model::Workspace;

pub fn load_workspace_from_yaml(file_path: &str) -> Result<Workspace> {
    let yaml_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read YAML file from {}", file_path))?;

    let workspace: Workspace = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to deserialize YAML content from {}", file_path))?;

    Ok(workspace)
}

pub fn save_workspace_to_yaml(workspace: &Workspace, file_path: &str) -> Result<()> {
    let yaml_content = serde_yaml::to_string(workspace)
        .with_context(|| format!("Failed to serialize workspace {}", workspace.id))?;

    fs::write(file_path, yaml_content)
        .with_context(|| format!("Failed to write YAML file to {}", file_path))?;

    Ok(())
}
