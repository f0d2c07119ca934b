use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, SetupError};
use crate::tools::registry::ToolCatalog;
use crate::tools::slug::slugify;
use crate::tools::tool::{Tool, ToolCommands, ToolOrigin};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct CatalogFile {
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolSpec {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub commands: ToolCommands,
}

impl ToolSpec {
    fn into_tool(self) -> Result<Tool> {
        let id = match self.id {
            Some(id) => id,
            None => slugify(&self.name),
        };
        Tool::builder(id, self.name)
            .commands(self.commands)
            .origin(ToolOrigin::Builtin)
            .build()
    }
}

/// Parses a catalog extension and registers every entry. Nothing is
/// registered unless all entries are valid and new.
pub fn load_catalog_from_str(contents: &str, catalog: &mut ToolCatalog) -> Result<Vec<String>> {
    let file: CatalogFile = serde_json::from_str(contents)?;

    let mut seen = HashSet::new();
    let mut tools = Vec::with_capacity(file.tools.len());
    for spec in file.tools {
        let tool = spec.into_tool()?;
        if catalog.contains(tool.id()) || !seen.insert(tool.id().to_string()) {
            return Err(SetupError::DuplicateIdentifier(tool.id().to_string()));
        }
        tools.push(tool);
    }

    let mut ids = Vec::with_capacity(tools.len());
    for tool in tools {
        ids.push(tool.id().to_string());
        catalog.register(tool)?;
    }
    Ok(ids)
}

pub fn load_catalog_from_file<P: AsRef<Path>>(path: P, catalog: &mut ToolCatalog) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let ids = load_catalog_from_str(&contents, catalog)?;
    info!(path = %path.display(), count = ids.len(), "catalog extension loaded");
    Ok(ids)
}
