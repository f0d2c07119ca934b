use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SetupError};
use crate::platform::OperatingSystem;
use crate::tools::builtin;
use crate::tools::tool::Tool;

/// Append-only registry of known tools. Iteration follows registration order.
#[derive(Clone, Debug, Default)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// A catalog seeded with the curated built-in table.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        for tool in builtin::builtin_tools() {
            // the seed table has unique ids, checked by its own tests
            if let Err(err) = catalog.register(tool.clone()) {
                debug!(%err, "skipping built-in tool");
            }
        }
        catalog
    }

    pub fn register(&mut self, tool: Tool) -> Result<()> {
        if self.index.contains_key(tool.id()) {
            return Err(SetupError::DuplicateIdentifier(tool.id().to_string()));
        }
        debug!(tool = tool.id(), origin = ?tool.origin(), "tool registered");
        self.index.insert(tool.id().to_string(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> Option<&Tool> {
        self.index.get(id).map(|&slot| &self.tools[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn list(&self) -> impl Iterator<Item = &Tool> + '_ {
        self.tools.iter()
    }

    /// Case-insensitive substring match over display names. A blank query
    /// matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Tool> + 'a {
        let needle = query.trim().to_lowercase();
        self.tools
            .iter()
            .filter(move |tool| needle.is_empty() || tool.name().to_lowercase().contains(&needle))
    }

    pub fn supported_on(&self, os: OperatingSystem) -> impl Iterator<Item = &Tool> + '_ {
        self.tools
            .iter()
            .filter(move |tool| tool.commands().supports(os))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
