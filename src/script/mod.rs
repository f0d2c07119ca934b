mod dialect;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::{Result, SetupError};
use crate::platform::OperatingSystem;
use crate::state::SelectionSet;
use crate::tools::ToolCatalog;

pub use dialect::ShellDialect;

const GENERATED_BY: &str = "Generated by ugsetup";
const COMPLETION_MESSAGE: &str = "All tools installed successfully!";

/// Output of one generation run. Derived data only; nothing here is cached
/// by the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScriptResult {
    pub os: OperatingSystem,
    pub text: String,
    /// Identifiers, in selection order, that had no command for `os`.
    pub unsupported_tools: Vec<String>,
    /// Number of tool sections, unsupported ones included.
    pub tool_count: usize,
}

impl ScriptResult {
    pub fn has_unsupported(&self) -> bool {
        !self.unsupported_tools.is_empty()
    }

    /// `install.sh` or `install.ps1`, for saving the script.
    pub fn suggested_file_name(&self) -> String {
        format!("install.{}", ShellDialect::for_os(self.os).file_extension())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptGenerator;

impl ScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the install script for `os`. Structural problems (empty
    /// selection, selected ids missing from the catalog) abort; tools without
    /// a command for `os` degrade to a comment and are reported in
    /// `unsupported_tools`.
    #[instrument(skip_all, fields(os = %os, selected = selection.count()))]
    pub fn generate(
        &self,
        os: OperatingSystem,
        selection: &SelectionSet,
        catalog: &ToolCatalog,
    ) -> Result<ScriptResult> {
        if selection.is_empty() {
            return Err(SetupError::EmptySelection);
        }

        let tools = selection
            .members()
            .iter()
            .map(|id| {
                catalog
                    .lookup(id)
                    .ok_or_else(|| SetupError::CatalogInconsistency(id.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let dialect = ShellDialect::for_os(os);
        let mut lines = vec![
            dialect.interpreter_marker().to_string(),
            dialect.comment(GENERATED_BY),
            dialect.comment(&format!("Target OS: {}", os.display_name())),
            dialect.strict_mode().to_string(),
        ];

        let mut unsupported_tools = Vec::new();
        for tool in &tools {
            lines.push(String::new());
            lines.push(dialect.comment(tool.name()));
            match tool.command_for(os) {
                Some(command) => {
                    lines.push(dialect.echo(&format!("Installing {}...", tool.name())));
                    lines.push(command.to_string());
                }
                None => {
                    warn!(tool = tool.id(), %os, "tool has no install command for target os");
                    lines.push(dialect.comment(&format!("{} is unsupported on {}", tool.name(), os)));
                    unsupported_tools.push(tool.id().to_string());
                }
            }
        }

        lines.push(String::new());
        lines.push(dialect.echo(COMPLETION_MESSAGE));

        let mut text = lines.join("\n");
        text.push('\n');

        info!(
            %os,
            tools = tools.len(),
            unsupported = unsupported_tools.len(),
            "install script generated"
        );

        Ok(ScriptResult {
            os,
            text,
            unsupported_tools,
            tool_count: tools.len(),
        })
    }
}

/// Shorthand for [`ScriptGenerator::generate`].
pub fn generate(
    os: OperatingSystem,
    selection: &SelectionSet,
    catalog: &ToolCatalog,
) -> Result<ScriptResult> {
    ScriptGenerator::new().generate(os, selection, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;

    fn catalog() -> ToolCatalog {
        let mut catalog = ToolCatalog::new();
        catalog
            .register(
                Tool::builder("git", "Git")
                    .linux("apt install git")
                    .macos("brew install git")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        catalog
            .register(
                Tool::builder("node", "Node")
                    .linux("apt install nodejs")
                    .windows("winget install OpenJS.NodeJS")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        catalog
    }

    fn selection(ids: &[&str]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        for id in ids {
            selection.insert(*id);
        }
        selection
    }

    #[test]
    fn empty_selection_fails() {
        let err = generate(OperatingSystem::Linux, &SelectionSet::new(), &catalog()).unwrap_err();
        assert!(matches!(err, SetupError::EmptySelection));
    }

    #[test]
    fn unknown_selected_identifier_aborts() {
        let err = generate(OperatingSystem::Linux, &selection(&["git", "ghost"]), &catalog())
            .unwrap_err();
        assert!(matches!(err, SetupError::CatalogInconsistency(ref id) if id == "ghost"));
    }

    #[test]
    fn linux_script_layout() {
        let result = generate(OperatingSystem::Linux, &selection(&["git", "node"]), &catalog())
            .unwrap();
        let expected = "\
#!/usr/bin/env bash
# Generated by ugsetup
# Target OS: Linux
set -e

# Git
echo 'Installing Git...'
apt install git

# Node
echo 'Installing Node...'
apt install nodejs

echo 'All tools installed successfully!'
";
        assert_eq!(result.text, expected);
        assert_eq!(result.tool_count, 2);
        assert!(!result.has_unsupported());
        assert_eq!(result.suggested_file_name(), "install.sh");
    }

    #[test]
    fn unsupported_tool_degrades_to_comment() {
        let result = generate(OperatingSystem::Windows, &selection(&["git", "node"]), &catalog())
            .unwrap();
        assert!(result.text.starts_with("#Requires -Version 5.1\n"));
        assert!(result.text.contains("# Git is unsupported on windows\n"));
        assert!(result.text.contains("winget install OpenJS.NodeJS\n"));
        assert!(!result.text.contains("Installing Git"));
        assert_eq!(result.unsupported_tools, vec!["git"]);
        assert_eq!(result.tool_count, 2);
        assert_eq!(result.suggested_file_name(), "install.ps1");
    }
}
