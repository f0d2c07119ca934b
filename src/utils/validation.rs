use crate::error::{Result, SetupError};
use crate::tools::ToolCommands;

/// Validation rules for tool definitions
pub struct ToolValidator;

impl ToolValidator {
    /// The trimmed display name must not be empty; returns the trimmed name
    pub fn validate_display_name(name: &str) -> Result<&str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SetupError::validation("tool name must not be empty"));
        }
        Ok(trimmed)
    }

    /// At least one OS needs a non-blank command
    pub fn validate_commands(commands: &ToolCommands) -> Result<()> {
        if commands.iter().all(|(_, command)| command.trim().is_empty()) {
            return Err(SetupError::validation(
                "at least one operating system needs a non-empty install command",
            ));
        }
        Ok(())
    }

    /// Tool ids: lowercase letters, digits, `-`, `_` and `.`
    pub fn validate_identifier(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(SetupError::validation("tool identifier must not be empty"));
        }

        if !id
            .chars()
            .all(|c| (c.is_alphanumeric() && !c.is_uppercase()) || matches!(c, '-' | '_' | '.'))
        {
            return Err(SetupError::validation(format!(
                "tool identifier `{}` may only contain lowercase letters, digits, `-`, `_` and `.`",
                id
            )));
        }

        Ok(())
    }
}
