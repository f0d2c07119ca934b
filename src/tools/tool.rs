use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::platform::OperatingSystem;
use crate::utils::ToolValidator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolOrigin {
    #[default]
    Builtin,
    Custom,
}

/// Install command per operating system. A missing entry means the tool is
/// unsupported there. Blank commands are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommands {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<String>,
}

impl ToolCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, os: OperatingSystem, command: impl Into<String>) -> Self {
        self.set(os, command);
        self
    }

    pub fn get(&self, os: OperatingSystem) -> Option<&str> {
        self.slot(os).as_deref()
    }

    pub fn set(&mut self, os: OperatingSystem, command: impl Into<String>) {
        let command = command.into();
        let trimmed = command.trim();
        *self.slot_mut(os) = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn supports(&self, os: OperatingSystem) -> bool {
        self.get(os).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperatingSystem, &str)> + '_ {
        OperatingSystem::ALL
            .into_iter()
            .filter_map(move |os| self.get(os).map(|command| (os, command)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Re-applies trimming; used on records that bypassed `set` (serde input).
    pub fn normalized(&self) -> Self {
        let mut out = Self::new();
        for os in OperatingSystem::ALL {
            if let Some(command) = self.slot(os) {
                out.set(os, command.as_str());
            }
        }
        out
    }

    fn slot(&self, os: OperatingSystem) -> &Option<String> {
        match os {
            OperatingSystem::Linux => &self.linux,
            OperatingSystem::Macos => &self.macos,
            OperatingSystem::Windows => &self.windows,
        }
    }

    fn slot_mut(&mut self, os: OperatingSystem) -> &mut Option<String> {
        match os {
            OperatingSystem::Linux => &mut self.linux,
            OperatingSystem::Macos => &mut self.macos,
            OperatingSystem::Windows => &mut self.windows,
        }
    }
}

impl FromIterator<(OperatingSystem, String)> for ToolCommands {
    fn from_iter<I: IntoIterator<Item = (OperatingSystem, String)>>(iter: I) -> Self {
        let mut commands = Self::new();
        for (os, command) in iter {
            commands.set(os, command);
        }
        commands
    }
}

/// A catalog entry. Construct through [`Tool::builder`] so the record is
/// validated before it can reach a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    id: String,
    name: String,
    commands: ToolCommands,
    #[serde(default)]
    origin: ToolOrigin,
}

impl Tool {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ToolBuilder {
        ToolBuilder::new(id, name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &ToolCommands {
        &self.commands
    }

    pub fn origin(&self) -> ToolOrigin {
        self.origin
    }

    pub fn command_for(&self, os: OperatingSystem) -> Option<&str> {
        self.commands.get(os)
    }

    pub fn is_custom(&self) -> bool {
        self.origin == ToolOrigin::Custom
    }

    /// Checks the invariants a deserialized record may have skipped and
    /// returns the normalized form.
    pub fn validated(self) -> Result<Self> {
        let origin = self.origin;
        self.validated_as(origin)
    }

    /// [`Tool::validated`], overriding whatever origin the record carried.
    pub fn validated_as(self, origin: ToolOrigin) -> Result<Self> {
        ToolBuilder {
            id: self.id,
            name: self.name,
            commands: self.commands.normalized(),
            origin,
        }
        .build()
    }
}

#[derive(Clone, Debug)]
pub struct ToolBuilder {
    id: String,
    name: String,
    commands: ToolCommands,
    origin: ToolOrigin,
}

impl ToolBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            commands: ToolCommands::new(),
            origin: ToolOrigin::Builtin,
        }
    }

    pub fn command(mut self, os: OperatingSystem, command: impl Into<String>) -> Self {
        self.commands.set(os, command);
        self
    }

    pub fn linux(self, command: impl Into<String>) -> Self {
        self.command(OperatingSystem::Linux, command)
    }

    pub fn macos(self, command: impl Into<String>) -> Self {
        self.command(OperatingSystem::Macos, command)
    }

    pub fn windows(self, command: impl Into<String>) -> Self {
        self.command(OperatingSystem::Windows, command)
    }

    pub fn commands(mut self, commands: ToolCommands) -> Self {
        self.commands = commands.normalized();
        self
    }

    pub fn origin(mut self, origin: ToolOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn build(self) -> Result<Tool> {
        ToolValidator::validate_identifier(&self.id)?;
        let name = ToolValidator::validate_display_name(&self.name)?.to_string();
        ToolValidator::validate_commands(&self.commands)?;
        Ok(Tool {
            id: self.id,
            name,
            commands: self.commands,
            origin: self.origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;

    #[test]
    fn builder_trims_and_drops_blank_commands() {
        let tool = Tool::builder("git", " Git ")
            .linux("  sudo apt install -y git ")
            .windows("   ")
            .build()
            .unwrap();

        assert_eq!(tool.name(), "Git");
        assert_eq!(tool.command_for(OperatingSystem::Linux), Some("sudo apt install -y git"));
        assert_eq!(tool.command_for(OperatingSystem::Windows), None);
        assert_eq!(tool.origin(), ToolOrigin::Builtin);
    }

    #[test]
    fn builder_rejects_tool_without_commands() {
        let err = Tool::builder("git", "Git").windows("").build().unwrap_err();
        assert!(matches!(err, SetupError::Validation(_)));
    }

    #[test]
    fn validated_normalizes_deserialized_records() {
        let raw = serde_json::json!({
            "id": "deno",
            "name": "Deno",
            "commands": { "linux": "  curl -fsSL https://deno.land/install.sh | sh ", "macos": "" },
            "origin": "custom"
        });
        let tool: Tool = serde_json::from_value(raw).unwrap();
        let tool = tool.validated().unwrap();
        assert!(tool.is_custom());
        assert_eq!(
            tool.command_for(OperatingSystem::Linux),
            Some("curl -fsSL https://deno.land/install.sh | sh")
        );
        assert!(!tool.commands().supports(OperatingSystem::Macos));
    }

    #[test]
    fn commands_iterate_in_os_order() {
        let commands = ToolCommands::new()
            .with(OperatingSystem::Windows, "winget install Git.Git")
            .with(OperatingSystem::Linux, "sudo apt install -y git");
        let oses: Vec<_> = commands.iter().map(|(os, _)| os).collect();
        assert_eq!(oses, vec![OperatingSystem::Linux, OperatingSystem::Windows]);
    }
}
