use serde::{Deserialize, Serialize};
use tracing::debug;

use super::selection::{SelectionSet, SelectionState};
use super::store::SessionSnapshot;
use crate::error::{Result, SetupError};
use crate::platform::{OperatingSystem, OsResolver};
use crate::script::{ScriptGenerator, ScriptResult};
use crate::tools::{slugify, unique_slug, Tool, ToolCatalog, ToolCommands, ToolOrigin};
use crate::utils::ToolValidator;

/// A discrete user action coming from a presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SelectOs { os: OperatingSystem },
    ToggleTool { id: String },
    AddCustomTool { name: String, commands: ToolCommands },
    RequestScript,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntentOutcome {
    OsSelected { os: OperatingSystem },
    Toggled { id: String, state: SelectionState },
    ToolAdded { tool: Tool },
    Script { result: ScriptResult },
}

/// One user's wizard state: the catalog (built-ins plus this session's
/// custom tools), the ordered selection and an optional explicit OS choice.
pub struct SetupSession {
    catalog: ToolCatalog,
    selection: SelectionSet,
    chosen_os: Option<OperatingSystem>,
    resolver: OsResolver,
    generator: ScriptGenerator,
}

impl SetupSession {
    pub fn new(catalog: ToolCatalog, resolver: OsResolver) -> Self {
        Self {
            catalog,
            selection: SelectionSet::new(),
            chosen_os: None,
            resolver,
            generator: ScriptGenerator::new(),
        }
    }

    /// Built-in catalog and environment-based OS detection.
    pub fn from_env() -> Self {
        Self::new(ToolCatalog::with_builtins(), OsResolver::from_env())
    }

    /// Rebuilds a session on top of `catalog`. Custom tools keep their
    /// identifiers and are always registered as custom; selected ids must
    /// all resolve.
    pub fn restore(
        snapshot: SessionSnapshot,
        mut catalog: ToolCatalog,
        resolver: OsResolver,
    ) -> Result<Self> {
        for tool in snapshot.custom_tools {
            catalog.register(tool.validated_as(ToolOrigin::Custom)?)?;
        }

        let mut selection = SelectionSet::new();
        for id in snapshot.selected {
            if !catalog.contains(&id) {
                return Err(SetupError::CatalogInconsistency(id));
            }
            selection.insert(id);
        }

        Ok(Self {
            catalog,
            selection,
            chosen_os: snapshot.active_os,
            resolver,
            generator: ScriptGenerator::new(),
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_os: self.chosen_os,
            selected: self.selection.members().to_vec(),
            custom_tools: self
                .catalog
                .list()
                .filter(|tool| tool.is_custom())
                .cloned()
                .collect(),
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected tools in selection order. Ids that do not resolve are skipped
    /// here; generation reports them instead.
    pub fn selected_tools(&self) -> impl Iterator<Item = &Tool> + '_ {
        self.selection
            .members()
            .iter()
            .filter_map(|id| self.catalog.lookup(id))
    }

    pub fn select_os(&mut self, os: OperatingSystem) {
        debug!(%os, "operating system chosen");
        self.chosen_os = Some(os);
    }

    pub fn clear_os_choice(&mut self) {
        self.chosen_os = None;
    }

    pub fn chosen_os(&self) -> Option<OperatingSystem> {
        self.chosen_os
    }

    pub fn detected_os(&self) -> OperatingSystem {
        self.resolver.detect()
    }

    pub fn active_os(&self) -> OperatingSystem {
        self.resolver.resolve_active(self.chosen_os)
    }

    /// Unknown identifiers are ignored and reported as unselected.
    pub fn toggle_tool(&mut self, id: &str) -> SelectionState {
        if !self.catalog.contains(id) {
            debug!(tool = id, "ignoring toggle of unknown tool");
            return SelectionState::Unselected;
        }
        let state = self.selection.toggle(id);
        debug!(tool = id, ?state, count = self.selection.count(), "tool toggled");
        state
    }

    /// Validates a user-defined tool, registers it under a unique slug and
    /// selects it. On any error neither the catalog nor the selection change.
    pub fn add_custom_tool(&mut self, name: &str, commands: ToolCommands) -> Result<Tool> {
        let name = ToolValidator::validate_display_name(name)?;
        let commands = commands.normalized();
        ToolValidator::validate_commands(&commands)?;

        let base = slugify(name);
        if base.is_empty() {
            return Err(SetupError::validation(format!(
                "tool name `{name}` needs at least one letter or digit"
            )));
        }
        let id = unique_slug(&base, |candidate| self.catalog.contains(candidate))?;

        let tool = Tool::builder(id, name)
            .commands(commands)
            .origin(ToolOrigin::Custom)
            .build()?;
        self.catalog.register(tool.clone())?;
        self.selection.insert(tool.id());
        debug!(tool = tool.id(), "custom tool added");
        Ok(tool)
    }

    pub fn generate(&self) -> Result<ScriptResult> {
        self.generator
            .generate(self.active_os(), &self.selection, &self.catalog)
    }

    /// Drops the selection and OS choice. Custom tools stay in the catalog.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.chosen_os = None;
    }

    pub fn apply(&mut self, intent: Intent) -> Result<IntentOutcome> {
        match intent {
            Intent::SelectOs { os } => {
                self.select_os(os);
                Ok(IntentOutcome::OsSelected { os })
            }
            Intent::ToggleTool { id } => {
                let state = self.toggle_tool(&id);
                Ok(IntentOutcome::Toggled { id, state })
            }
            Intent::AddCustomTool { name, commands } => {
                let tool = self.add_custom_tool(&name, commands)?;
                Ok(IntentOutcome::ToolAdded { tool })
            }
            Intent::RequestScript => {
                let result = self.generate()?;
                Ok(IntentOutcome::Script { result })
            }
        }
    }
}
