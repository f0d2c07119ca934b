use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::config::EnvConfig;
use crate::error::{Result, SetupError};
use crate::platform::{OperatingSystem, OsResolver};
use crate::state::{SessionStore, SetupSession};
use crate::tools::{load_catalog_from_file, Tool, ToolCatalog, ToolCommands};

/// A `--custom` argument after grouping: display name plus the commands
/// collected for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomToolArg {
    pub name: String,
    pub commands: ToolCommands,
}

/// One `generate` argument, in command-line order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateStep {
    Tool(String),
    Custom(CustomToolArg),
}

/// What [`reset_session`] did with the stored snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Selection and OS choice cleared; custom tools kept.
    Cleared,
    /// The snapshot no longer restored and was deleted.
    Discarded,
}

#[derive(Clone, Debug, Serialize)]
pub struct ToolListEntry {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub supported: bool,
}

/// Parses repeated `NAME=OS:COMMAND` arguments. Entries sharing a name are
/// merged; first appearance decides order.
pub fn parse_custom_tools<S: AsRef<str>>(args: &[S]) -> Result<Vec<CustomToolArg>> {
    let indexed: Vec<(usize, &str)> = args
        .iter()
        .enumerate()
        .map(|(index, raw)| (index, raw.as_ref()))
        .collect();
    Ok(parse_indexed_custom_tools(&indexed)?
        .into_iter()
        .map(|(_, entry)| entry)
        .collect())
}

/// Same grouping as [`parse_custom_tools`]; each entry keeps the index of
/// its first appearance.
fn parse_indexed_custom_tools(args: &[(usize, &str)]) -> Result<Vec<(usize, CustomToolArg)>> {
    let mut out: Vec<(usize, CustomToolArg)> = Vec::new();
    for &(index, raw) in args {
        let (name, rest) = raw.split_once('=').ok_or_else(|| {
            SetupError::validation(format!("`{raw}` is not in NAME=OS:COMMAND form"))
        })?;
        let (os, command) = rest.split_once(':').ok_or_else(|| {
            SetupError::validation(format!("`{raw}` is missing the OS: prefix before the command"))
        })?;
        let os: OperatingSystem = os.parse()?;

        let name = name.trim();
        match out.iter_mut().find(|(_, entry)| entry.name == name) {
            Some((_, entry)) => entry.commands.set(os, command),
            None => out.push((
                index,
                CustomToolArg {
                    name: name.to_string(),
                    commands: ToolCommands::new().with(os, command),
                },
            )),
        }
    }
    Ok(out)
}

/// Merges `--tool` and `--custom` values by their command-line index. A
/// custom tool given several times sits at its first appearance.
pub fn order_generate_steps(
    tools: &[(usize, &str)],
    custom: &[(usize, &str)],
) -> Result<Vec<GenerateStep>> {
    let mut steps: Vec<(usize, GenerateStep)> = tools
        .iter()
        .map(|&(index, id)| (index, GenerateStep::Tool(id.to_string())))
        .collect();
    steps.extend(
        parse_indexed_custom_tools(custom)?
            .into_iter()
            .map(|(index, entry)| (index, GenerateStep::Custom(entry))),
    );
    steps.sort_by_key(|(index, _)| *index);
    Ok(steps.into_iter().map(|(_, step)| step).collect())
}

/// Session for `generate`: applies `steps` in order on a fresh session.
/// Unknown tool ids are an error; repeating one selects it once.
pub fn build_one_shot_session(
    catalog: ToolCatalog,
    resolver: OsResolver,
    os: Option<OperatingSystem>,
    steps: Vec<GenerateStep>,
) -> Result<SetupSession> {
    let mut session = SetupSession::new(catalog, resolver);
    if let Some(os) = os {
        session.select_os(os);
    }
    for step in steps {
        match step {
            GenerateStep::Tool(id) => {
                if session.catalog().lookup(&id).is_none() {
                    return Err(SetupError::validation(format!(
                        "unknown tool `{id}` (see `ugsetup tools`)"
                    )));
                }
                if !session.is_selected(&id) {
                    session.toggle_tool(&id);
                }
            }
            GenerateStep::Custom(entry) => {
                session.add_custom_tool(&entry.name, entry.commands)?;
            }
        }
    }
    Ok(session)
}

/// Built-in catalog plus the extension file from `--catalog` or
/// `UGSETUP_CATALOG`.
pub fn build_catalog(path: Option<&Path>) -> Result<ToolCatalog> {
    let mut catalog = ToolCatalog::with_builtins();
    let env_path = EnvConfig::catalog_path();
    if let Some(path) = path.or(env_path.as_deref()) {
        load_catalog_from_file(path, &mut catalog)?;
    }
    Ok(catalog)
}

pub fn tool_entries<'a>(
    tools: impl Iterator<Item = &'a Tool>,
    os: OperatingSystem,
) -> Vec<ToolListEntry> {
    tools
        .map(|tool| ToolListEntry {
            id: tool.id().to_string(),
            name: tool.name().to_string(),
            origin: if tool.is_custom() { "custom" } else { "builtin" }.to_string(),
            supported: tool.commands().supports(os),
        })
        .collect()
}

pub fn render_tool_table(entries: &[ToolListEntry], os: OperatingSystem) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<32} {:<8} {}",
        "Id",
        "Name",
        "Origin",
        os.display_name()
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<20} {:<32} {:<8} {}",
            entry.id,
            entry.name,
            entry.origin,
            if entry.supported { "yes" } else { "-" }
        );
    }
    out
}

/// Loads the named session from `store`, or starts a fresh one.
pub async fn open_session(
    store: &dyn SessionStore,
    key: &str,
    catalog: ToolCatalog,
    resolver: OsResolver,
) -> Result<SetupSession> {
    match store.load(key).await? {
        Some(snapshot) => SetupSession::restore(snapshot, catalog, resolver),
        None => Ok(SetupSession::new(catalog, resolver)),
    }
}

/// Clears the named session without requiring it to restore. A snapshot
/// that is unreadable or no longer fits `catalog` is deleted instead.
pub async fn reset_session(
    store: &dyn SessionStore,
    key: &str,
    catalog: ToolCatalog,
    resolver: OsResolver,
) -> Result<ResetOutcome> {
    let restored = match store.load(key).await {
        Ok(Some(snapshot)) => SetupSession::restore(snapshot, catalog, resolver),
        Ok(None) => return Ok(ResetOutcome::Cleared),
        Err(err @ SetupError::Json(_)) => Err(err),
        Err(err) => return Err(err),
    };

    match restored {
        Ok(mut session) => {
            session.reset();
            store.save(key, &session.snapshot()).await?;
            Ok(ResetOutcome::Cleared)
        }
        Err(err) => {
            warn!(session = key, error = %err, "discarding session that no longer restores");
            store.delete(key).await?;
            Ok(ResetOutcome::Discarded)
        }
    }
}

/// Human-readable summary of a session: OS line plus the numbered selection.
pub fn describe_session(session: &SetupSession) -> String {
    let mut out = String::new();
    let os = session.active_os();
    let source = if session.chosen_os().is_some() {
        "chosen"
    } else {
        "detected"
    };
    let _ = writeln!(out, "Operating system: {} ({source})", os.display_name());
    if session.selection().is_empty() {
        let _ = writeln!(out, "No tools selected");
        return out;
    }
    let _ = writeln!(out, "Selected tools ({}):", session.selection().count());
    for (position, tool) in session.selected_tools().enumerate() {
        let note = if tool.commands().supports(os) {
            ""
        } else {
            " [unsupported]"
        };
        let _ = writeln!(out, "  {}. {} ({}){note}", position + 1, tool.name(), tool.id());
    }
    out
}
