use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};

use ugsetup::cli::{
    build_catalog, build_one_shot_session, describe_session, open_session, order_generate_steps,
    render_tool_table, reset_session, tool_entries, ResetOutcome,
};
use ugsetup::config::EnvConfig;
use ugsetup::utils::LoggingConfig;
use ugsetup::{
    FileStore, OperatingSystem, OsResolver, ScriptResult, SessionStore, SetupSession, ToolCommands,
};

#[derive(Parser)]
#[command(
    name = "ugsetup",
    version,
    about = "Generate an install script for your development tools",
    author
)]
struct Cli {
    /// Extra tools to add to the catalog (JSON)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the operating system detected for this machine
    Detect,
    /// List catalog tools
    Tools {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        os: Option<OperatingSystem>,
        #[arg(long)]
        json: bool,
    },
    /// Build a script in one go
    Generate {
        #[arg(long)]
        os: Option<OperatingSystem>,
        /// Tool identifier, repeatable
        #[arg(long = "tool", short = 't')]
        tools: Vec<String>,
        /// Custom tool as NAME=OS:COMMAND, repeatable. Script sections follow
        /// the order of --tool and --custom on the command line
        #[arg(long = "custom")]
        custom: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Step through the wizard across invocations
    Session {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long, default_value = "default")]
        name: String,
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand)]
enum SessionCommand {
    #[command(flatten)]
    Edit(EditCommand),
    Show,
    Script {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Clear selection and OS choice; discards a session that no longer loads
    Reset,
}

/// Session steps that change and save the session.
#[derive(Subcommand)]
enum EditCommand {
    SelectOs {
        os: OperatingSystem,
    },
    Toggle {
        id: String,
    },
    Add {
        name: String,
        #[arg(long)]
        linux: Option<String>,
        #[arg(long)]
        macos: Option<String>,
        #[arg(long)]
        windows: Option<String>,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Write the script here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    match cli.command {
        Command::Detect => handle_detect(),
        Command::Tools { search, os, json } => {
            handle_tools(cli.catalog.as_deref(), search, os, json)?
        }
        Command::Generate {
            os,
            tools,
            custom,
            output,
        } => {
            let args = matches.subcommand_matches("generate");
            let tools = indexed_values(args, "tools", &tools);
            let custom = indexed_values(args, "custom", &custom);
            handle_generate(cli.catalog.as_deref(), os, &tools, &custom, output)?
        }
        Command::Session { dir, name, command } => {
            handle_session(cli.catalog.as_deref(), dir, name, command).await?
        }
    }
    Ok(())
}

fn handle_detect() {
    let os = OsResolver::from_env().detect();
    println!("{}", os);
}

fn handle_tools(
    catalog: Option<&Path>,
    search: Option<String>,
    os: Option<OperatingSystem>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = build_catalog(catalog)?;
    let os = OsResolver::from_env().resolve_active(os);
    let entries = tool_entries(catalog.search(search.as_deref().unwrap_or("")), os);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No tools match `{}`", search.unwrap_or_default());
    } else {
        print!("{}", render_tool_table(&entries, os));
    }
    Ok(())
}

/// Pairs each value of a repeated argument with its command-line index.
fn indexed_values<'a>(
    matches: Option<&ArgMatches>,
    id: &str,
    values: &'a [String],
) -> Vec<(usize, &'a str)> {
    let values = values.iter().map(String::as_str);
    match matches.and_then(|matches| matches.indices_of(id)) {
        Some(indices) => indices.zip(values).collect(),
        None => values.enumerate().collect(),
    }
}

fn handle_generate(
    catalog: Option<&Path>,
    os: Option<OperatingSystem>,
    tools: &[(usize, &str)],
    custom: &[(usize, &str)],
    output: OutputArgs,
) -> anyhow::Result<()> {
    let steps = order_generate_steps(tools, custom)?;
    let session =
        build_one_shot_session(build_catalog(catalog)?, OsResolver::from_env(), os, steps)?;
    let result = session.generate()?;
    emit_script(&result, &output)
}

async fn handle_session(
    catalog: Option<&Path>,
    dir: Option<PathBuf>,
    name: String,
    command: SessionCommand,
) -> anyhow::Result<()> {
    let store = FileStore::new(dir.unwrap_or_else(EnvConfig::session_dir));
    let catalog = build_catalog(catalog)?;
    let resolver = OsResolver::from_env();

    if let SessionCommand::Reset = command {
        let outcome = reset_session(&store, &name, catalog, resolver)
            .await
            .with_context(|| format!("failed to reset session `{name}`"))?;
        match outcome {
            ResetOutcome::Cleared => println!("Session `{name}` reset"),
            ResetOutcome::Discarded => {
                println!("Session `{name}` could not be restored and was discarded")
            }
        }
        return Ok(());
    }

    let mut session = open_session(&store, &name, catalog, resolver)
        .await
        .with_context(|| format!("failed to open session `{name}`"))?;

    match command {
        SessionCommand::Edit(edit) => {
            apply_edit(&mut session, edit)?;
            store.save(&name, &session.snapshot()).await?;
        }
        SessionCommand::Show => print!("{}", describe_session(&session)),
        SessionCommand::Script { output } => {
            let result = session.generate()?;
            emit_script(&result, &output)?;
        }
        SessionCommand::Reset => {}
    }
    Ok(())
}

fn apply_edit(session: &mut SetupSession, edit: EditCommand) -> anyhow::Result<()> {
    match edit {
        EditCommand::SelectOs { os } => {
            session.select_os(os);
            println!("Target operating system: {}", os.display_name());
        }
        EditCommand::Toggle { id } => {
            if session.catalog().lookup(&id).is_none() {
                bail!("unknown tool `{id}` (see `ugsetup tools`)");
            }
            let state = session.toggle_tool(&id);
            let verb = if state.is_selected() { "Selected" } else { "Removed" };
            println!("{verb} `{id}` ({} selected)", session.selection().count());
        }
        EditCommand::Add {
            name,
            linux,
            macos,
            windows,
        } => {
            let commands: ToolCommands = [
                (OperatingSystem::Linux, linux),
                (OperatingSystem::Macos, macos),
                (OperatingSystem::Windows, windows),
            ]
            .into_iter()
            .filter_map(|(os, command)| command.map(|command| (os, command)))
            .collect();
            let tool = session.add_custom_tool(&name, commands)?;
            println!("Added custom tool `{}` as `{}`", tool.name(), tool.id());
        }
    }
    Ok(())
}

fn emit_script(result: &ScriptResult, output: &OutputArgs) -> anyhow::Result<()> {
    for id in &result.unsupported_tools {
        eprintln!("warning: `{id}` has no install command for {}", result.os);
    }

    let content = if output.json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        result.text.clone()
    };

    match &output.output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            println!("Script written to `{}`", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
