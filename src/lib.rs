pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod script;
pub mod state;
pub mod tools;
pub mod utils;

pub use error::{Result, SetupError};
pub use platform::{EnvProbe, FixedProbe, OperatingSystem, OsResolver, PlatformProbe};
pub use script::{generate, ScriptGenerator, ScriptResult, ShellDialect};
pub use state::{
    FileStore, Intent, IntentOutcome, MemoryStore, SelectionSet, SelectionState, SessionSnapshot,
    SessionStore, SetupSession, SharedSession,
};
pub use tools::{
    builtin_tools, load_catalog_from_file, load_catalog_from_str, slugify, Tool, ToolBuilder,
    ToolCatalog, ToolCommands, ToolOrigin,
};
pub use utils::{logging, validation};
