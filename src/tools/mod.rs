pub mod builtin;
pub mod loader;
pub mod registry;
pub mod slug;
pub mod tool;

pub use builtin::builtin_tools;
pub use loader::{load_catalog_from_file, load_catalog_from_str, CatalogFile, ToolSpec};
pub use registry::ToolCatalog;
pub use slug::{slugify, unique_slug};
pub use tool::{Tool, ToolBuilder, ToolCommands, ToolOrigin};
