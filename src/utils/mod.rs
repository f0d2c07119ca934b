/// Shared helpers
pub mod logging;
pub mod validation;

pub use logging::LoggingConfig;
pub use validation::ToolValidator;
