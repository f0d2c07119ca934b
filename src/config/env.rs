use std::env;
use std::path::PathBuf;

pub const OS_VAR: &str = "UGSETUP_OS";
pub const DEBUG_VAR: &str = "UGSETUP_DEBUG";
pub const CATALOG_VAR: &str = "UGSETUP_CATALOG";
pub const SESSION_DIR_VAR: &str = "UGSETUP_SESSION_DIR";

const DEFAULT_SESSION_DIR: &str = ".ugsetup";

/// Environment variable configuration
pub struct EnvConfig;

impl EnvConfig {
    /// Optional environment variable; an empty value counts as unset
    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }

    /// Override signal for platform detection (`UGSETUP_OS`)
    pub fn os_override() -> Option<String> {
        Self::get_env_optional(OS_VAR)
    }

    /// Default catalog extension file (`UGSETUP_CATALOG`)
    pub fn catalog_path() -> Option<PathBuf> {
        Self::get_env_optional(CATALOG_VAR).map(PathBuf::from)
    }

    /// Session snapshot directory (`UGSETUP_SESSION_DIR`, default `.ugsetup`)
    pub fn session_dir() -> PathBuf {
        Self::get_env_optional(SESSION_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Whether debug mode is enabled
    pub fn is_debug_mode() -> bool {
        env::var(DEBUG_VAR).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        env::remove_var("UGSETUP_TEST_MISSING");
        assert!(EnvConfig::get_env_optional("UGSETUP_TEST_MISSING").is_none());
    }

    #[test]
    fn test_blank_value_is_unset() {
        env::set_var("UGSETUP_TEST_BLANK", "  ");
        assert!(EnvConfig::get_env_optional("UGSETUP_TEST_BLANK").is_none());
        env::set_var("UGSETUP_TEST_BLANK", "macos");
        assert_eq!(
            EnvConfig::get_env_optional("UGSETUP_TEST_BLANK").as_deref(),
            Some("macos")
        );
        env::remove_var("UGSETUP_TEST_BLANK");
    }

    #[test]
    fn test_session_dir_default() {
        env::remove_var(SESSION_DIR_VAR);
        assert_eq!(EnvConfig::session_dir(), PathBuf::from(".ugsetup"));
    }
}
