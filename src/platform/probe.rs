use tracing::debug;

use super::OperatingSystem;
use crate::config::EnvConfig;

/// Source of a best-guess platform. `None` means the signal was absent or
/// not one of the supported systems.
pub trait PlatformProbe: Send + Sync {
    fn probe(&self) -> Option<OperatingSystem>;
}

/// Reads `UGSETUP_OS` first, then the compile-time target OS.
#[derive(Clone, Debug)]
pub struct EnvProbe {
    override_signal: Option<String>,
    native: &'static str,
}

impl EnvProbe {
    pub fn new(override_signal: Option<String>, native: &'static str) -> Self {
        Self {
            override_signal,
            native,
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::os_override(), std::env::consts::OS)
    }
}

impl Default for EnvProbe {
    fn default() -> Self {
        Self::from_env()
    }
}

impl PlatformProbe for EnvProbe {
    fn probe(&self) -> Option<OperatingSystem> {
        if let Some(signal) = self.override_signal.as_deref() {
            match OperatingSystem::from_signal(signal) {
                Some(os) => return Some(os),
                None => debug!(signal, "ignoring unrecognized UGSETUP_OS"),
            }
        }
        OperatingSystem::from_signal(self.native)
    }
}

/// Probe returning a fixed answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedProbe(pub Option<OperatingSystem>);

impl PlatformProbe for FixedProbe {
    fn probe(&self) -> Option<OperatingSystem> {
        self.0
    }
}

pub struct OsResolver {
    probe: Box<dyn PlatformProbe>,
}

impl OsResolver {
    pub fn new(probe: impl PlatformProbe + 'static) -> Self {
        Self {
            probe: Box::new(probe),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvProbe::from_env())
    }

    /// Best-effort inference; inconclusive probes fall back to linux.
    pub fn detect(&self) -> OperatingSystem {
        self.probe.probe().unwrap_or(OperatingSystem::Linux)
    }

    /// An explicit choice always wins over detection.
    pub fn resolve_active(&self, choice: Option<OperatingSystem>) -> OperatingSystem {
        choice.unwrap_or_else(|| self.detect())
    }
}

impl Default for OsResolver {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_falls_back_to_linux() {
        let resolver = OsResolver::new(FixedProbe(None));
        assert_eq!(resolver.detect(), OperatingSystem::Linux);

        let resolver = OsResolver::new(EnvProbe::new(None, "plan9"));
        assert_eq!(resolver.detect(), OperatingSystem::Linux);
    }

    #[test]
    fn env_probe_prefers_recognized_override() {
        let probe = EnvProbe::new(Some("darwin".to_string()), "windows");
        assert_eq!(probe.probe(), Some(OperatingSystem::Macos));

        let probe = EnvProbe::new(Some("beos".to_string()), "windows");
        assert_eq!(probe.probe(), Some(OperatingSystem::Windows));
    }

    #[test]
    fn explicit_choice_wins() {
        let resolver = OsResolver::new(FixedProbe(Some(OperatingSystem::Linux)));
        assert_eq!(
            resolver.resolve_active(Some(OperatingSystem::Macos)),
            OperatingSystem::Macos
        );
        assert_eq!(resolver.resolve_active(None), OperatingSystem::Linux);
    }
}
