mod probe;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

pub use probe::{EnvProbe, FixedProbe, OsResolver, PlatformProbe};

/// Operating systems a generated script can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Linux,
    Macos,
    Windows,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 3] = [
        OperatingSystem::Linux,
        OperatingSystem::Macos,
        OperatingSystem::Windows,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "linux",
            OperatingSystem::Macos => "macos",
            OperatingSystem::Windows => "windows",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Macos => "macOS",
            OperatingSystem::Windows => "Windows",
        }
    }

    /// Maps a loose platform signal (`std::env::consts::OS`, user input,
    /// `UGSETUP_OS`) onto a supported system. `None` when unrecognized.
    pub fn from_signal(signal: &str) -> Option<Self> {
        match signal.trim().to_ascii_lowercase().as_str() {
            "linux" => Some(OperatingSystem::Linux),
            "macos" | "mac" | "darwin" | "osx" => Some(OperatingSystem::Macos),
            "windows" | "win" | "win32" | "win64" => Some(OperatingSystem::Windows),
            _ => None,
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingSystem {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_signal(s).ok_or_else(|| SetupError::UnknownOs(s.to_string()))
    }
}
