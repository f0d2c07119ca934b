use crate::platform::OperatingSystem;

/// Native shell conventions for one target OS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShellDialect {
    os: OperatingSystem,
}

impl ShellDialect {
    pub fn for_os(os: OperatingSystem) -> Self {
        Self { os }
    }

    pub fn os(&self) -> OperatingSystem {
        self.os
    }

    pub fn interpreter_marker(&self) -> &'static str {
        match self.os {
            OperatingSystem::Linux => "#!/usr/bin/env bash",
            OperatingSystem::Macos => "#!/bin/zsh",
            OperatingSystem::Windows => "#Requires -Version 5.1",
        }
    }

    /// Makes the script stop at the first failing command.
    pub fn strict_mode(&self) -> &'static str {
        match self.os {
            OperatingSystem::Linux | OperatingSystem::Macos => "set -e",
            OperatingSystem::Windows => "$ErrorActionPreference = \"Stop\"",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self.os {
            OperatingSystem::Linux | OperatingSystem::Macos => "sh",
            OperatingSystem::Windows => "ps1",
        }
    }

    /// Single-line comment; control characters are flattened so user text
    /// cannot escape the comment.
    pub fn comment(&self, text: &str) -> String {
        let flat: String = text
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        format!("# {}", flat.trim_end())
    }

    /// Prints `message` with single-quote escaping for the target shell.
    pub fn echo(&self, message: &str) -> String {
        let flat: String = message
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        match self.os {
            OperatingSystem::Linux | OperatingSystem::Macos => {
                format!("echo '{}'", flat.replace('\'', r"'\''"))
            }
            OperatingSystem::Windows => {
                let mut escaped = String::with_capacity(flat.len());
                for c in flat.chars() {
                    if is_powershell_quote(c) {
                        escaped.push(c);
                    }
                    escaped.push(c);
                }
                format!("Write-Host '{escaped}'")
            }
        }
    }
}

/// PowerShell accepts the typographic single quotes U+2018..=U+201B as
/// delimiters alongside `'`; each is escaped by doubling.
fn is_powershell_quote(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}'..='\u{201B}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_escapes_single_quotes() {
        let unix = ShellDialect::for_os(OperatingSystem::Linux);
        assert_eq!(unix.echo("it's"), r"echo 'it'\''s'");

        let windows = ShellDialect::for_os(OperatingSystem::Windows);
        assert_eq!(windows.echo("it's"), "Write-Host 'it''s'");
    }

    #[test]
    fn powershell_echo_doubles_typographic_quotes() {
        let windows = ShellDialect::for_os(OperatingSystem::Windows);
        assert_eq!(
            windows.echo("it\u{2019}s; Remove-Item C:\\ \u{2018}x\u{201B}"),
            "Write-Host 'it\u{2019}\u{2019}s; Remove-Item C:\\ \u{2018}\u{2018}x\u{201B}\u{201B}'"
        );
        assert_eq!(windows.echo("\u{201A}"), "Write-Host '\u{201A}\u{201A}'");

        let unix = ShellDialect::for_os(OperatingSystem::Linux);
        assert_eq!(unix.echo("it\u{2019}s"), "echo 'it\u{2019}s'");
    }

    #[test]
    fn comment_flattens_newlines() {
        let dialect = ShellDialect::for_os(OperatingSystem::Macos);
        assert_eq!(dialect.comment("evil\nrm -rf /"), "# evil rm -rf /");
    }

    #[test]
    fn markers_follow_native_shell() {
        assert!(ShellDialect::for_os(OperatingSystem::Linux)
            .interpreter_marker()
            .starts_with("#!"));
        assert_eq!(ShellDialect::for_os(OperatingSystem::Windows).file_extension(), "ps1");
    }
}
