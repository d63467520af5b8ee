//! Shell-style tokenization of the external publish CLI command.

use crate::{Error, Result};

/// Base argument vector for invoking the external publish CLI.
///
/// Parsed once from a shell-style command string (e.g. `npx dendron` or
/// `node "/opt/dendron cli/cli.js"`); subcommand arguments are appended
/// per pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommand(Vec<String>);

impl CliCommand {
    /// Tokenize `command` by shell-quoting rules.
    pub fn parse(command: &str) -> Result<Self> {
        let parts = shlex::split(command).ok_or_else(|| Error::CommandParse {
            command: command.to_string(),
        })?;
        if parts.is_empty() {
            return Err(Error::CommandParse {
                command: command.to_string(),
            });
        }
        Ok(Self(parts))
    }

    /// The base argv with `extra` subcommand arguments appended.
    #[must_use]
    pub fn arg_vec(&self, extra: &[&str]) -> Vec<String> {
        self.0
            .iter()
            .cloned()
            .chain(extra.iter().map(|s| (*s).to_string()))
            .collect()
    }
}
