//! Completions command implementation
//!
//! Handles the `iris completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Binary name used in generated scripts
pub const BIN_NAME: &str = "iris";

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// iris completions bash > /etc/bash_completion.d/iris
///
/// # Zsh
/// iris completions zsh > ~/.zfunc/_iris
///
/// # Fish
/// iris completions fish > ~/.config/fish/completions/iris.fish
/// ```
pub fn cmd_completions(shell: Shell, command: &mut Command) {
    write_completions(shell, command, &mut std::io::stdout());
}

/// Write the completion script for `command` to `out`
pub fn write_completions(shell: Shell, command: &mut Command, out: &mut dyn Write) {
    generate(shell, command, BIN_NAME, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn sample_command() -> Command {
        Command::new(BIN_NAME)
            .arg(Arg::new("backend").long("backend").global(true))
            .subcommand(Command::new("health"))
            .subcommand(Command::new("optimize").arg(Arg::new("file")))
            .subcommand(Command::new("compare"))
    }

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut sample_command(), &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("optimize"));
        assert!(script.contains("compare"));
        assert!(script.contains("--backend"));
    }

    #[test]
    fn test_all_major_shells_generate_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out = Vec::new();
            write_completions(shell, &mut sample_command(), &mut out);
            assert!(!out.is_empty(), "{shell} produced no output");
        }
    }
}
