use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use iris_cli::cmd::{self, compare::CompareOptions, CommandContext, OutputOptions};
use std::path::PathBuf;
use std::process;

/// Client for the IRis ML-guided compiler optimization service
///
/// iris uploads a C/C++ source file to the IRis backend, shows the LLVM pass
/// sequence a trained model predicts for it, and then measures that sequence
/// against the standard -O levels.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_color: bool,

    /// Backend base URL (overrides IRIS_BACKEND_URL and .iris.toml)
    #[arg(long, global = true, value_name = "URL")]
    backend: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the optimization backend is reachable
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict an optimization pass sequence for a source file
    Optimize {
        /// C/C++ source file (.c, .cpp, .cc, .cxx)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Prediction model: transformer, xgboost
        #[arg(short, long)]
        model: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also write a JSON report to this file
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// Benchmark the stored prediction against LLVM optimization levels
    Compare {
        /// Baseline levels, e.g. -l O2 -l O3 or -l O1,O3
        #[arg(short, long = "level", value_name = "LEVEL", value_delimiter = ',')]
        levels: Vec<String>,

        /// Timed runs per configuration (1-10)
        #[arg(short = 'n', long)]
        runs: Option<u32>,

        /// Show the full pass-by-pass breakdown
        #[arg(long)]
        pass_detail: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Also write a JSON report to this file
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// Break a pass sequence down against the -O2 and -O3 pipelines
    Passes {
        /// Passes to analyse (defaults to the stored prediction)
        #[arg(value_name = "PASS")]
        passes: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or discard the stored prediction
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Initialize iris configuration
    Init {
        /// Overwrite an existing .iris.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show the stored prediction and its age
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the stored prediction
    Clear,
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(e) = run(cli) {
        use iris_cli::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { force } => cmd::cmd_init(force),
        Commands::Completions { shell } => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        Commands::Health { json } => {
            let ctx = CommandContext::load(cli.backend)?;
            cmd::cmd_health(&ctx, json)
        }
        Commands::Optimize {
            file,
            model,
            json,
            report,
        } => {
            let ctx = CommandContext::load(cli.backend)?;
            cmd::cmd_optimize(&ctx, &file, model.as_deref(), &OutputOptions { json, report })
        }
        Commands::Compare {
            levels,
            runs,
            pass_detail,
            json,
            report,
        } => {
            let ctx = CommandContext::load(cli.backend)?;
            let options = CompareOptions {
                levels,
                num_runs: runs,
                pass_detail,
            };
            cmd::cmd_compare(&ctx, &options, &OutputOptions { json, report })
        }
        Commands::Passes { passes, json } => {
            let ctx = CommandContext::load(cli.backend)?;
            cmd::cmd_passes(&ctx, &passes, json)
        }
        Commands::Session { action } => {
            let ctx = CommandContext::load(cli.backend)?;
            match action {
                SessionAction::Show { json } => cmd::cmd_session_show(&ctx, json),
                SessionAction::Clear => cmd::cmd_session_clear(&ctx),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_compare_levels_accept_commas_and_repeats() {
        let cli = Cli::parse_from(["iris", "compare", "-l", "O1,O3", "--level", "O2", "-n", "5"]);
        match cli.command {
            Some(Commands::Compare { levels, runs, .. }) => {
                assert_eq!(levels, vec!["O1", "O3", "O2"]);
                assert_eq!(runs, Some(5));
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_backend_flag_is_global() {
        let cli = Cli::parse_from(["iris", "health", "--backend", "http://gpu-box:5001"]);
        assert_eq!(cli.backend.as_deref(), Some("http://gpu-box:5001"));
    }
}
