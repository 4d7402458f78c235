use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commit_prefixer::cli::orchestration::{self, ApplyArgs, HookArgs};
use commit_prefixer::hooks::{cleanup, HookInvocation, HookType};
use commit_prefixer::ui;

#[derive(Parser)]
#[command(
    name = "commit-prefixer",
    about = "Prefix commit messages with information from the branch name",
    version
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log prefixing decisions")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a commit message with the branch prefix applied
    Apply {
        #[arg(short, long, help = "Commit message (read from stdin when omitted)")]
        message: Option<String>,

        #[arg(short, long, help = "Branch name instead of the current branch")]
        branch: Option<String>,

        #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
        repo: PathBuf,
    },
    /// Entry point for the installed git hooks
    Hook {
        /// prepare-commit-msg or commit-msg
        hook: String,
        /// File holding the commit message
        file: PathBuf,
        /// Message source passed by git to prepare-commit-msg
        source: Option<String>,
        /// Commit passed by git to prepare-commit-msg
        sha: Option<String>,
    },
    /// Install the git hook for the configured mode
    Install {
        #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
        repo: PathBuf,

        #[arg(short, long, help = "Replace a hook not installed by commit-prefixer")]
        force: bool,
    },
    /// Remove the git hooks installed by commit-prefixer
    Uninstall {
        #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
        repo: PathBuf,
    },
    /// Write a default commitprefixer.toml to the project
    Init {
        #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
        repo: PathBuf,

        #[arg(short, long, help = "Overwrite an existing configuration")]
        force: bool,
    },
    /// Show the effective configuration
    Config {
        #[arg(short = 'C', long, default_value = ".", help = "Repository path")]
        repo: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("commit_prefixer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Read the commit message from stdin
///
/// Input that is not UTF-8 is returned as raw bytes in `Err`. A read
/// failure yields whatever was read before it.
fn read_message_from_stdin() -> std::result::Result<String, Vec<u8>> {
    let mut raw = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut raw) {
        tracing::warn!("Failed to read the commit message from stdin: {}", e);
    }

    String::from_utf8(raw).map_err(|e| {
        tracing::warn!("Commit message is not valid UTF-8, leaving it unchanged");
        e.into_bytes()
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Apply {
            message,
            branch,
            repo,
        } => {
            let message = match message {
                Some(message) => message,
                None => match read_message_from_stdin() {
                    Ok(message) => message,
                    Err(raw) => {
                        // not text we can prefix; hand it back untouched
                        let mut stdout = std::io::stdout();
                        if let Err(e) = stdout.write_all(&raw).and_then(|()| stdout.flush()) {
                            tracing::warn!("Failed to write the commit message: {}", e);
                        }
                        return Ok(());
                    }
                },
            };

            let outcome = orchestration::run_apply(&ApplyArgs {
                config_path: cli.config,
                repo,
                branch,
                message,
            });

            if cli.verbose {
                if let Some(reason) = outcome.reason() {
                    ui::display_fallback(reason);
                }
            }

            let message = outcome.into_message();
            print!("{}", message);
            if !message.ends_with('\n') {
                println!();
            }
        }
        Commands::Hook {
            hook,
            file,
            source,
            sha: _,
        } => {
            let hook_type = match hook.parse::<HookType>() {
                Ok(hook_type) => hook_type,
                Err(e) => {
                    tracing::warn!("{}", e);
                    return Ok(());
                }
            };

            orchestration::run_hook(&HookArgs {
                config_path: cli.config,
                repo: PathBuf::from("."),
                invocation: HookInvocation {
                    hook_type,
                    message_file: file,
                    source,
                },
                editor_used: cleanup::editor_used(std::env::var("GIT_EDITOR").ok().as_deref()),
            });
        }
        Commands::Install { repo, force } => {
            match orchestration::run_install(cli.config.as_deref(), &repo, force) {
                Ok(path) => ui::display_success(&format!("Installed {}", path.display())),
                Err(e) => {
                    ui::display_error(&format!("{:#}", e));
                    std::process::exit(1);
                }
            }
        }
        Commands::Uninstall { repo } => match orchestration::run_uninstall(&repo) {
            Ok(removed) if removed.is_empty() => {
                ui::display_status("No commit-prefixer hooks installed")
            }
            Ok(removed) => {
                for hook_type in removed {
                    ui::display_success(&format!("Removed {} hook", hook_type));
                }
            }
            Err(e) => {
                ui::display_error(&format!("{:#}", e));
                std::process::exit(1);
            }
        },
        Commands::Init { repo, force } => match orchestration::run_init(&repo, force) {
            Ok(path) => ui::display_success(&format!("Wrote {}", path.display())),
            Err(e) => {
                ui::display_error(&format!("{:#}", e));
                std::process::exit(1);
            }
        },
        Commands::Config { repo } => {
            match orchestration::run_show_config(cli.config.as_deref(), &repo) {
                Ok((config, pattern_error)) => {
                    print!("{}", ui::format_config(&config, pattern_error.as_deref()))
                }
                Err(e) => {
                    ui::display_error(&format!("Error loading config: {:#}", e));
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
