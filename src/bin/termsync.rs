//! termsync - run one command synchronously with captured, settled output
//!
//! Thin CLI over the library: parses options, initializes logging, runs a
//! single command through a `Terminal` session and mirrors its captured
//! output, exiting with the child's status.

use std::env;
use std::path::PathBuf;
use std::process;

use tracing::{debug, error, info};

use termsync::config::TerminalConfig;
use termsync::error::Result;
use termsync::{ExecutionOutcome, Terminal};

/// Command-line options
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Working directory override
    working_dir: Option<PathBuf>,
    /// Timeout override in milliseconds
    timeout_ms: Option<u64>,
    /// Settle window override in milliseconds
    settle_ms: Option<u64>,
    /// Escalate failures to a non-zero exit with diagnostics
    break_on_error: bool,
    /// The command to execute
    command: Option<String>,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse(args: &[String]) -> Result<Self> {
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    if i + 1 < args.len() {
                        app_args.config_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing config file path".into());
                    }
                }
                "--dir" | "-C" => {
                    if i + 1 < args.len() {
                        app_args.working_dir = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    } else {
                        return Err("Missing working directory".into());
                    }
                }
                "--timeout" | "-t" => {
                    if i + 1 < args.len() {
                        app_args.timeout_ms = args[i + 1].parse().ok();
                        i += 1;
                    } else {
                        return Err("Missing timeout value".into());
                    }
                }
                "--settle" | "-s" => {
                    if i + 1 < args.len() {
                        app_args.settle_ms = args[i + 1].parse().ok();
                        i += 1;
                    } else {
                        return Err("Missing settle window value".into());
                    }
                }
                "--break-on-error" | "-b" => {
                    app_args.break_on_error = true;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-?" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("termsync v{}", env!("CARGO_PKG_VERSION"));
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                _ => {
                    // Everything from the first positional on is the command
                    app_args.command = Some(args[i..].join(" "));
                    break;
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("termsync - run a command synchronously with captured, settled output");
    println!();
    println!("USAGE:");
    println!("    termsync [OPTIONS] <command>...");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -C, --dir <PATH>       Working directory for the command");
    println!("    -t, --timeout <MS>     Timeout in milliseconds");
    println!("    -s, --settle <MS>      Settle window in milliseconds");
    println!("    -b, --break-on-error   Treat command failures as fatal");
    println!("    -d, --debug            Enable debug logging");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    termsync looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $TERMSYNC_CONFIG");
    println!("    3. $XDG_CONFIG_HOME/termsync/config.toml");
    println!("    4. ~/.termsync/config.toml");
    println!("    5. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    TERMSYNC_CONFIG        Path to configuration file");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    let args = AppArgs::parse(&raw_args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        print_help();
        process::exit(1);
    });

    // Initialize logging based on debug flag
    let log_level = if args.debug { "debug" } else { "warn" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let Some(command) = args.command.clone() else {
        eprintln!("No command given");
        print_help();
        process::exit(1);
    };

    let config = load_configuration(&args);
    let mut terminal = Terminal::with_config(&config);
    if let Some(dir) = &args.working_dir {
        terminal.set_working_dir(dir.clone());
    }
    if let Some(ms) = args.timeout_ms {
        terminal.set_timeout(Some(std::time::Duration::from_millis(ms)));
    }
    if let Some(ms) = args.settle_ms {
        terminal.set_settle_window(std::time::Duration::from_millis(ms));
    }
    if args.break_on_error {
        terminal.set_break_on_error(true);
    }

    match terminal.execute(&command).await {
        Ok(result) => {
            // Captured lines carry no terminators; re-add them per line
            for line in terminal.info_lines() {
                println!("{}", line);
            }
            for line in terminal.error_lines() {
                eprintln!("{}", line);
            }
            if result.outcome == ExecutionOutcome::TimedOut {
                info!("command timed out after {:?}", result.duration);
                process::exit(124);
            }
            process::exit(result.status);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> TerminalConfig {
    if let Some(path) = &args.config_path {
        debug!("Loading config from: {}", path.display());
        match TerminalConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config from {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    } else {
        TerminalConfig::load()
    }
}
