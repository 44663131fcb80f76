//! Death Note CLI — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use death_note::get_rule;
use death_note_cli::command::render_rules;
use death_note_cli::config::resolve_note_config;

#[derive(Parser)]
#[command(
    name = "death-note",
    about = "A note whose causes and details of death freeze shortly after each name is written",
    version
)]
struct Cli {
    /// Milliseconds a cause of death stays writable.
    /// Also reads DEATH_NOTE_CAUSE_WINDOW_MS.
    #[arg(long)]
    cause_window_ms: Option<u64>,

    /// Milliseconds the details of death stay writable.
    /// Also reads DEATH_NOTE_DETAILS_WINDOW_MS.
    #[arg(long)]
    details_window_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive REPL mode (default).
    Repl,

    /// Print every rule of the note.
    Rules,

    /// Print a single rule by its 1-based number.
    Rule {
        #[arg(allow_hyphen_values = true)]
        number: i64,
    },

    /// Print the resolved configuration as JSON.
    Info,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_note_config(cli.cause_window_ms, cli.details_window_ms)?;
    tracing::debug!(
        "Resolved windows: cause {} ms, details {} ms",
        config.cause_window.as_millis(),
        config.details_window.as_millis()
    );

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            death_note_cli::repl::run(config)?;
        }

        Commands::Rules => {
            println!("{}", render_rules());
        }

        Commands::Rule { number } => {
            println!("{}", get_rule(number)?);
        }

        Commands::Info => {
            let info = serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "config": config,
                "rule_count": death_note::rule_count(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "death-note", &mut std::io::stdout());
        }
    }

    Ok(())
}
