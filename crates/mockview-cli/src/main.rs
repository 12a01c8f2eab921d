use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod commands;
mod logging;
mod repl;

#[derive(Parser)]
#[command(name = "mockview")]
#[command(about = "MOCKVIEW - Mock interview practice with adaptive follow-ups", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command. Flags override `config.toml`.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ollama server URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Role catalog JSON file
    #[arg(long, global = true)]
    pub roles: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `mockview_application=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive interview
    Interview {
        /// Role to interview for
        #[arg(short, long)]
        role: String,

        /// Interaction mode: chat or voice
        #[arg(short, long, default_value = "chat")]
        mode: String,
    },
    /// List available roles
    Roles,
    /// Check that the language model is reachable
    Health,
    /// List models the backend can serve
    Models,
    /// Show past interviews
    History {
        /// Maximum number of sessions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the transcript of an archived session
    Transcript {
        /// Session id
        session_id: String,
    },
    /// Write a default config.toml if none exists
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.global.log_level.as_deref());

    let load = || app::App::load(&cli.global);

    match cli.command {
        Commands::Interview { ref role, ref mode } => repl::run(&load()?, role, mode).await?,
        Commands::Roles => commands::roles::list(&load()?),
        Commands::Health => commands::backend::health(&load()?).await,
        Commands::Models => commands::backend::models(&load()?).await?,
        Commands::History { limit } => commands::history::show(&load()?, limit).await?,
        Commands::Transcript { ref session_id } => {
            commands::history::transcript(&load()?, session_id).await?
        }
        Commands::InitConfig => commands::config::init(&cli.global)?,
    }

    Ok(())
}
