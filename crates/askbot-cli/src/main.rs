use askbot_core::config::LogLevel;
use askbot_core::Config;
use askbot_server::ServerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "askbot")]
#[command(author, version, about = "Ask a hosted language model questions from the terminal or a browser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true, env = "COHERE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier sent with every question
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Config file (defaults to ./askbot.toml, then ~/.askbot/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Ask a single question and exit
    Ask {
        /// The question to send
        question: String,
    },
    /// Start the browser chat UI
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "8501")]
        port: u16,
        /// Allowed CORS origin (repeatable; any origin when omitted)
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
        /// Drop browser sessions unused for this many seconds (0 keeps them)
        #[arg(long, default_value = "3600")]
        session_idle_secs: u64,
    },
}

fn init_tracing(verbose: u8, configured: LogLevel) {
    let level = match verbose {
        0 => configured.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_default()?,
    };
    Ok(config.merge_env()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_tracing(cli.verbose, config.general.log_level);

    let model = cli.model.as_deref();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            commands::chat::run(cli.api_key, model, &config).await?;
        }
        Commands::Ask { question } => {
            commands::ask::run(cli.api_key, model, &config, &question).await?;
        }
        Commands::Serve {
            host,
            port,
            cors_origins,
            session_idle_secs,
        } => {
            let server_config = ServerConfig::new()
                .with_host(host)
                .with_port(port)
                .with_session_idle_secs(session_idle_secs);
            let server_config = cors_origins
                .into_iter()
                .fold(server_config, |config, origin| config.with_cors_origin(origin));
            commands::serve::run(cli.api_key, model, &config, server_config).await?;
        }
    }

    Ok(())
}
