use askbot_core::Config;
use askbot_server::{shutdown_signal, Server, ServerConfig};
use colored::Colorize;

use super::create_gateway;

pub async fn run(
    api_key: Option<String>,
    model: Option<&str>,
    config: &Config,
    server_config: ServerConfig,
) -> anyhow::Result<()> {
    let gateway = create_gateway(api_key, model, config)?;

    println!("{}", "Starting askbot chat UI...".green().bold());
    println!(
        "Open {} in a browser",
        format!("http://{}:{}/", server_config.host, server_config.port).cyan()
    );
    println!("Press {} to stop\n", "Ctrl+C".yellow());

    let server = Server::new(server_config, gateway);
    server
        .run_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    println!("\n{}", "Server stopped.".green());
    Ok(())
}
