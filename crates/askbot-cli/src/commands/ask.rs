use askbot_core::Config;
use colored::Colorize;

use super::create_gateway;

pub async fn run(
    api_key: Option<String>,
    model: Option<&str>,
    config: &Config,
    question: &str,
) -> anyhow::Result<()> {
    let gateway = create_gateway(api_key, model, config)?;

    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Please ask a question!");
    }

    let answer = gateway.answer(question).await;
    if answer.failed {
        eprintln!("{}", answer.text.red());
        std::process::exit(1);
    }

    println!("{}", answer.text);
    Ok(())
}
