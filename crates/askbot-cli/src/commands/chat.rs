use anyhow::Context;
use askbot_chat::{Conversation, Input, Step};
use askbot_core::{Config, Role, Transcript, Turn};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use super::create_gateway;

const RULE_WIDTH: usize = 50;

pub async fn run(api_key: Option<String>, model: Option<&str>, config: &Config) -> anyhow::Result<()> {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "AI Q&A Bot (Powered by Cohere)".green().bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "Type {} or {} to end the conversation, {} to forget it, {} to review it\n",
        "quit".yellow(),
        "exit".yellow(),
        "/clear".yellow(),
        "/history".yellow()
    );

    let gateway = create_gateway(api_key, model, config).context("Failed to initialize")?;
    println!(
        "{} {} ({})\n",
        "Connected to".green(),
        gateway.provider_name(),
        gateway.model()
    );

    let chat_config = gateway.config().clone();
    let mut conversation = Conversation::new();
    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".cyan().bold()));

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("\n{}", "Goodbye! Thanks for chatting!".green());
                break;
            }
            Err(err) => {
                println!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        };

        match line.trim() {
            "/clear" => {
                conversation.clear();
                println!("{}\n", "Chat history cleared.".yellow());
                continue;
            }
            "/history" => {
                print_transcript(conversation.transcript());
                continue;
            }
            _ => {}
        }

        let input = chat_config.classify(&line);
        if let Input::Question(question) = &input {
            rl.add_history_entry(question.as_str())?;
            println!("\n{}\n", "Thinking...".dimmed());
        }

        match conversation.submit(&gateway, input).await {
            Step::Ignored => {
                println!("{}\n", "Please ask a question!".yellow());
            }
            Step::Ended => {
                println!("\n{}", "Goodbye! Thanks for chatting!".green());
                break;
            }
            Step::Answered { turn, failed } => {
                if failed {
                    println!("{} {}\n", "Bot:".magenta().bold(), turn.content().red());
                } else {
                    println!("{} {}\n", "Bot:".magenta().bold(), turn.content());
                }
                println!("{}\n", "-".repeat(RULE_WIDTH));
            }
        }
    }

    debug!(turns = conversation.transcript().len(), "chat session finished");
    Ok(())
}

fn print_transcript(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}\n", "No messages yet.".dimmed());
        return;
    }

    for turn in transcript {
        println!("{}", format_turn(turn));
    }
    println!();
}

fn format_turn(turn: &Turn) -> String {
    let speaker = match turn.role() {
        Role::User => "You:".cyan().bold(),
        Role::Assistant => "Bot:".magenta().bold(),
    };
    let content = if turn.is_failed() {
        turn.content().red()
    } else {
        turn.content().normal()
    };
    format!(
        "{} {} {}",
        format!("[{}]", turn.created_at().clock()).dimmed(),
        speaker,
        content
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_turn_labels_speaker() {
        colored::control::set_override(false);

        let line = format_turn(&Turn::user("What is 2+2?"));
        assert!(line.ends_with("You: What is 2+2?"));
        assert!(line.starts_with('['));

        let line = format_turn(&Turn::assistant("4"));
        assert!(line.ends_with("Bot: 4"));

        let line = format_turn(&Turn::assistant_failure("Error: Network error: reset"));
        assert!(line.ends_with("Bot: Error: Network error: reset"));
    }
}
