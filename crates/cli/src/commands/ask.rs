//! `persona ask`: Interactive or single-message chat in the terminal.

use std::io::Write;
use std::path::Path;

use persona_core::message::Message;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(config_path: &Path, message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    config.require_api_key()?;

    let agent = persona_agent::build_agent(&config)?;

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let reply = agent.chat(Vec::new(), &msg).await;
        eprint!("\r              \r");
        println!("{reply}");
        return Ok(());
    }

    println!();
    println!("  Persona, interactive mode");
    println!();
    println!("  Persona:   {}", agent.identity().name);
    println!("  Provider:  {}", config.provider_name());
    println!("  Model:     {}", agent.model());
    println!("  Context:   ~{} tokens", agent.identity().estimated_tokens());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history: Vec<Message> = Vec::new();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        eprint!("  ...");
        let reply = agent.chat(history.clone(), input).await;
        eprint!("\r     \r");

        println!();
        for line in reply.lines() {
            println!("  {} > {line}", agent.identity().name);
        }
        println!();

        history.push(Message::user(input));
        history.push(Message::assistant(reply));
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
