//! Orderbot terminal chat client.
//!
//! Interactive shell against the orderbot gateway: each typed line is
//! sent with the last known session id, and both sides of the
//! conversation are rendered locally. Transport failures show up as a
//! chat line instead of ending the session.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use orderbot_common::config::ClientConfig;
use orderbot_common::logging::init_logging;

mod client;
mod transcript;

use client::GatewayClient;
use transcript::{Speaker, Transcript};

/// Orderbot - chat with the lead-collection assistant.
#[derive(Parser, Debug)]
#[command(name = "orderbot")]
#[command(version)]
#[command(about = "Terminal chat client for the orderbot gateway", long_about = None)]
struct Cli {
    /// Gateway base URL (overrides API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Send a single message and exit instead of entering the chat loop
    #[arg(short, long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    let client = GatewayClient::new(config)?;

    if let Some(message) = cli.message {
        // Single-shot mode: one turn, no transcript state worth keeping.
        let reply = client.chat(&message, None).await?;
        println!("{}", reply.answer);
        return Ok(());
    }

    run_shell(&client).await
}

/// Interactive chat loop over stdin.
async fn run_shell(client: &GatewayClient) -> Result<()> {
    println!("orderbot — type a message, /reset to start over, /quit to exit");
    println!("gateway: {}", client.api_base());
    if !client.health().await.unwrap_or(false) {
        println!("(warning: gateway is not reachable yet)");
    }
    println!();

    let mut transcript = Transcript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();

        match line.as_str() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                transcript.reset();
                println!("(session cleared — next message starts a new conversation)\n");
                continue;
            }
            "/history" => {
                if transcript.is_empty() {
                    println!("(no conversation yet)\n");
                } else {
                    for entry in transcript.entries() {
                        println!("{}> {}", entry.speaker.label(), entry.text);
                    }
                    println!();
                }
                continue;
            }
            _ => {}
        }

        transcript.push(Speaker::You, &line);

        // A failed call renders as a reply instead of failing the shell;
        // the session id is only updated on success.
        let result = client.chat(&line, transcript.session_id()).await;
        let answer = match result {
            Ok(reply) => {
                transcript.remember_session(reply.session_id);
                reply.answer
            }
            Err(e) => {
                tracing::debug!(error = %e, "chat call failed");
                format!("Backend error: {e}")
            }
        };

        transcript.push(Speaker::Bot, &answer);
        println!("{}> {}\n", Speaker::Bot.label(), answer);
    }

    Ok(())
}
