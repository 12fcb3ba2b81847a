mod config;
mod cue;
mod error;
mod handlers;
mod models;
mod parser;
mod services;
mod view;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};

use config::Config;
use handlers::{Analyzer, Session};
use models::Step;
use services::OpenAiClient;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv().ok();

    log::info!("🚀 Starting calsnap...");

    let config = Config::from_env()?;
    let model = Arc::new(OpenAiClient::new(&config));
    log::info!("✅ Chat-completion client ready (model: {})", config.model);

    let mut session = Session::new(Analyzer::new(model));

    println!("📷 Calorie & Nutrient Calculator");
    print_hints(session.step());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}> ", session.step());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or("").trim();

        match command {
            "open" if session.step() == Step::Upload => {
                if rest.is_empty() {
                    println!("Usage: open <path-to-image>");
                } else {
                    session.select_image(Path::new(rest));
                    if let Some(image) = session.image() {
                        println!("{}", view::render_preview(image));
                        println!("Type 'analyze' to continue, or 'back' to pick another photo.");
                    }
                }
            }
            "analyze" if session.step() == Step::Preview => {
                session.analyze().await;
                if let Some(result) = session.result() {
                    println!("{}", view::render_result(result));
                }
            }
            "again" | "reanalyze" if session.step() == Step::Result => {
                session.analyze().await;
                if let Some(result) = session.result() {
                    println!("{}", view::render_result(result));
                }
            }
            "back" => {
                session.back();
                print_hints(session.step());
            }
            "help" => print_hints(session.step()),
            "quit" | "exit" => break,
            _ => println!("Unknown command for the {} step. Type 'help'.", session.step()),
        }

        for alert in session.take_alerts() {
            println!("⚠️ {}", alert);
        }
    }

    log::info!("🛑 Shutting down...");
    Ok(())
}

fn print_hints(step: Step) {
    match step {
        Step::Upload => {
            println!("📂 Pick a food photo: open <path-to-image>");
        }
        Step::Preview => {
            println!("🔍 'analyze' runs the nutrition analysis; 'back' returns to upload.");
        }
        Step::Result => {
            println!("🔄 'again' re-runs the analysis; 'back' returns to the preview.");
        }
    }
    println!("   ('help' shows this text, 'quit' exits.)");
}
