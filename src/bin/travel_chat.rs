//! Terminal front-end for a running travel planner server.

use clap::Parser;
use dotenv::dotenv;
use philippine_travel_agent::client::{ ChatSession, HttpTransport, SubmitOutcome };
use std::error::Error;
use tokio::io::{ self, AsyncBufReadExt, AsyncWriteExt, BufReader };

#[derive(Parser, Debug)]
#[command(author, version, about = "Chat with the Philippine travel planner from a terminal")]
struct ReplArgs {
    /// Chat endpoint of a running server.
    #[arg(long, env = "TRAVEL_CHAT_ENDPOINT", default_value = "http://127.0.0.1:3000/api/chat")]
    endpoint: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = ReplArgs::parse();

    let transport = HttpTransport::new(args.endpoint);
    let mut session = ChatSession::new();
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    if let Some(greeting) = session.messages.first() {
        stdout.write_all(format!("assistant> {}\n", greeting.content).as_bytes()).await?;
    }

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                break;
            }
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        session.input = line;
        match session.submit(&transport).await {
            SubmitOutcome::Ignored => {
                continue;
            }
            SubmitOutcome::Replied | SubmitOutcome::Failed => {}
        }

        let mut out = String::new();
        if let Some(reply) = session.messages.last() {
            out.push_str(&format!("assistant> {}\n", reply.content));
        }
        if !session.markers.is_empty() {
            out.push_str("map:\n");
            for marker in &session.markers {
                out.push_str(&format!("  * {} ({:.4}, {:.4})\n", marker.title, marker.lat, marker.lng));
            }
        }
        stdout.write_all(out.as_bytes()).await?;
    }

    Ok(())
}
