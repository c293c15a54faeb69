use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::net::SocketAddr;
use tandem::RoomId;
use tandem::client::{
    ClientConfig, NullCapture, SessionController, SessionEvent, WebRtcConnector,
};
use tandem::server::{ServerConfig, serve};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandem", version, about = "Two-party call signaling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the rendezvous service.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: SocketAddr,

        /// Peers allowed per room.
        #[arg(long, default_value_t = tandem::utils::DEFAULT_ROOM_CAPACITY)]
        capacity: usize,
    },
    /// Join a room as a headless peer and negotiate a call.
    Join {
        #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
        url: String,

        /// Prompted for when omitted.
        #[arg(long)]
        room: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve { bind, capacity } => {
            println!(
                "{}",
                format!("Rendezvous service on ws://{bind}/ws").green().bold()
            );
            let config = ServerConfig::default()
                .with_bind_addr(bind)
                .with_room_capacity(capacity);
            serve(config).await
        }
        Commands::Join { url, room } => {
            let room = match room {
                Some(room) => room,
                None => Input::<String>::new()
                    .with_prompt("Room")
                    .validate_with(|input: &String| RoomId::new(input.as_str()).map(|_| ()))
                    .interact_text()
                    .context("Failed to read room name")?,
            };
            let room = RoomId::new(room).context("Invalid room name")?;
            join(&url, room).await
        }
    }
}

async fn join(url: &str, room: RoomId) -> Result<()> {
    println!("{}", format!("Joining room '{room}' via {url}").cyan());

    let (controller, mut handle) = SessionController::connect(
        url,
        room,
        ClientConfig::default(),
        WebRtcConnector,
        NullCapture,
    )
    .await
    .context("Failed to reach the rendezvous service")?;

    let events = async {
        loop {
            tokio::select! {
                event = handle.next_event() => match event {
                    Some(SessionEvent::PhaseChanged(phase)) => {
                        println!("{} {:?}", "phase".blue(), phase);
                    }
                    Some(SessionEvent::RemoteTrack(track)) => {
                        println!("{} {:?} {}", "remote track".green(), track.kind, track.id);
                    }
                    Some(SessionEvent::LocalStream(stream)) => {
                        println!("{} {}", "local stream".green(), stream.id);
                    }
                    Some(SessionEvent::Closed(reason)) => {
                        println!("{} {}", "closed:".yellow(), reason);
                        break;
                    }
                    Some(SessionEvent::Failed(reason)) => {
                        println!("{} {}", "failed:".red().bold(), reason);
                        break;
                    }
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    handle.leave();
                }
            }
        }
    };

    let (outcome, ()) = tokio::join!(controller.run(), events);
    let reason = outcome?;
    println!("{}", format!("Session ended ({reason})").green().bold());
    Ok(())
}
