//! Mimika CLI - headless tools for the avatar animation runtime.
//!
//! This binary provides commands for simulating gestures without a
//! renderer, inspecting viseme extraction, and running the full speech
//! pipeline against a local synthesizer.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mimika_cli::commands;

/// Mimika - voice-driven avatar animation runtime
#[derive(Parser)]
#[command(name = "mimika")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a gesture headlessly and report bone movement
    Simulate {
        /// Gesture name from the catalog (e.g. wave, bow, lookLeft)
        #[arg(short, long)]
        gesture: String,

        /// Path to a rig descriptor JSON (default: built-in humanoid)
        #[arg(long)]
        rig: Option<String>,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Base seed for blink timing and gesture variation
        #[arg(long, default_value = "42")]
        seed: u32,

        /// Output machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Extract viseme events from a saved synthesizer audio query
    Visemes {
        /// Path to the audio query JSON file
        #[arg(short, long)]
        query: String,

        /// Output machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Synthesize text and play it with live lip-sync (needs a synthesizer)
    Speak {
        /// Text to speak
        #[arg(short, long)]
        text: String,

        /// Synthesizer base URL
        #[arg(long, default_value = "http://127.0.0.1:50021")]
        url: String,

        /// Speaker style id
        #[arg(long, default_value = "1")]
        speaker: u32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            gesture,
            rig,
            fps,
            seed,
            json,
        } => commands::simulate::run(&gesture, rig.as_deref(), fps, seed, json),
        Commands::Visemes { query, json } => commands::visemes::run(&query, json),
        Commands::Speak { text, url, speaker } => commands::speak::run(&text, &url, speaker),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
