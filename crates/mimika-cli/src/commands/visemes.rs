//! Viseme extraction over a saved synthesizer query.

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;

use mimika_speech::{extract_visemes, AudioQuery};

pub fn run(query_path: &str, json_output: bool) -> anyhow::Result<ExitCode> {
    let text = fs::read_to_string(query_path)
        .with_context(|| format!("reading audio query {query_path}"))?;
    let query: AudioQuery =
        serde_json::from_str(&text).with_context(|| "parsing audio query JSON")?;

    let visemes = extract_visemes(&query);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&visemes)?);
        return Ok(ExitCode::SUCCESS);
    }

    if visemes.is_empty() {
        println!("{} query contains no moras", "empty:".yellow().bold());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{} {} events over {:.3}s",
        "extracted".green().bold(),
        visemes.len(),
        visemes.last().map(|v| v.end()).unwrap_or(0.0)
    );
    println!("  {:>8}  {:>8}  phoneme", "start", "duration");
    for viseme in &visemes {
        println!(
            "  {:>8.3}  {:>8.3}  {:?}",
            viseme.time, viseme.duration, viseme.phoneme
        );
    }
    Ok(ExitCode::SUCCESS)
}
