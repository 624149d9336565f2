//! End-to-end speech demo against a running synthesizer.
//!
//! Synthesizes the given text, extracts its viseme track, and plays the
//! audio with lip-sync driven on a headless rig, printing the mouth state
//! as it changes. Requires a VOICEVOX-compatible server.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;

use mimika_rig::{Rig, RigDescriptor};
use mimika_speech::{extract_visemes, LipSyncPlayer, VoicevoxClient};

pub fn run(text: &str, url: &str, speaker: u32) -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let client = VoicevoxClient::new(url);
    let result = runtime
        .block_on(client.synthesize(text, speaker))
        .with_context(|| format!("synthesizing via {url}"))?;

    let visemes = extract_visemes(&result.query);
    println!(
        "{} {} bytes of audio, {} viseme events",
        "synthesized".green().bold(),
        result.audio.len(),
        visemes.len()
    );

    let mut rig = Rig::from_descriptor(&RigDescriptor::humanoid());
    let mut player = LipSyncPlayer::new().context("opening audio output")?;
    let track_end = visemes.last().map(|v| v.end()).unwrap_or(0.0);
    player.play(result.audio, visemes, &mut rig)?;

    let mut last_line = String::new();
    while player.is_playing() {
        player.update(&mut rig);
        let line = mouth_state(&rig);
        if line != last_line {
            println!("  {line}");
            last_line = line;
        }
        thread::sleep(Duration::from_millis(16));
    }

    println!("{} ({track_end:.2}s of visemes)", "done".green().bold());
    Ok(ExitCode::SUCCESS)
}

/// One-line summary of the loudest vowel channel.
fn mouth_state(rig: &Rig) -> String {
    let mut best: Option<(mimika_rig::Expression, f32)> = None;
    for expression in mimika_rig::Expression::VOWELS {
        if let Some(weight) = rig.expression(expression) {
            if weight > 0.01 && best.map(|(_, w)| weight > w).unwrap_or(true) {
                best = Some((expression, weight));
            }
        }
    }
    match best {
        Some((expression, weight)) => format!("{expression} {weight:.2}"),
        None => "-".to_string(),
    }
}
