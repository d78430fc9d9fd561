//! Interactive track selection on the terminal.

use std::io::{self, BufRead, Write};

use subsync_core::{TrackDescriptor, TrackSelector};

/// Asks the user on stdin which subtitle track to use.
///
/// An empty answer, `q` or end of input cancels, which makes the sync fall
/// back to the video as reference.
///
/// The selector is called from inside the orchestrator's async code, so the
/// blocking read runs under `block_in_place`. That requires the multi-thread
/// runtime, which `#[tokio::main]` provides.
#[derive(Debug, Default)]
pub struct PromptSelector;

impl PromptSelector {
    pub fn new() -> Self {
        Self
    }
}

impl TrackSelector for PromptSelector {
    fn name(&self) -> &str {
        "prompt"
    }

    fn select_one(&self, tracks: &[TrackDescriptor]) -> Option<TrackDescriptor> {
        tokio::task::block_in_place(|| {
            let stdin = io::stdin();
            let mut stderr = io::stderr();
            choose_track(tracks, &mut stdin.lock(), &mut stderr)
        })
    }
}

/// Lists `tracks` on `output` and reads a 1-based choice from `input`.
///
/// Re-prompts on answers that are not a listed number.
pub fn choose_track<R: BufRead, W: Write>(
    tracks: &[TrackDescriptor],
    input: &mut R,
    output: &mut W,
) -> Option<TrackDescriptor> {
    if tracks.is_empty() {
        return None;
    }

    let _ = writeln!(output, "Several subtitle tracks found:");
    for (i, track) in tracks.iter().enumerate() {
        let _ = writeln!(output, "  {}) {}", i + 1, track.display_name);
    }

    loop {
        let _ = write!(
            output,
            "Use which track as reference? [1-{}, empty to use the video] ",
            tracks.len()
        );
        let _ = output.flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }

        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return None;
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=tracks.len()).contains(&n) => return Some(tracks[n - 1].clone()),
            _ => {
                let _ = writeln!(output, "Not a track number: {}", answer);
            }
        }
    }
}
