use anyhow::{ensure, Context, Result};
use log::debug;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

use super::{HandTracker, Observation, LANDMARK_COUNT};

/// Runs the hand-landmark detector as a child process
///
/// The helper owns the camera and the detection model; this side only
/// reads its stdout, one JSON observation per line. When the helper exits
/// (camera unplugged, read failure), the line stream ends and the game
/// loop shuts down.
pub struct ProcessTracker {
    // Held so the helper is killed when the tracker is dropped
    _child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl ProcessTracker {
    /// Spawn the helper command with the camera index as its last argument
    pub fn spawn(command_line: &str, camera_index: u32) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .context("tracker command must not be empty")?;

        let mut child = Command::new(program)
            .args(parts)
            .arg(camera_index.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn hand tracker: {command_line}"))?;

        debug!("hand tracker started (pid {:?})", child.id());

        let stdout = child
            .stdout
            .take()
            .context("tracker stdout was not captured")?;

        Ok(Self {
            _child: child,
            lines: BufReader::new(stdout).lines(),
        })
    }
}

impl HandTracker for ProcessTracker {
    async fn next_frame(&mut self) -> Result<Option<Observation>> {
        let line = self
            .lines
            .next_line()
            .await
            .context("failed to read from hand tracker")?;

        match line {
            Some(line) => parse_observation(&line).map(Some),
            None => Ok(None),
        }
    }
}

/// Parse one wire-format line into an observation
pub fn parse_observation(line: &str) -> Result<Observation> {
    let observation: Observation = serde_json::from_str(line)
        .with_context(|| format!("malformed tracker frame: {line}"))?;

    if let Some(hand) = &observation.hand {
        ensure!(
            hand.landmarks.len() == LANDMARK_COUNT,
            "expected {} landmarks, got {}",
            LANDMARK_COUNT,
            hand.landmarks.len()
        );
    }

    Ok(observation)
}
