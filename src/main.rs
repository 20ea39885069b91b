use anyhow::Result;
use clap::Parser;
use log::info;

use handsnake::game::GameConfig;
use handsnake::gesture::GestureConfig;
use handsnake::modes::PlayMode;
use handsnake::tracker::ProcessTracker;

#[derive(Parser)]
#[command(name = "handsnake")]
#[command(version, about = "Webcam-controlled Snake: steer with hand gestures")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "32")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: usize,

    /// Camera device index handed to the tracker helper
    #[arg(long, default_value = "0")]
    camera: u32,

    /// Command line that runs the hand-landmark detector helper
    #[arg(long, default_value = "python3 scripts/hand_tracker.py")]
    tracker_cmd: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let game_config = GameConfig::new(cli.width, cli.height);
    let gesture_config = GestureConfig::default();

    info!(
        "starting hand tracker: {} (camera {})",
        cli.tracker_cmd, cli.camera
    );
    let mut tracker = ProcessTracker::spawn(&cli.tracker_cmd, cli.camera)?;

    let mut play = PlayMode::new(game_config, gesture_config);
    play.run(&mut tracker).await?;

    Ok(())
}
