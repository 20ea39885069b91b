use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::gesture::{GestureConfig, MotionClassifier, SpeedCurve};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{SessionMetrics, TrackerStats};
use crate::render::Renderer;
use crate::tracker::{HandFrame, HandTracker, Observation};

/// The interactive gesture-controlled game session
///
/// Owns the game, classifier and UI state; the hand tracker is passed into
/// [`PlayMode::run`] so any [`HandTracker`] implementation can drive it.
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    classifier: MotionClassifier,
    speed_curve: SpeedCurve,
    session: SessionMetrics,
    tracker_stats: TrackerStats,
    renderer: Renderer,
    input_handler: InputHandler,
    current_speed: u32,
    pending_direction: Option<Direction>,
    latest_hand: Option<HandFrame>,
    last_tick: Instant,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(game_config: GameConfig, gesture_config: GestureConfig) -> Self {
        let mut engine = GameEngine::new(game_config);
        let state = engine.reset();
        let speed_curve = SpeedCurve::new(&gesture_config);

        Self {
            engine,
            state,
            classifier: MotionClassifier::new(&gesture_config),
            speed_curve,
            session: SessionMetrics::new(),
            tracker_stats: TrackerStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            current_speed: speed_curve.min_speed(),
            pending_direction: None,
            latest_hand: None,
            last_tick: Instant::now(),
            should_quit: false,
        }
    }

    pub async fn run<T: HandTracker>(&mut self, tracker: &mut T) -> Result<()> {
        // Setup terminal. The TUI lives on stdout; stderr stays free for
        // the logger.
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, tracker).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop<T: HandTracker>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        tracker: &mut T,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        // The game tick rate follows the hand, so instead of a fixed tick
        // interval a fast pacing timer checks whether 1/speed has elapsed.
        let pace_interval = Duration::from_millis(10);
        let mut pace_timer = interval(pace_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Camera frame: landmarks in, direction and speed out
                maybe_frame = tracker.next_frame() => {
                    match maybe_frame? {
                        Some(observation) => self.ingest(observation),
                        None => {
                            // Camera stopped delivering frames; the only
                            // handled failure is to shut down.
                            warn!("hand tracker stream ended");
                            self.should_quit = true;
                        }
                    }
                }

                // Advance the game when a tick period has elapsed
                _ = pace_timer.tick() => {
                    self.advance_if_due();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            self.latest_hand.as_ref(),
                            self.current_speed,
                            &self.session,
                            &self.tracker_stats,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    info!("quit requested");
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Fold one tracker observation into the session
    ///
    /// A frame with a hand updates the speed and may propose a turn. A
    /// frame without one changes nothing: the previous speed and direction
    /// persist, only the skeleton panel goes blank.
    fn ingest(&mut self, observation: Observation) {
        self.tracker_stats.record(observation.hand.is_some());

        if let Some(hand) = &observation.hand {
            self.current_speed = self.speed_curve.speed_for_span(hand.span());

            if let Some(direction) = self.classifier.observe(hand.palm()) {
                self.pending_direction = Some(direction);
            }
        }

        self.latest_hand = observation.hand;
    }

    /// Advance one game tick if the current speed says one is due
    fn advance_if_due(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let period = Duration::from_secs_f64(1.0 / f64::from(self.current_speed));
        if self.last_tick.elapsed() < period {
            return;
        }

        let action = self
            .pending_direction
            .take()
            .map(Action::Turn)
            .unwrap_or(Action::Continue);

        let outcome = self.engine.step(&mut self.state, action);
        self.last_tick = Instant::now();

        if outcome.ate_food {
            debug!("food eaten, score {}", self.state.score);
        }

        if outcome.terminated() {
            info!(
                "game over after {} ticks, final score {}",
                self.state.ticks, self.state.score
            );
            self.session.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.classifier.reset();
        self.pending_direction = None;
        self.current_speed = self.speed_curve.min_speed();
        self.last_tick = Instant::now();
        self.session.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Landmark, ScriptedTracker, LANDMARK_COUNT, MIDDLE_FINGER_TIP, WRIST};

    fn mode() -> PlayMode {
        PlayMode::new(GameConfig::small(), GestureConfig::default())
    }

    /// A full hand with the wrist at (x, y) and the given span
    fn hand_at(x: f32, y: f32, span: f32) -> Observation {
        let mut landmarks = vec![Landmark { x, y }; LANDMARK_COUNT];
        landmarks[WRIST] = Landmark { x, y };
        landmarks[MIDDLE_FINGER_TIP] = Landmark { x, y: y - span };
        Observation {
            hand: Some(HandFrame { landmarks }),
        }
    }

    fn no_hand() -> Observation {
        Observation { hand: None }
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.current_speed, 5);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.state.phase = crate::game::Phase::GameOver;
        mode.current_speed = 17;
        mode.pending_direction = Some(Direction::Up);

        mode.reset_game();

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
        assert_eq!(mode.current_speed, 5);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_hand_motion_becomes_pending_direction() {
        let mut mode = mode();

        // Wrist drifts right by ~0.1 of the frame: 64px on a 640px frame
        mode.ingest(hand_at(0.5, 0.5, 0.25));
        mode.ingest(hand_at(0.6, 0.5, 0.25));

        assert_eq!(mode.pending_direction, Some(Direction::Right));
        // Span 0.25 maps halfway up the speed range, truncating
        assert_eq!(mode.current_speed, 12);
    }

    #[test]
    fn test_no_hand_keeps_speed_and_direction() {
        let mut mode = mode();

        mode.ingest(hand_at(0.5, 0.5, 0.4));
        assert_eq!(mode.current_speed, 20);

        mode.ingest(no_hand());
        assert_eq!(mode.current_speed, 20);
        assert!(mode.latest_hand.is_none());
    }

    #[test]
    fn test_tick_pacing() {
        let mut mode = mode();
        mode.state.food = crate::game::Position::new(0, 0);

        // Not due yet: last tick just happened
        mode.last_tick = Instant::now();
        mode.advance_if_due();
        assert_eq!(mode.state.ticks, 0);

        // A full second at 5 Hz is overdue
        mode.last_tick = Instant::now() - Duration::from_secs(1);
        mode.advance_if_due();
        assert_eq!(mode.state.ticks, 1);

        // The pacer rearms after a tick
        mode.advance_if_due();
        assert_eq!(mode.state.ticks, 1);
    }

    #[test]
    fn test_no_tick_while_game_over() {
        let mut mode = mode();
        mode.state.phase = crate::game::Phase::GameOver;
        mode.last_tick = Instant::now() - Duration::from_secs(5);

        mode.advance_if_due();
        assert_eq!(mode.state.ticks, 0);
    }

    #[tokio::test]
    async fn test_scripted_tracker_drives_ingest() {
        let mut mode = mode();
        let mut tracker = ScriptedTracker::new(vec![
            hand_at(0.5, 0.5, 0.25),
            no_hand(),
            hand_at(0.5, 0.4, 0.25),
        ]);

        while let Some(observation) = tracker.next_frame().await.unwrap() {
            mode.ingest(observation);
        }

        // 0.1 of frame height upward: 48px on a 480px frame
        assert_eq!(mode.pending_direction, Some(Direction::Up));
        assert_eq!(mode.tracker_stats.total_frames(), 3);

        // Stream has ended
        assert!(tracker.next_frame().await.unwrap().is_none());
    }
}
