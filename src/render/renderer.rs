use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

use crate::game::{GameState, Position};
use crate::metrics::{SessionMetrics, TrackerStats};
use crate::tracker::{HandFrame, CONNECTIONS};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame: HUD on top, tracking and game panels side by side,
    /// controls at the bottom
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        hand: Option<&HandFrame>,
        speed: u32,
        session: &SessionMetrics,
        tracker: &TrackerStats,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Panels
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, speed, session, tracker);
        frame.render_widget(stats, chunks[0]);

        // Camera view and game grid side by side
        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.render_hand_panel(frame, panels[0], hand);

        if state.is_running() {
            let grid = self.render_grid(state);
            frame.render_widget(grid, panels[1]);
        } else {
            let game_over = self.render_game_over(state, session);
            frame.render_widget(game_over, panels[1]);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// The hand skeleton from the latest observation, or a notice when the
    /// detector currently sees nothing
    fn render_hand_panel(&self, frame: &mut Frame, area: Rect, hand: Option<&HandFrame>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::White))
            .title(" Hand ");

        match hand {
            Some(hand) => {
                // Landmarks are normalized with the origin top-left; the
                // canvas origin is bottom-left, so flip y.
                let joints: Vec<(f64, f64)> = hand
                    .landmarks
                    .iter()
                    .map(|lm| (f64::from(lm.x), 1.0 - f64::from(lm.y)))
                    .collect();

                let canvas = Canvas::default()
                    .block(block)
                    .x_bounds([0.0, 1.0])
                    .y_bounds([0.0, 1.0])
                    .paint(|ctx| {
                        for (a, b) in CONNECTIONS {
                            let (x1, y1) = joints[a];
                            let (x2, y2) = joints[b];
                            ctx.draw(&CanvasLine {
                                x1,
                                y1,
                                x2,
                                y2,
                                color: Color::Cyan,
                            });
                        }
                        ctx.draw(&Points {
                            coords: &joints,
                            color: Color::White,
                        });
                    });

                frame.render_widget(canvas, area);
            }
            None => {
                let notice = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No hand detected",
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Show your palm to the camera",
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);

                frame.render_widget(notice, area);
            }
        }
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        speed: u32,
        session: &SessionMetrics,
        tracker: &TrackerStats,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{speed} Hz"), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(session.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Cam: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(
                    "{:.0} fps / {:.0}% hand",
                    tracker.fps(),
                    tracker.detection_rate() * 100.0
                ),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, session: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Flick your hand", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("open/close it", Style::default().fg(Color::Cyan)),
            Span::raw(" for speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
