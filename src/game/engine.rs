use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionKind, GameState, Phase, Position, Snake},
};
use rand::Rng;

/// What happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// The collision that ended the game, if one occurred
    pub collision: Option<CollisionKind>,
}

impl TickOutcome {
    /// Whether this tick left the game in the GameOver phase
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.spawn_food_avoid_snake(&snake);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one tick of the game
    ///
    /// While the game is over, nothing but `reset` has any effect.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome {
                ate_food: false,
                collision: None,
            };
        }

        // Apply the turn unless it reverses the snake. A single-segment
        // snake has no body to run into, so it may reverse freely.
        if let Action::Turn(new_direction) = action {
            if state.snake.len() <= 1 || !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        // Calculate new head position
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Check for collisions
        if let Some(collision) = self.check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            state.ticks += 1;

            return TickOutcome {
                ate_food: false,
                collision: Some(collision),
            };
        }

        // Check if snake ate food
        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.advance(ate_food);

        // Update score and spawn new food if needed
        if ate_food {
            state.score += 1;
            state.food = self.spawn_food_avoid_snake(&state.snake);
        }

        state.ticks += 1;

        TickOutcome {
            ate_food,
            collision: None,
        }
    }

    /// Check if the new head position causes a collision
    ///
    /// The body is checked before the tail cell is vacated, so moving into
    /// the current tail position is fatal.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionKind> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(CollisionKind::SelfBody);
        }

        None
    }

    /// Spawn food at a uniformly random unoccupied position
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.body.contains(&pos) {
                return pos;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        let initial_head = state.snake.head();

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(!outcome.terminated());
        assert!(!outcome.ate_food);
        assert_eq!(state.ticks, 1);
        assert_ne!(state.snake.head(), initial_head);
    }

    #[test]
    fn test_length_constant_without_food() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        // Keep the food out of the snake's path
        state.food = Position::new(0, 0);
        state.snake = Snake::new(Position::new(2, 5), Direction::Right, 3);

        for _ in 0..5 {
            let outcome = engine.step(&mut state, Action::Continue);
            assert!(!outcome.ate_food);
            assert_eq!(state.snake.len(), 3);
        }
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();

        // Place food directly in front of snake
        let head = state.snake.head();
        state.food = head.moved_in_direction(state.snake.direction);
        let initial_length = state.snake.len();

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.ate_food);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
    }

    #[test]
    fn test_food_never_spawns_on_snake() {
        let mut engine = GameEngine::new(GameConfig::small());

        for _ in 0..50 {
            let state = engine.reset();
            assert!(!state.snake.body.contains(&state.food));
        }

        // Also after eating, with a longer snake on the board
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(6, 5), Direction::Right, 5);
        state.food = Position::new(7, 5);
        let outcome = engine.step(&mut state, Action::Continue);
        assert!(outcome.ate_food);
        assert!(!state.snake.body.contains(&state.food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            10,
            10,
        );

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.terminated());
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(outcome.collision, Some(CollisionKind::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Snake at (5, 5) going Right with length 4
        // Body: (5,5), (4,5), (3,5), (2,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        // Walk a tight box that closes on the body:
        // Right: (6,5), (5,5), (4,5), (3,5)
        engine.step(&mut state, Action::Continue);
        // Down: (6,6), (6,5), (5,5), (4,5)
        engine.step(&mut state, Action::Turn(Direction::Down));
        // Left: (5,6), (6,6), (6,5), (5,5)
        engine.step(&mut state, Action::Turn(Direction::Left));
        // Up: (5,5) - collides with body at (5,5)
        let outcome = engine.step(&mut state, Action::Turn(Direction::Up));

        assert!(outcome.terminated());
        assert_eq!(outcome.collision, Some(CollisionKind::SelfBody));
    }

    #[test]
    fn test_tail_cell_is_fatal() {
        // Moving into the cell the tail still occupies counts as a
        // self-collision: the body is checked before the tail vacates.
        // Body forms three sides of a 2x2 square, head about to close it
        // onto the tail at (5,6).
        let snake = Snake {
            body: vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 6),
                Position::new(5, 6),
            ],
            direction: Direction::Down,
        };
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        let outcome = engine.step(&mut state, Action::Continue);

        assert!(outcome.terminated());
        assert_eq!(outcome.collision, Some(CollisionKind::SelfBody));
    }

    #[test]
    fn test_reversal_rejected_with_body() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        state.food = Position::new(0, 0);

        // A 180-degree turn is ignored while the snake has a body
        engine.step(&mut state, Action::Turn(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_allowed_at_length_one() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(0, 0),
            10,
            10,
        );

        let outcome = engine.step(&mut state, Action::Turn(Direction::Left));

        assert!(!outcome.terminated());
        assert_eq!(state.snake.direction, Direction::Left);
        assert_eq!(state.snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.phase = Phase::GameOver;
        let snapshot = state.clone();

        let outcome = engine.step(&mut state, Action::Turn(Direction::Down));

        assert!(!outcome.ate_food);
        assert_eq!(state, snapshot);
    }
}
