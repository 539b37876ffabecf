use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::{Config, GridSize, INITIAL_DIRECTION, INITIAL_LENGTH, INITIAL_SEGMENTS};
use crate::food::Food;
use crate::snake::{Cell, Direction, Snake};

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    Body,
}

/// Result of a single simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    /// Moved without eating.
    Continue,
    /// Ate the food; length is already incremented.
    Grew,
    /// Terminal. `grew` is set when the fatal cell also held the food.
    Collision { kind: Collision, grew: bool },
    /// Terminal. Food was eaten with the body buffer already full.
    Overflow,
}

impl Outcome {
    /// Returns true when the game cannot continue after this outcome.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Collision { .. } | Self::Overflow)
    }

    /// Returns true when the snake's length increased on this step.
    #[must_use]
    pub fn grew(self) -> bool {
        matches!(self, Self::Grew | Self::Collision { grew: true, .. })
    }
}

/// Snake and food state advanced once per tick.
///
/// The generator is owned so that food placement is reproducible when a
/// seeded or mock generator is injected.
#[derive(Debug, Clone)]
pub struct Simulation<R = StdRng> {
    snake: Snake,
    food: Food,
    running: bool,
    tick_count: u64,
    grid: GridSize,
    terminal_outcome: Option<Outcome>,
    rng: R,
}

impl Simulation<StdRng> {
    /// Creates a new game, seeding food placement from `config.seed` or OS entropy.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::with_rng(config, StdRng::from_entropy()),
        }
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Creates the standard three-segment opening with one active food.
    #[must_use]
    pub fn with_rng(config: &Config, mut rng: R) -> Self {
        let snake = Snake::from_segments(&INITIAL_SEGMENTS, INITIAL_DIRECTION, config.capacity);
        let food = Food::spawn(&mut rng, config.grid);

        Self::from_parts(config.grid, snake, food, rng)
    }

    /// Assembles a running game from explicit pieces.
    #[must_use]
    pub fn from_parts(grid: GridSize, snake: Snake, food: Food, rng: R) -> Self {
        Self {
            snake,
            food,
            running: true,
            tick_count: 0,
            grid,
            terminal_outcome: None,
            rng,
        }
    }

    /// Requests a heading for the next step. Reversals are silently ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        self.snake.set_direction(requested);
    }

    /// Advances the game by one tick.
    ///
    /// Once a terminal outcome has been produced, further calls change
    /// nothing and return that outcome again.
    pub fn step(&mut self) -> Outcome {
        if let Some(outcome) = self.terminal_outcome {
            return outcome;
        }

        self.tick_count += 1;
        self.snake.advance();
        let head = self.snake.head();

        let hit_wall = !self.grid.contains(head);
        let hit_body = self.snake.head_overlaps_body();
        let collision = if hit_wall {
            Some(Collision::Wall)
        } else if hit_body {
            Some(Collision::Body)
        } else {
            None
        };

        let ate = self.food.is_eaten_at(head);
        let grew = ate && self.snake.grow();
        if grew {
            self.regenerate_food();
        }

        let outcome = match collision {
            Some(kind) => Outcome::Collision { kind, grew },
            None if ate && !grew => Outcome::Overflow,
            None if grew => Outcome::Grew,
            None => Outcome::Continue,
        };

        trace!(tick = self.tick_count, ?head, ?outcome, "step");

        if outcome.is_terminal() {
            self.running = false;
            self.terminal_outcome = Some(outcome);
            debug!(
                tick = self.tick_count,
                length = self.snake.len(),
                score = self.score(),
                ?outcome,
                "simulation terminated"
            );
        }

        outcome
    }

    /// Moves the food to a uniformly random grid cell and activates it.
    ///
    /// The new cell may coincide with the snake body.
    pub fn regenerate_food(&mut self) {
        self.food = Food::spawn(&mut self.rng, self.grid);
        debug!(x = self.food.cell.x, y = self.food.cell.y, "food regenerated");
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    /// Occupied cells from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.segments().copied()
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.snake.len()
    }

    /// Segments gained since the start.
    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(INITIAL_LENGTH)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The terminal outcome, once the game has ended.
    #[must_use]
    pub fn terminal_outcome(&self) -> Option<Outcome> {
        self.terminal_outcome
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::{Config, GridSize, INITIAL_SEGMENTS};
    use crate::food::Food;
    use crate::snake::{Cell, Direction, Snake};

    use super::{Collision, Outcome, Simulation};

    const GRID: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    fn game(segments: &[Cell], direction: Direction, food: Cell) -> Simulation<StdRng> {
        Simulation::from_parts(
            GRID,
            Snake::from_segments(segments, direction, 300),
            Food::at(food),
            StdRng::seed_from_u64(1),
        )
    }

    fn cells<R: rand::Rng>(sim: &Simulation<R>) -> Vec<Cell> {
        sim.cells().collect()
    }

    #[test]
    fn new_game_starts_with_three_segments_heading_right() {
        let sim = Simulation::with_seed(&Config::default(), 3);

        assert_eq!(cells(&sim), INITIAL_SEGMENTS.to_vec());
        assert_eq!(sim.snake().direction(), Direction::Right);
        assert_eq!(sim.score(), 0);
        assert!(sim.is_running());
        assert!(sim.food().active);
        assert!(sim.grid().contains(sim.food().cell));
    }

    #[test]
    fn free_move_continues_without_changing_length() {
        let mut sim = game(
            &[Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }],
            Direction::Right,
            Cell { x: 9, y: 9 },
        );

        assert_eq!(sim.step(), Outcome::Continue);
        assert_eq!(sim.length(), 3);
        assert_eq!(
            cells(&sim),
            vec![Cell { x: 4, y: 3 }, Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }]
        );
    }

    #[test]
    fn moving_into_the_vacated_tail_is_not_a_collision() {
        // Square loop: the head steps onto the cell the tail is leaving.
        let mut sim = game(
            &[
                Cell { x: 1, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
            ],
            Direction::Left,
            Cell { x: 9, y: 9 },
        );

        sim.set_direction(Direction::Down);

        assert_eq!(sim.step(), Outcome::Continue);
        assert_eq!(sim.snake().head(), Cell { x: 1, y: 2 });
    }

    #[test]
    fn growth_lags_one_tick_behind_eating() {
        let mut sim = game(
            &[Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }],
            Direction::Right,
            Cell { x: 4, y: 3 },
        );

        assert_eq!(sim.step(), Outcome::Grew);
        assert_eq!(sim.length(), 4);
        assert_eq!(sim.score(), 1);
        assert_eq!(
            cells(&sim),
            vec![Cell { x: 4, y: 3 }, Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }]
        );

        sim.set_direction(Direction::Down);
        let next = sim.step();
        assert!(!next.is_terminal());
        assert_eq!(
            cells(&sim),
            vec![
                Cell { x: 4, y: 4 },
                Cell { x: 4, y: 3 },
                Cell { x: 3, y: 3 },
                Cell { x: 2, y: 3 },
            ]
        );
    }

    #[test]
    fn regenerated_food_is_active_and_in_bounds() {
        let mut sim = game(
            &[Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }],
            Direction::Right,
            Cell { x: 4, y: 3 },
        );

        assert_eq!(sim.step(), Outcome::Grew);

        let food = sim.food();
        assert!(food.active);
        assert!(GRID.contains(food.cell));
    }

    #[test]
    fn regenerated_food_may_land_on_the_body() {
        // A zero generator always yields the origin, which the body occupies.
        let mut sim = Simulation::from_parts(
            GRID,
            Snake::from_segments(
                &[Cell { x: 1, y: 0 }, Cell { x: 0, y: 0 }, Cell { x: 0, y: 1 }],
                Direction::Right,
                300,
            ),
            Food::at(Cell { x: 2, y: 0 }),
            StepRng::new(0, 0),
        );

        assert_eq!(sim.step(), Outcome::Grew);
        assert_eq!(sim.food().cell, Cell { x: 0, y: 0 });
        assert!(sim.snake().occupies(sim.food().cell));
    }

    #[test]
    fn wall_collision_at_right_edge() {
        let mut sim = game(
            &[Cell { x: 9, y: 4 }, Cell { x: 8, y: 4 }, Cell { x: 7, y: 4 }],
            Direction::Right,
            Cell { x: 0, y: 0 },
        );

        assert_eq!(
            sim.step(),
            Outcome::Collision {
                kind: Collision::Wall,
                grew: false,
            }
        );
        assert!(!sim.is_running());
    }

    #[test]
    fn wall_collision_at_top_edge() {
        let mut sim = game(
            &[Cell { x: 4, y: 0 }, Cell { x: 4, y: 1 }, Cell { x: 4, y: 2 }],
            Direction::Up,
            Cell { x: 0, y: 9 },
        );

        assert!(matches!(
            sim.step(),
            Outcome::Collision {
                kind: Collision::Wall,
                ..
            }
        ));
    }

    #[test]
    fn heading_into_the_neck_hits_the_third_segment() {
        let mut sim = game(
            &[Cell { x: 5, y: 5 }, Cell { x: 4, y: 5 }, Cell { x: 3, y: 5 }],
            Direction::Left,
            Cell { x: 0, y: 0 },
        );

        assert_eq!(
            sim.step(),
            Outcome::Collision {
                kind: Collision::Body,
                grew: false,
            }
        );
        assert!(!sim.is_running());
    }

    #[test]
    fn turning_into_the_body_is_a_self_collision() {
        let mut sim = game(
            &[
                Cell { x: 1, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
                Cell { x: 0, y: 2 },
            ],
            Direction::Left,
            Cell { x: 9, y: 9 },
        );

        sim.set_direction(Direction::Down);

        assert!(matches!(
            sim.step(),
            Outcome::Collision {
                kind: Collision::Body,
                ..
            }
        ));
    }

    #[test]
    fn eating_food_on_the_body_still_grows_before_dying() {
        let mut sim = game(
            &[
                Cell { x: 1, y: 1 },
                Cell { x: 2, y: 1 },
                Cell { x: 2, y: 2 },
                Cell { x: 1, y: 2 },
                Cell { x: 0, y: 2 },
            ],
            Direction::Left,
            Cell { x: 1, y: 2 },
        );

        sim.set_direction(Direction::Down);

        assert_eq!(
            sim.step(),
            Outcome::Collision {
                kind: Collision::Body,
                grew: true,
            }
        );
        assert_eq!(sim.score(), 3);
    }

    #[test]
    fn eating_at_full_capacity_overflows() {
        let mut sim = Simulation::from_parts(
            GRID,
            Snake::from_segments(
                &[Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }],
                Direction::Right,
                3,
            ),
            Food::at(Cell { x: 4, y: 3 }),
            StdRng::seed_from_u64(5),
        );

        assert_eq!(sim.step(), Outcome::Overflow);
        assert_eq!(sim.length(), 3);
        assert!(!sim.is_running());
    }

    #[test]
    fn step_after_termination_changes_nothing() {
        let mut sim = game(
            &[Cell { x: 9, y: 4 }, Cell { x: 8, y: 4 }, Cell { x: 7, y: 4 }],
            Direction::Right,
            Cell { x: 0, y: 0 },
        );

        let first = sim.step();
        let snapshot = cells(&sim);
        let ticks = sim.tick_count();

        assert_eq!(sim.step(), first);
        assert_eq!(cells(&sim), snapshot);
        assert_eq!(sim.tick_count(), ticks);
        assert_eq!(sim.terminal_outcome(), Some(first));
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        for turn in [Direction::Up, Direction::Down] {
            let mut sim = game(
                &[Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }],
                Direction::Right,
                Cell { x: 9, y: 9 },
            );

            sim.set_direction(turn);
            assert_eq!(sim.step(), Outcome::Continue);
            assert_eq!(sim.snake().direction(), turn);
        }
    }

    #[test]
    fn rejected_reversals_do_not_affect_the_next_step() {
        let segments = [Cell { x: 3, y: 3 }, Cell { x: 2, y: 3 }, Cell { x: 1, y: 3 }];
        let mut untouched = game(&segments, Direction::Right, Cell { x: 9, y: 9 });
        let mut spammed = game(&segments, Direction::Right, Cell { x: 9, y: 9 });

        for _ in 0..5 {
            spammed.set_direction(Direction::Left);
        }

        assert_eq!(spammed.step(), untouched.step());
        assert_eq!(cells(&spammed), cells(&untouched));
        assert_eq!(spammed.snake().direction(), Direction::Right);
    }

    #[test]
    fn same_seed_gives_same_food_sequence() {
        let config = Config::default();
        let first = Simulation::with_seed(&config, 99);
        let second = Simulation::with_seed(&config, 99);

        assert_eq!(first.food(), second.food());
    }
}
