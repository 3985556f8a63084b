use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::clock::SimulationClock;
use crate::config::{
    ENEMY_KILL_POINTS, ENEMY_SPAWN_CHANCE, FOOD_CAPACITY, FOOD_POINTS, GROWTH_SEGMENTS,
    GameConfig, GridSize, POWER_UP_CAPACITY, POWER_UP_SPAWN_CHANCE,
};
use crate::food::{self, GridObject};
use crate::input::GameInput;
use crate::power_up::{PowerUp, PowerUpKind};
use crate::snake::{Position, Snake, Steering, Target};

/// Rule set the world is running under.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GameMode {
    /// Enemies stay where they are.
    Classic,
    /// Enemies chase the player and more of them keep appearing.
    Survival,
    /// Enemies chase the player.
    Hunter,
}

impl GameMode {
    /// The mode after this one in the cycle order.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Classic => Self::Survival,
            Self::Survival => Self::Hunter,
            Self::Hunter => Self::Classic,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "CLASSIC",
            Self::Survival => "SURVIVAL",
            Self::Hunter => "HUNTER",
        }
    }

    /// Whether enemies steer and move in this mode.
    #[must_use]
    pub fn enemies_chase(self) -> bool {
        matches!(self, Self::Survival | Self::Hunter)
    }

    /// Whether extra enemies may appear in this mode.
    #[must_use]
    pub fn spawns_enemies(self) -> bool {
        self == Self::Survival
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Complete mutable state of one game.
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub player: Snake,
    pub enemies: Vec<Snake>,
    pub food: Vec<GridObject>,
    pub power_ups: Vec<PowerUp>,
    pub(crate) score: u32,
    pub mode: GameMode,
    pub(crate) status: GameStatus,
    pub tick_count: u64,
    config: GameConfig,
    clock: SimulationClock,
    rng: StdRng,
}

impl GameWorld {
    /// Creates a fresh world, seeded from the config or from entropy.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a deterministic world for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let bounds = config.grid;
        let palette = config.palette;
        let player_start = Position {
            x: i32::from(bounds.width / 4),
            y: i32::from(bounds.height / 2),
        }
        .wrapped(bounds);
        let enemy_start = Position {
            x: i32::from(bounds.width) - 5,
            y: i32::from(bounds.height) - 5,
        }
        .wrapped(bounds);

        let mut world = Self {
            player: Snake::player(player_start, palette.player),
            enemies: vec![Snake::enemy(enemy_start, palette.enemy)],
            food: Vec::with_capacity(FOOD_CAPACITY),
            power_ups: Vec::with_capacity(POWER_UP_CAPACITY),
            score: 0,
            mode: GameMode::Classic,
            status: GameStatus::Running,
            tick_count: 0,
            config,
            clock: SimulationClock::new(),
            rng,
        };
        world.refill_food();
        world.maybe_spawn_power_up();

        info!(
            "new game on a {}x{} grid at {} fps",
            bounds.width, bounds.height, world.config.frame_rate
        );
        world
    }

    /// Grid dimensions of this world.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Applies one external input event.
    ///
    /// Direction changes and mode switches take effect immediately; reversals
    /// are dropped. Restart and quit are handled by the caller.
    pub fn apply_input(&mut self, input: GameInput) {
        if self.is_over() {
            return;
        }

        match input {
            GameInput::Direction(direction) => {
                if !self.player.turn(direction) {
                    debug!("ignored reversal to {direction:?}");
                }
            }
            GameInput::CycleMode => {
                self.mode = self.mode.next();
                info!("mode switched to {}", self.mode.name());
            }
            GameInput::Restart | GameInput::Quit => {}
        }
    }

    /// Records one rendered frame and runs a tick when the clock says so.
    pub fn advance_frame(&mut self) -> Option<TickOutcome> {
        if self.is_over() {
            return None;
        }

        let frame_rate = self.config.frame_rate;
        let speed = self.player.speed();
        if self.clock.advance(frame_rate, speed) {
            Some(self.tick())
        } else {
            None
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::GameOver;
        }

        self.tick_count += 1;
        let bounds = self.bounds();

        self.player.move_forward(bounds);
        if self.mode.enemies_chase() {
            self.move_enemies();
        }

        if self.resolve_collisions() == TickOutcome::GameOver {
            self.status = GameStatus::GameOver;
            info!(
                "game over after {} ticks with score {}",
                self.tick_count, self.score
            );
            return TickOutcome::GameOver;
        }

        if self.mode.spawns_enemies() {
            self.maybe_spawn_enemy();
        }
        self.update_power_up_timer();
        self.maybe_spawn_power_up();
        self.refill_food();

        TickOutcome::Continue
    }

    /// Every drawable cell with its color, in painting order.
    pub fn drawables(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        let food = self.food.iter().map(|item| (item.position, item.color));
        let power_ups = self
            .power_ups
            .iter()
            .map(|power_up| (power_up.position(), power_up.object.color));
        let snakes = std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .flat_map(|snake| {
                let color = snake.color();
                snake.segments().map(move |segment| (*segment, color))
            });

        food.chain(power_ups).chain(snakes)
    }

    fn target_head(&self, target: Target) -> Position {
        match target {
            Target::Player => self.player.head(),
        }
    }

    fn move_enemies(&mut self) {
        let bounds = self.bounds();
        for idx in 0..self.enemies.len() {
            if let Steering::Chase(target) = self.enemies[idx].steering() {
                let aim = self.target_head(target);
                self.enemies[idx].steer_towards(aim);
            }
            self.enemies[idx].move_forward(bounds);
        }
    }

    fn resolve_collisions(&mut self) -> TickOutcome {
        let head = self.player.head();

        let eaten = food::take_at(&mut self.food, head);
        if eaten > 0 {
            for _ in 0..eaten {
                self.player.grow();
                self.score += FOOD_POINTS;
            }
            self.refill_food();
        }

        if let Some(idx) = self
            .power_ups
            .iter()
            .position(|power_up| power_up.position() == head)
        {
            let power_up = self.power_ups.remove(idx);
            self.apply_power_up(power_up.kind);
        }

        let mut idx = 0;
        while idx < self.enemies.len() {
            let enemy_head = self.enemies[idx].head();

            if self.enemies[idx].occupies(head) {
                if !self.player.is_invincible() {
                    return TickOutcome::GameOver;
                }

                let _ = self.enemies.remove(idx);
                self.score += ENEMY_KILL_POINTS;
                debug!("enemy destroyed at ({}, {})", head.x, head.y);

                // The wreck still clears food under its head.
                if food::take_at(&mut self.food, enemy_head) > 0 {
                    self.refill_food();
                }
                continue;
            }

            let eaten = food::take_at(&mut self.food, enemy_head);
            if eaten > 0 {
                for _ in 0..eaten {
                    self.enemies[idx].grow();
                }
                self.refill_food();
            }
            idx += 1;
        }

        TickOutcome::Continue
    }

    /// Applies a picked-up power-up to the player.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        debug!("player picked up {kind:?}");
        match kind.timed_effect() {
            Some(effect) => self.player.apply_effect(effect),
            None => {
                for _ in 0..GROWTH_SEGMENTS {
                    self.player.grow();
                }
            }
        }
    }

    fn update_power_up_timer(&mut self) {
        if let Some(kind) = self.player.tick_effect() {
            debug!("{kind:?} wore off");
        }
    }

    fn refill_food(&mut self) {
        let bounds = self.bounds();
        let color = self.config.palette.food;
        let _ = food::refill(&mut self.food, FOOD_CAPACITY, &mut self.rng, bounds, color);
    }

    fn maybe_spawn_power_up(&mut self) {
        if self.power_ups.len() >= POWER_UP_CAPACITY
            || !self.rng.gen_bool(POWER_UP_SPAWN_CHANCE)
        {
            return;
        }

        let position = food::random_position(&mut self.rng, self.config.grid);
        let kind = PowerUpKind::random(&mut self.rng);
        debug!("{kind:?} power-up spawned at ({}, {})", position.x, position.y);
        self.power_ups
            .push(PowerUp::new(position, kind, &self.config.palette));
    }

    fn maybe_spawn_enemy(&mut self) {
        if !self.rng.gen_bool(ENEMY_SPAWN_CHANCE) {
            return;
        }

        let position = food::random_position(&mut self.rng, self.config.grid);
        debug!("enemy spawned at ({}, {})", position.x, position.y);
        self.enemies
            .push(Snake::enemy(position, self.config.palette.enemy));
    }
}
