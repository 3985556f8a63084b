use std::collections::VecDeque;

use ratatui::style::Color;

use crate::config::{ENEMY_BASE_SPEED, GridSize, PLAYER_BASE_SPEED, SPEED_BOOST_MULTIPLIER};
use crate::input::Direction;
use crate::power_up::{TimedEffect, TimedEffectKind};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Position one step along `heading`, without wrapping.
    #[must_use]
    pub fn offset(self, heading: Heading) -> Self {
        Self {
            x: self.x + heading.dx,
            y: self.y + heading.dy,
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    value.rem_euclid(upper_bound)
}

/// Per-tick movement vector. Each component is -1, 0 or 1.
///
/// Player snakes only ever hold one of the four axis headings; chasing
/// enemies may also move diagonally or stand still.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const STILL: Self = Self { dx: 0, dy: 0 };

    #[must_use]
    pub fn is_still(self) -> bool {
        self == Self::STILL
    }
}

impl From<Direction> for Heading {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { dx, dy }
    }
}

/// Entity a chasing snake steers towards, resolved by the world each tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Target {
    Player,
}

/// How a snake picks its heading before it moves.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Steering {
    /// Heading changes only through [`Snake::turn`].
    Manual,
    /// Re-aims at the target's head every tick.
    Chase(Target),
}

/// A snake body with its heading, speed and status effects.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Heading,
    base_speed: f32,
    effect: Option<TimedEffect>,
    steering: Steering,
    color: Color,
}

impl Snake {
    /// Creates the one-cell player snake heading right.
    #[must_use]
    pub fn player(start: Position, color: Color) -> Self {
        Self::new(start, PLAYER_BASE_SPEED, Steering::Manual, color)
    }

    /// Creates a one-cell enemy that chases the player.
    #[must_use]
    pub fn enemy(start: Position, color: Color) -> Self {
        Self::new(
            start,
            ENEMY_BASE_SPEED,
            Steering::Chase(Target::Player),
            color,
        )
    }

    fn new(start: Position, base_speed: f32, steering: Steering, color: Color) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            heading: Heading::from(Direction::Right),
            base_speed,
            effect: None,
            steering,
            color,
        }
    }

    /// Replaces the body with explicit segments (front is head).
    ///
    /// An empty list leaves the body unchanged.
    #[must_use]
    pub fn with_segments(mut self, segments: Vec<Position>) -> Self {
        if !segments.is_empty() {
            self.body = VecDeque::from(segments);
        }
        self
    }

    /// Sets the heading unconditionally.
    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<Heading>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Advances one cell along the heading, wrapping at the grid edges.
    pub fn move_forward(&mut self, bounds: GridSize) {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.head().offset(self.heading).wrapped(bounds);
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
    }

    /// Appends a copy of the tail segment.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Turns towards `direction` unless it is the exact reverse of the heading.
    ///
    /// Returns whether the turn was taken.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.heading == Heading::from(direction.opposite()) {
            return false;
        }
        self.heading = Heading::from(direction);
        true
    }

    /// Aims at `target` by rounding the unit vector towards it.
    ///
    /// The vector is taken across the grid, not around its wrapped edges.
    /// Standing on the target leaves the snake still for this tick.
    pub fn steer_towards(&mut self, target: Position) {
        let head = self.head();
        let mut dx = f64::from(target.x - head.x);
        let mut dy = f64::from(target.y - head.y);

        let length = dx.hypot(dy);
        if length > 0.0 {
            dx /= length;
            dy /= length;
        }

        self.heading = Heading {
            dx: dx.round() as i32,
            dy: dy.round() as i32,
        };
    }

    /// Starts `effect`, replacing any effect already running.
    pub fn apply_effect(&mut self, effect: TimedEffect) {
        self.effect = Some(effect);
    }

    /// Counts the running effect down by one tick. Returns the kind that just ended.
    pub fn tick_effect(&mut self) -> Option<TimedEffectKind> {
        let effect = self.effect.as_mut()?;
        if effect.tick() {
            let kind = effect.kind;
            self.effect = None;
            return Some(kind);
        }
        None
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Speed multiplier relative to the player's base pace.
    #[must_use]
    pub fn speed(&self) -> f32 {
        match self.effect {
            Some(TimedEffect {
                kind: TimedEffectKind::Speed,
                ..
            }) => self.base_speed * SPEED_BOOST_MULTIPLIER,
            _ => self.base_speed,
        }
    }

    #[must_use]
    pub fn is_invincible(&self) -> bool {
        matches!(
            self.effect,
            Some(TimedEffect {
                kind: TimedEffectKind::Invincibility,
                ..
            })
        )
    }

    /// Ticks left on the running effect, 0 when none.
    #[must_use]
    pub fn power_up_timer(&self) -> u32 {
        self.effect.map_or(0, |effect| effect.remaining_ticks)
    }

    #[must_use]
    pub fn effect(&self) -> Option<TimedEffect> {
        self.effect
    }

    #[must_use]
    pub fn steering(&self) -> Steering {
        self.steering
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        self.steering == Steering::Manual
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
