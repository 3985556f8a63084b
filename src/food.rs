use rand::Rng;
use ratatui::style::Color;

use crate::config::GridSize;
use crate::snake::Position;

/// A single colored cell on the board: a food item or a power-up marker.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridObject {
    pub position: Position,
    pub color: Color,
}

impl GridObject {
    #[must_use]
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }
}

/// Picks a uniformly random cell anywhere on the grid.
///
/// Occupancy is not checked: items may land on snakes or on each other.
#[must_use]
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

/// Tops `food` up to `capacity` items at random cells. Returns how many were added.
pub fn refill<R: Rng + ?Sized>(
    food: &mut Vec<GridObject>,
    capacity: usize,
    rng: &mut R,
    bounds: GridSize,
    color: Color,
) -> usize {
    let missing = capacity.saturating_sub(food.len());
    for _ in 0..missing {
        food.push(GridObject::new(random_position(rng, bounds), color));
    }
    missing
}

/// Removes every item at `position`, returning how many were taken.
pub fn take_at(items: &mut Vec<GridObject>, position: Position) -> usize {
    let before = items.len();
    items.retain(|item| item.position != position);
    before - items.len()
}
