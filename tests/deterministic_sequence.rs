use arcade_snake::config::{GameConfig, GridSize};
use arcade_snake::food::GridObject;
use arcade_snake::game::{GameMode, GameWorld, TickOutcome};
use arcade_snake::input::{Direction, GameInput};
use arcade_snake::power_up::{PowerUp, PowerUpKind};
use arcade_snake::snake::{Position, Snake};
use arcade_snake::theme::Palette;
use ratatui::style::Color;

fn small_world(seed: u64) -> GameWorld {
    let config = GameConfig {
        grid: GridSize::square(10),
        ..GameConfig::default()
    };
    let mut world = GameWorld::new_with_seed(config, seed);
    world.enemies.clear();
    world.power_ups.clear();
    world.food = bottom_row_food();
    world
}

fn bottom_row_food() -> Vec<GridObject> {
    (0..3)
        .map(|x| GridObject::new(Position { x, y: 9 }, Color::Yellow))
        .collect()
}

#[test]
fn stepwise_pickups_invincible_kill_then_fatal_collision() {
    let palette = Palette::default();
    let mut world = small_world(42);

    world.player = Snake::player(Position { x: 8, y: 2 }, Color::Green);
    world.food[0] = GridObject::new(Position { x: 9, y: 2 }, Color::Yellow);
    world.power_ups = vec![PowerUp::new(
        Position { x: 0, y: 2 },
        PowerUpKind::Invincibility,
        &palette,
    )];
    world.enemies = vec![
        Snake::enemy(Position { x: 1, y: 2 }, Color::Red),
        Snake::enemy(Position { x: 5, y: 5 }, Color::Red),
    ];

    // Food on the last column.
    assert_eq!(world.tick(), TickOutcome::Continue);
    assert_eq!(world.score(), 10);
    assert_eq!(world.player.len(), 2);
    // Keep random refills off the player's row.
    world.food = bottom_row_food();

    // Wraps onto the invincibility marker.
    assert_eq!(world.tick(), TickOutcome::Continue);
    assert_eq!(world.player.head(), Position { x: 0, y: 2 });
    assert!(world.player.is_invincible());
    world.power_ups.clear();

    // Runs over the first enemy.
    assert_eq!(world.tick(), TickOutcome::Continue);
    assert_eq!(world.score(), 60);
    assert_eq!(world.enemies.len(), 1);

    // Turn down and let the shield lapse.
    world.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(world.player.heading().dx, 1, "reversal must be ignored");
    world.apply_input(GameInput::Direction(Direction::Down));
    while world.player.is_invincible() {
        assert_eq!(world.tick(), TickOutcome::Continue);
        world.power_ups.clear();
    }

    world.enemies = vec![Snake::enemy(Position { x: 5, y: 5 }, Color::Red)];
    world.player = Snake::player(Position { x: 5, y: 4 }, Color::Green)
        .with_heading(Direction::Down);
    world.food = bottom_row_food();
    let score_before = world.score();

    assert_eq!(world.tick(), TickOutcome::GameOver);
    assert!(world.is_over());
    assert_eq!(world.score(), score_before);
    assert_eq!(world.enemies.len(), 1);
}

#[test]
fn hunter_enemy_moves_diagonally_towards_player() {
    let mut world = small_world(7);
    world.mode = GameMode::Hunter;
    world.player =
        Snake::player(Position { x: 1, y: 1 }, Color::Green).with_heading(Direction::Down);
    world.enemies = vec![Snake::enemy(Position { x: 7, y: 7 }, Color::Red)];

    assert_eq!(world.tick(), TickOutcome::Continue);

    // Aimed at the player's new head (1, 2).
    assert_eq!(world.enemies[0].head(), Position { x: 6, y: 6 });
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut world = GameWorld::new_with_seed(GameConfig::default(), seed);
        world.apply_input(GameInput::CycleMode);
        for _ in 0..400 {
            if world.tick() == TickOutcome::GameOver {
                break;
            }
        }
        let food: Vec<Position> = world.food.iter().map(|item| item.position).collect();
        (world.score(), world.tick_count, world.enemies.len(), food)
    };

    assert_eq!(run(99), run(99));
}
