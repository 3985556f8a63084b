use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::GameWorld;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Terminal columns per grid cell; two columns keep cells roughly square.
pub const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, world: &GameWorld) {
    let palette = &world.config().palette;
    let area = frame.area();
    let play_area = render_hud(frame, area, world);

    let block = Block::bordered()
        .border_style(Style::new().fg(palette.border))
        .style(Style::new().bg(palette.field_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_cells(frame, inner, world);

    if world.is_over() {
        render_game_over_menu(frame, play_area, world.score(), world.mode());
    }
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, world: &GameWorld) {
    let bounds = world.bounds();
    let buffer = frame.buffer_mut();

    for (position, color) in world.drawables() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color));
    }
}

/// Top-left terminal cell for a grid position, or `None` when it is clipped.
#[must_use]
pub fn logical_to_terminal(
    inner: Rect,
    bounds: GridSize,
    position: Position,
) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{logical_to_terminal, render};
    use crate::config::{GameConfig, GridSize};
    use crate::game::{GameStatus, GameWorld};
    use crate::snake::Position;

    #[test]
    fn cells_are_two_columns_wide() {
        let inner = Rect::new(1, 3, 20, 10);
        let bounds = GridSize::square(10);

        assert_eq!(
            logical_to_terminal(inner, bounds, Position { x: 0, y: 0 }),
            Some((1, 3))
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position { x: 9, y: 9 }),
            Some((19, 12))
        );
    }

    #[test]
    fn cells_outside_the_play_area_are_clipped() {
        let inner = Rect::new(0, 0, 10, 4);
        let bounds = GridSize::square(10);

        assert_eq!(
            logical_to_terminal(inner, bounds, Position { x: 5, y: 0 }),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position { x: 0, y: 4 }),
            None
        );
        assert_eq!(
            logical_to_terminal(inner, bounds, Position { x: -1, y: 0 }),
            None
        );
    }

    #[test]
    fn full_frame_renders_hud_and_game_over_popup() {
        let config = GameConfig {
            grid: GridSize::square(12),
            ..GameConfig::default()
        };
        let mut world = GameWorld::new_with_seed(config, 3);
        world.score = 70;
        world.status = GameStatus::GameOver;

        let mut terminal =
            Terminal::new(TestBackend::new(40, 20)).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, &world))
            .expect("frame should render");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Score: 70"));
        assert!(text.contains("Mode: CLASSIC"));
        assert!(text.contains("GAME OVER"));
    }
}
