use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::GameWorld;
use crate::power_up::{TimedEffect, TimedEffectKind};

const HUD_MARGIN_X: u16 = 1;

/// Renders the score and mode lines and returns the play area below them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, world: &GameWorld) -> Rect {
    let [score_area, mode_area, play_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let palette = &world.config().palette;
    let text_style = Style::default().fg(palette.hud_text);
    let width = usize::from(score_area.width.saturating_sub(HUD_MARGIN_X * 2));

    let score_line = score_text(world.score(), world.player.len());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            fit_to_width(&score_line, width),
            text_style.add_modifier(Modifier::BOLD),
        ))),
        inset_horizontal(score_area, HUD_MARGIN_X),
    );

    let mode_line = mode_text(world.mode().name(), world.player.effect(), width);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(mode_line, text_style))),
        inset_horizontal(mode_area, HUD_MARGIN_X),
    );

    play_area
}

fn score_text(score: u32, length: usize) -> String {
    format!("Score: {score}   Length: {length}")
}

/// `Mode: NAME`, with the running effect right-aligned when it fits.
fn mode_text(mode_name: &str, effect: Option<TimedEffect>, width: usize) -> String {
    let left = format!("Mode: {mode_name}");
    let Some(effect) = effect else {
        return fit_to_width(&left, width);
    };

    let label = match effect.kind {
        TimedEffectKind::Speed => "Speed",
        TimedEffectKind::Invincibility => "Invincible",
    };
    let right = format!("{label} {}", effect.remaining_ticks);
    let used = left.width() + right.width();
    if used + 1 > width {
        return fit_to_width(&left, width);
    }

    format!("{left}{}{right}", " ".repeat(width - used))
}

/// Truncates `text` to at most `width` display columns.
fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }

    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        used += ch_width;
        fitted.push(ch);
    }
    fitted
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
