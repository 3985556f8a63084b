use rand::Rng;
use ratatui::style::Color;

use crate::config::POWER_UP_DURATION_TICKS;
use crate::food::GridObject;
use crate::snake::Position;
use crate::theme::Palette;

/// Kind of pickup a power-up grants.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PowerUpKind {
    Speed,
    Invincibility,
    Growth,
}

impl PowerUpKind {
    pub const ALL: [Self; 3] = [Self::Speed, Self::Invincibility, Self::Growth];

    /// Picks one kind uniformly.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Marker color for this kind.
    #[must_use]
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Invincibility => palette.invincibility,
            Self::Speed | Self::Growth => palette.power_up,
        }
    }

    /// Timed effect granted on pickup; `None` for instant kinds.
    #[must_use]
    pub fn timed_effect(self) -> Option<TimedEffect> {
        match self {
            Self::Speed => Some(TimedEffect::new(TimedEffectKind::Speed)),
            Self::Invincibility => Some(TimedEffect::new(TimedEffectKind::Invincibility)),
            Self::Growth => None,
        }
    }
}

/// A power-up marker waiting on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PowerUp {
    pub object: GridObject,
    pub kind: PowerUpKind,
}

impl PowerUp {
    #[must_use]
    pub fn new(position: Position, kind: PowerUpKind, palette: &Palette) -> Self {
        Self {
            object: GridObject::new(position, kind.color(palette)),
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.object.position
    }
}

/// Effects that run on the shared power-up timer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimedEffectKind {
    Speed,
    Invincibility,
}

/// The single timed effect a snake may carry.
///
/// Acquiring a new one replaces the old one outright, including its remaining
/// duration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TimedEffect {
    pub kind: TimedEffectKind,
    pub remaining_ticks: u32,
}

impl TimedEffect {
    #[must_use]
    pub fn new(kind: TimedEffectKind) -> Self {
        Self {
            kind,
            remaining_ticks: POWER_UP_DURATION_TICKS,
        }
    }

    /// Counts down one tick. Returns `true` once the effect has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{PowerUp, PowerUpKind, TimedEffect, TimedEffectKind};
    use crate::config::POWER_UP_DURATION_TICKS;
    use crate::snake::Position;
    use crate::theme::Palette;

    #[test]
    fn invincibility_marker_uses_its_own_color() {
        let palette = Palette::default();
        let shield = PowerUp::new(Position { x: 1, y: 1 }, PowerUpKind::Invincibility, &palette);
        let speed = PowerUp::new(Position { x: 2, y: 2 }, PowerUpKind::Speed, &palette);

        assert_eq!(shield.object.color, palette.invincibility);
        assert_eq!(speed.object.color, palette.power_up);
        assert_eq!(speed.position(), Position { x: 2, y: 2 });
    }

    #[test]
    fn growth_has_no_timed_effect() {
        assert_eq!(PowerUpKind::Growth.timed_effect(), None);
        assert_eq!(
            PowerUpKind::Speed.timed_effect().map(|effect| effect.kind),
            Some(TimedEffectKind::Speed)
        );
    }

    #[test]
    fn timed_effect_expires_after_full_duration() {
        let mut effect = TimedEffect::new(TimedEffectKind::Invincibility);

        for _ in 0..POWER_UP_DURATION_TICKS - 1 {
            assert!(!effect.tick());
        }

        assert!(effect.tick());
        assert_eq!(effect.remaining_ticks, 0);
    }

    #[test]
    fn random_kind_covers_every_variant() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = Vec::new();

        for _ in 0..200 {
            let kind = PowerUpKind::random(&mut rng);
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }

        assert_eq!(seen.len(), PowerUpKind::ALL.len());
    }
}
