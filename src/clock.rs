use crate::config::TICK_DIVISOR;

/// Counts rendered frames and reports when a simulation tick is due.
///
/// At speed 1 a tick is due every `frame_rate / 4` frames; faster snakes
/// shorten the interval proportionally.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SimulationClock {
    frames: u32,
}

impl SimulationClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one rendered frame. Returns `true` when a tick should run now.
    pub fn advance(&mut self, frame_rate: u32, speed: f32) -> bool {
        self.frames += 1;
        if self.frames >= frames_per_tick(frame_rate, speed) {
            self.frames = 0;
            return true;
        }
        false
    }
}

/// Frames between ticks, never less than one.
#[must_use]
pub fn frames_per_tick(frame_rate: u32, speed: f32) -> u32 {
    let frames = (frame_rate as f32 / (TICK_DIVISOR * speed)).floor();
    if frames.is_finite() && frames >= 1.0 {
        frames as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::{SimulationClock, frames_per_tick};

    #[test]
    fn interval_halves_at_double_speed() {
        assert_eq!(frames_per_tick(60, 1.0), 15);
        assert_eq!(frames_per_tick(60, 2.0), 7);
        assert_eq!(frames_per_tick(60, 0.5), 30);
    }

    #[test]
    fn interval_is_at_least_one_frame() {
        assert_eq!(frames_per_tick(2, 1.0), 1);
        assert_eq!(frames_per_tick(60, 0.0), 1);
    }

    #[test]
    fn clock_fires_on_the_fifteenth_frame_at_base_speed() {
        let mut clock = SimulationClock::new();

        for _ in 0..14 {
            assert!(!clock.advance(60, 1.0));
        }
        assert!(clock.advance(60, 1.0));

        for _ in 0..14 {
            assert!(!clock.advance(60, 1.0));
        }
        assert!(clock.advance(60, 1.0));
    }

    #[test]
    fn speed_boost_takes_effect_mid_interval() {
        let mut clock = SimulationClock::new();

        for _ in 0..6 {
            assert!(!clock.advance(60, 1.0));
        }
        assert!(clock.advance(60, 2.0));
    }
}
