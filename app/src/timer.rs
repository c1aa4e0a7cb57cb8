use serde::{Deserialize, Serialize};

/// Elapsed seconds after which the renderer should blink the timer. Purely a
/// display flag: scoring and records always use the literal elapsed time.
pub const WARNING_AFTER_SECS: u32 = 300;

/// Session clock, advanced by the host loop once per second while the game is
/// running. A plain counter rather than wall-clock timestamps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    elapsed_secs: u32,
}

impl SessionClock {
    pub fn tick(&mut self) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_warning(&self) -> bool {
        self.elapsed_secs >= WARNING_AFTER_SECS
    }

    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_starts_at_the_threshold() {
        let mut clock = SessionClock::default();
        for _ in 0..WARNING_AFTER_SECS - 1 {
            clock.tick();
        }
        assert!(!clock.is_warning());

        clock.tick();
        assert!(clock.is_warning());
        assert_eq!(clock.elapsed_secs(), WARNING_AFTER_SECS);

        clock.reset();
        assert!(!clock.is_warning());
        assert_eq!(clock.elapsed_secs(), 0);
    }
}
