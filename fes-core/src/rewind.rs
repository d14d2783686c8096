use crate::system::REWIND_COOLDOWN_TICKS;

/// Rate limits the audio rewind button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindCooldown {
    remaining: u32,
}

impl Default for RewindCooldown {
    fn default() -> Self {
        Self {
            remaining: REWIND_COOLDOWN_TICKS,
        }
    }
}

impl RewindCooldown {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances by one tick. Returns `true` if a rewind was `requested` and allowed,
    /// which restarts the cooldown.
    pub fn tick(&mut self, requested: bool) -> bool {
        if requested && self.remaining == 0 {
            self.remaining = REWIND_COOLDOWN_TICKS;
            return true;
        }

        self.remaining = self.remaining.saturating_sub(1);
        false
    }
}
