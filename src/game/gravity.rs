use std::time::Duration;

use crate::constants::BOARD_HEIGHT;

// A stalled frame never drops more than a full well height at once
const MAX_STEPS_PER_ADVANCE: u32 = BOARD_HEIGHT as u32;

/// Accumulates wall time and releases one gravity step per interval.
#[derive(Debug, Clone)]
pub struct Gravity {
    interval: Duration,
    accumulated: Duration,
}

impl Gravity {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Adds `elapsed` and returns how many steps are now due. The remainder
    /// carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }

        self.accumulated += elapsed;
        let mut steps = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            steps += 1;
            if steps == MAX_STEPS_PER_ADVANCE {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
