/// The two 8-bit countdown timers.
///
/// Both count down once per frame tick while above zero and floor at zero.
/// The delay timer is program-visible through Fx07/Fx15; the sound timer
/// (Fx18) keeps the beeper on while it is nonzero.
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers { delay: 0, sound: 0 }
    }

    /// One frame tick's worth of decrement.
    pub fn tick(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        }
        if self.sound > 0 {
            self.sound -= 1;
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_decrements_both_timers() {
        let mut timers = Timers::new();
        timers.delay = 2;
        timers.sound = 1;
        timers.tick();
        assert_eq!(timers.delay, 1);
        assert_eq!(timers.sound, 0);
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timers = Timers::new();
        for _ in 0..3 {
            timers.tick();
        }
        assert_eq!(timers.delay, 0);
        assert_eq!(timers.sound, 0);
    }
}
