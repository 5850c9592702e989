use std::time::Duration;

/// Scheduling parameters for one emulated console.
///
/// A plain value handed to [`crate::Console`] at construction, so two
/// consoles in one process can run at different speeds.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Instructions executed per frame tick.
    pub cycles_per_frame: u32,
    /// Wall-clock interval between frame ticks.
    pub frame_interval: Duration,
}

impl Default for Config {
    /// 10 instructions per tick at 60 ticks per second.
    fn default() -> Self {
        Config {
            cycles_per_frame: 10,
            frame_interval: Duration::from_nanos(1_000_000_000 / 60),
        }
    }
}
