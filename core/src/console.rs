use crate::config::Config;
use crate::cpu::Cpu;
use crate::error::CoreError;
use crate::framebuffer::FrameBuffer;
use crate::keyboard::Keyboard;
use crate::memory::{Memory, MEMORY_SIZE, PROGRAM_ADDR};
use crate::stack::Stack;

/// The passive peripherals the CPU drives: RAM, the call stack, the
/// framebuffer, and the key pad. Bundled separately from the CPU so a
/// single step can borrow the CPU mutably alongside all of them.
pub(crate) struct Hardware {
    pub(crate) memory: Memory,
    pub(crate) stack: Stack,
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) keyboard: Keyboard,
}

impl Hardware {
    pub(crate) fn new() -> Self {
        Hardware {
            memory: Memory::new(),
            stack: Stack::new(),
            framebuffer: FrameBuffer::new(),
            keyboard: Keyboard::new(),
        }
    }
}

/// A complete machine: one CPU wired to one set of peripherals.
///
/// Frontends drive it with three calls: [`Console::insert_program`] once,
/// [`Console::cycle`] every frame, and the key-event setters as input
/// arrives. Everything else is read-only observation of the results.
pub struct Console {
    cpu: Cpu,
    hw: Hardware,
    config: Config,
    sound_active: bool,
}

impl Console {
    pub fn new(config: Config) -> Self {
        Self::build(config, Cpu::new())
    }

    /// A console whose Cxkk stream is reproducible, for replay and tests.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::build(config, Cpu::with_seed(seed))
    }

    fn build(config: Config, cpu: Cpu) -> Self {
        Console {
            cpu,
            hw: Hardware::new(),
            config,
            sound_active: false,
        }
    }

    /// Copies a cartridge image into RAM at the program start address.
    pub fn insert_program(&mut self, rom: &[u8]) -> Result<(), CoreError> {
        if rom.len() > MEMORY_SIZE - PROGRAM_ADDR as usize {
            return Err(CoreError::CartridgeTooLarge(rom.len()));
        }
        log::info!("loading {} byte cartridge at {:#05x}", rom.len(), PROGRAM_ADDR);
        self.hw.memory.load(PROGRAM_ADDR, rom)?;
        self.cpu.regs.pc = PROGRAM_ADDR;
        Ok(())
    }

    /// Runs one frame: a batch of instructions followed by one timer tick.
    ///
    /// While the CPU is parked on a key wait nothing advances, timers
    /// included. A wait hit mid-batch ends the frame early, before the
    /// tick, so timers freeze on the same frame the wait begins.
    pub fn cycle(&mut self) -> Result<(), CoreError> {
        if self.cpu.is_halted() {
            return Ok(());
        }
        self.hw.framebuffer.reset_dirty();
        self.sound_active = false;
        for _ in 0..self.config.cycles_per_frame {
            self.cpu.step(&mut self.hw)?;
            if self.cpu.is_halted() {
                return Ok(());
            }
        }
        self.cpu.timers.tick();
        self.sound_active = self.cpu.timers.sound > 0;
        Ok(())
    }

    /// Records a key press. If the CPU is parked on a key wait this is
    /// the event that resolves it.
    pub fn set_key_down(&mut self, key: u8) -> Result<(), CoreError> {
        self.hw.keyboard.press(key)?;
        self.cpu.resume_with_key(key);
        Ok(())
    }

    pub fn set_key_up(&mut self, key: u8) -> Result<(), CoreError> {
        self.hw.keyboard.release(key)
    }

    pub fn is_key_down(&self, key: u8) -> Result<bool, CoreError> {
        self.hw.keyboard.is_down(key)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.hw.framebuffer
    }

    /// Whether the last [`Console::cycle`] changed any pixel.
    pub fn should_render(&self) -> bool {
        self.hw.framebuffer.dirty()
    }

    /// Whether the sound timer was live after the last frame's tick.
    pub fn sound_active(&self) -> bool {
        self.sound_active
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> Console {
        Console::with_seed(Config::default(), 0)
    }

    #[test]
    fn test_cycle_runs_a_batch_then_ticks_timers() {
        let mut console = console();
        // V1 = 5, DT = V1, then spin.
        console
            .insert_program(&[0x61, 0x05, 0xF1, 0x15, 0x12, 0x04])
            .unwrap();
        console.cycle().unwrap();
        assert_eq!(console.cpu.regs.pc, 0x204);
        assert_eq!(console.cpu.timers.delay, 4);
    }

    #[test]
    fn test_key_wait_freezes_the_machine() {
        let mut console = console();
        // V1 = 5, DT = V1, then wait for a key into V1.
        console
            .insert_program(&[0x61, 0x05, 0xF1, 0x15, 0xF1, 0x0A])
            .unwrap();
        console.cycle().unwrap();
        // The wait ended the frame before the tick, and further frames
        // are no-ops.
        console.cycle().unwrap();
        assert_eq!(console.cpu.timers.delay, 5);
        console.set_key_down(0xA).unwrap();
        assert_eq!(console.cpu.regs.v[0x1], 0xA);
        // Resumed: the next frame executes and ticks again.
        console.cycle().unwrap();
        assert_eq!(console.cpu.timers.delay, 4);
    }

    #[test]
    fn test_insert_program_rejects_oversized_cartridge() {
        let mut console = console();
        let rom = vec![0; 3585];
        assert_eq!(
            console.insert_program(&rom),
            Err(CoreError::CartridgeTooLarge(3585))
        );
        // One byte smaller fits exactly.
        assert_eq!(console.insert_program(&vec![0; 3584]), Ok(()));
    }

    #[test]
    fn test_seeded_consoles_agree() {
        let (mut a, mut b) = (console(), console());
        let rom = [0xC0, 0xFF, 0x12, 0x00];
        a.insert_program(&rom).unwrap();
        b.insert_program(&rom).unwrap();
        a.cycle().unwrap();
        b.cycle().unwrap();
        assert_eq!(a.cpu.regs.v[0x0], b.cpu.regs.v[0x0]);
    }

    #[test]
    fn test_sound_flag_follows_the_sound_timer() {
        let mut console = console();
        // ST = 5, then spin.
        console
            .insert_program(&[0x61, 0x05, 0xF1, 0x18, 0x12, 0x04])
            .unwrap();
        console.cycle().unwrap();
        assert!(console.sound_active());
        for _ in 0..4 {
            console.cycle().unwrap();
        }
        assert!(!console.sound_active());
    }

    #[test]
    fn test_should_render_tracks_the_last_frame_only() {
        let mut console = console();
        // CLS once, then spin without touching the screen.
        console
            .insert_program(&[0x00, 0xE0, 0x12, 0x02])
            .unwrap();
        console.cycle().unwrap();
        assert!(console.should_render());
        console.cycle().unwrap();
        assert!(!console.should_render());
    }

    #[test]
    fn test_key_state_round_trip() {
        let mut console = console();
        console.set_key_down(0x4).unwrap();
        assert_eq!(console.is_key_down(0x4), Ok(true));
        console.set_key_up(0x4).unwrap();
        assert_eq!(console.is_key_down(0x4), Ok(false));
        assert_eq!(
            console.set_key_down(0x10),
            Err(CoreError::KeyOutOfBounds(0x10))
        );
    }
}
