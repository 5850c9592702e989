use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::console::Hardware;
use crate::error::CoreError;
use crate::font;
use crate::opcode::Opcode;
use crate::registers::{Registers, FLAG};
use crate::timers::Timers;

/// Execution mode of the interpreter.
///
/// `AwaitingKey` is the one blocking state: Fx0A parks the CPU (and with
/// it the whole frame tick, timers included) until the console resolves
/// the wait with the next key-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Running,
    AwaitingKey { register: u8 },
}

/// The interpreter: registers, timers, execution mode, and the RNG that
/// feeds Cxkk. Peripherals are borrowed per-step from the console's
/// [`Hardware`] bundle.
pub(crate) struct Cpu {
    pub(crate) regs: Registers,
    pub(crate) timers: Timers,
    mode: Mode,
    rng: StdRng,
}

impl Cpu {
    pub(crate) fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Fixed-seed construction, for deterministic replay and tests.
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Cpu {
            regs: Registers::new(),
            timers: Timers::new(),
            mode: Mode::Running,
            rng,
        }
    }

    pub(crate) fn is_halted(&self) -> bool {
        self.mode != Mode::Running
    }

    /// Resolves a pending Fx0A wait: stores the pressed key in the awaited
    /// register and resumes execution. A no-op while running.
    pub(crate) fn resume_with_key(&mut self, key: u8) {
        if let Mode::AwaitingKey { register } = self.mode {
            self.regs.v[register as usize] = key;
            self.mode = Mode::Running;
        }
    }

    /// Fetches the two bytes at PC, advances PC past them, and executes
    /// the decoded instruction.
    pub(crate) fn step(&mut self, hw: &mut Hardware) -> Result<(), CoreError> {
        let high = hw.memory.read(self.regs.pc)?;
        let low = hw.memory.read(self.regs.pc.wrapping_add(1))?;
        let op = Opcode::from_bytes(high, low);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        log::trace!("exec {:04X} pc={:04X} i={:04X}", op.word(), self.regs.pc, self.regs.i);
        self.exec(op, hw)
    }

    fn exec(&mut self, op: Opcode, hw: &mut Hardware) -> Result<(), CoreError> {
        let x = op.x() as usize;
        match op.family() {
            0x0 => match op.word() {
                // 00E0 CLS
                0x00E0 => hw.framebuffer.clear(),
                // 00EE RET
                0x00EE => self.regs.pc = hw.stack.pop()?,
                // 0nnn machine-code calls are not emulated.
                _ => self.unknown(op),
            },
            // 1nnn JP addr
            0x1 => self.regs.pc = op.nnn(),
            // 2nnn CALL addr
            0x2 => {
                hw.stack.push(self.regs.pc)?;
                self.regs.pc = op.nnn();
            }
            // 3xkk SE Vx, byte
            0x3 => self.skip_if(self.regs.v[x] == op.kk()),
            // 4xkk SNE Vx, byte
            0x4 => self.skip_if(self.regs.v[x] != op.kk()),
            // 5xy0 SE Vx, Vy
            0x5 => match op.n() {
                0x0 => self.skip_if(self.regs.v[x] == self.regs.v[op.y() as usize]),
                _ => self.unknown(op),
            },
            // 6xkk LD Vx, byte
            0x6 => self.regs.v[x] = op.kk(),
            // 7xkk ADD Vx, byte (no flag)
            0x7 => self.regs.v[x] = self.regs.v[x].wrapping_add(op.kk()),
            0x8 => self.exec_alu(op),
            // 9xy0 SNE Vx, Vy
            0x9 => match op.n() {
                0x0 => self.skip_if(self.regs.v[x] != self.regs.v[op.y() as usize]),
                _ => self.unknown(op),
            },
            // Annn LD I, addr
            0xA => self.regs.i = op.nnn(),
            // Bnnn JP V0, addr
            0xB => self.regs.pc = op.nnn().wrapping_add(u16::from(self.regs.v[0])),
            // Cxkk RND Vx, byte
            0xC => self.regs.v[x] = self.rng.gen::<u8>() & op.kk(),
            // Dxyn DRW Vx, Vy, nibble
            0xD => {
                let rows = hw.memory.slice(self.regs.i, op.n() as usize)?;
                let collision =
                    hw.framebuffer
                        .draw_sprite(self.regs.v[x], self.regs.v[op.y() as usize], rows);
                self.regs.v[FLAG] = collision as u8;
            }
            0xE => match op.kk() {
                // Ex9E SKP Vx
                0x9E => self.skip_if(hw.keyboard.is_down(self.regs.v[x])?),
                // ExA1 SKNP Vx
                0xA1 => self.skip_if(!hw.keyboard.is_down(self.regs.v[x])?),
                _ => self.unknown(op),
            },
            0xF => self.exec_misc(op, hw)?,
            _ => self.unknown(op),
        }
        Ok(())
    }

    /// The 8xy_ register-register ALU family.
    ///
    /// Both operands are read up front and VF is written after the result,
    /// so the flag always reflects pre-operation values and wins when
    /// x == 0xF. Shifts operate on Vx alone (the modern convention; the
    /// legacy Vy-source variant is deliberately not implemented).
    fn exec_alu(&mut self, op: Opcode) {
        let x = op.x() as usize;
        let (vx, vy) = (self.regs.v[x], self.regs.v[op.y() as usize]);
        match op.n() {
            // 8xy0 LD
            0x0 => self.regs.v[x] = vy,
            // 8xy1 OR
            0x1 => self.regs.v[x] = vx | vy,
            // 8xy2 AND
            0x2 => self.regs.v[x] = vx & vy,
            // 8xy3 XOR
            0x3 => self.regs.v[x] = vx ^ vy,
            // 8xy4 ADD; VF = carry out of the 9-bit sum
            0x4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.regs.v[x] = sum;
                self.regs.v[FLAG] = carry as u8;
            }
            // 8xy5 SUB; VF = NOT borrow (strict compare: equal clears it)
            0x5 => {
                self.regs.v[x] = vx.wrapping_sub(vy);
                self.regs.v[FLAG] = (vx > vy) as u8;
            }
            // 8xy6 SHR; VF = old low bit
            0x6 => {
                self.regs.v[x] = vx >> 1;
                self.regs.v[FLAG] = vx & 0x1;
            }
            // 8xy7 SUBN; VF = NOT borrow of Vy - Vx
            0x7 => {
                self.regs.v[x] = vy.wrapping_sub(vx);
                self.regs.v[FLAG] = (vy > vx) as u8;
            }
            // 8xyE SHL; VF = old high bit
            0xE => {
                self.regs.v[x] = vx << 1;
                self.regs.v[FLAG] = vx >> 7;
            }
            _ => self.unknown(op),
        }
    }

    /// The Fx__ family: timers, key wait, index arithmetic, and the
    /// memory transfer instructions.
    fn exec_misc(&mut self, op: Opcode, hw: &mut Hardware) -> Result<(), CoreError> {
        let x = op.x() as usize;
        match op.kk() {
            // Fx07 LD Vx, DT
            0x07 => self.regs.v[x] = self.timers.delay,
            // Fx0A LD Vx, K: park until the next key-down
            0x0A => self.mode = Mode::AwaitingKey { register: op.x() },
            // Fx15 LD DT, Vx
            0x15 => self.timers.delay = self.regs.v[x],
            // Fx18 LD ST, Vx
            0x18 => self.timers.sound = self.regs.v[x],
            // Fx1E ADD I, Vx (no flag)
            0x1E => self.regs.i = self.regs.i.wrapping_add(u16::from(self.regs.v[x])),
            // Fx29 LD F, Vx: point I at the glyph sprite for digit Vx
            0x29 => {
                self.regs.i = font::FONT_ADDR
                    + u16::from(self.regs.v[x]) * u16::from(font::GLYPH_HEIGHT);
            }
            // Fx33 LD B, Vx: decimal digits of Vx at I, I+1, I+2
            0x33 => {
                let vx = self.regs.v[x];
                hw.memory.write(self.regs.i, vx / 100)?;
                hw.memory.write(self.regs.i.wrapping_add(1), vx / 10 % 10)?;
                hw.memory.write(self.regs.i.wrapping_add(2), vx % 10)?;
            }
            // Fx55 LD [I], Vx: store V0..=Vx
            0x55 => {
                for r in 0..=x {
                    hw.memory
                        .write(self.regs.i.wrapping_add(r as u16), self.regs.v[r])?;
                }
            }
            // Fx65 LD Vx, [I]: load V0..=Vx
            0x65 => {
                for r in 0..=x {
                    self.regs.v[r] = hw.memory.read(self.regs.i.wrapping_add(r as u16))?;
                }
            }
            _ => self.unknown(op),
        }
        Ok(())
    }

    fn skip_if(&mut self, cond: bool) {
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add(2);
        }
    }

    /// Unrecognized bit patterns execute as no-ops, matching the lenient
    /// behavior of the historical interpreters.
    fn unknown(&self, op: Opcode) {
        log::warn!("ignoring unrecognized opcode {:04X}", op.word());
    }
}
