use crate::memory::PROGRAM_ADDR;

/// Index of VF, the flag register.
pub const FLAG: usize = 0xF;

/// The register file.
///
/// - `v` - 16 general-purpose 8-bit registers V0..VF. VF doubles as the
///   carry/borrow/collision flag: every arithmetic, shift, and draw opcode
///   that defines a flag overwrites it unconditionally, even when VF was
///   one of the operands.
/// - `i` - the 16-bit index register used for memory addressing.
/// - `pc` - the 16-bit program counter; starts at the program load address.
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
