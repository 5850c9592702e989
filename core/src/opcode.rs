/// A 16-bit instruction word.
///
/// Opcodes are dispatched on some combination of their nibbles:
/// - `[f···]` the high nibble selects the instruction family
/// - `[···n]` distinguishes operations within the 5xxx/8xxx/9xxx families
/// - `[··kk]` distinguishes operations within the Exxx/Fxxx families
///
/// The remaining bits carry operands:
/// - `[·x··]` the register Vx, or the upper bound of a register range
/// - `[··y·]` the register Vy
/// - `[···n]` a 4-bit immediate (sprite height)
/// - `[··kk]` an 8-bit immediate
/// - `[·nnn]` a 12-bit address
///
/// Every 16-bit value decodes; whether the resulting instruction is
/// recognized is the interpreter's concern, not the decoder's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    /// Combines the two bytes fetched at PC, big-endian.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// The full instruction word.
    pub fn word(self) -> u16 {
        self.0
    }

    /// The instruction family: the high nibble, in `[0x0, 0xF]`.
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// The register index in `[·x··]`, in `[0x0, 0xF]`.
    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    /// The register index in `[··y·]`, in `[0x0, 0xF]`.
    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }

    /// The 4-bit immediate in `[···n]`.
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The 8-bit immediate in `[··kk]`.
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The 12-bit address in `[·nnn]`.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_is_big_endian() {
        assert_eq!(Opcode::from_bytes(0xAB, 0xCD), Opcode::from(0xABCD));
    }

    #[test]
    fn test_family() {
        assert_eq!(Opcode::from(0xABCD).family(), 0xA);
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode::from(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode::from(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode::from(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_kk() {
        assert_eq!(Opcode::from(0xABCD).kk(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        assert_eq!(Opcode::from(0xABCD).nnn(), 0x0BCD);
    }

    #[test]
    fn test_fields_stay_in_range() {
        // The extremes of the word space decode to in-range fields.
        for word in [0x0000u16, 0xFFFF] {
            let op = Opcode::from(word);
            assert!(op.family() <= 0xF);
            assert!(op.x() <= 0xF);
            assert!(op.y() <= 0xF);
            assert!(op.n() <= 0xF);
            assert!(op.nnn() <= 0xFFF);
        }
    }
}
