use crate::error::CoreError;
use crate::font;

/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Where cartridges load. Everything below belongs to the interpreter
/// (the font sprites live at the bottom of that region).
pub const PROGRAM_ADDR: u16 = 0x200;

/// Flat byte-addressed RAM.
///
/// Allocated once per console and never resized. Every accessor is
/// bounds-checked; an out-of-range address is a contract violation
/// surfaced as [`CoreError::AddressOutOfBounds`].
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed RAM with the font glyphs baked in at [`font::FONT_ADDR`].
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let start = font::FONT_ADDR as usize;
        bytes[start..start + font::GLYPHS.len()].copy_from_slice(&font::GLYPHS);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> Result<u8, CoreError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(CoreError::AddressOutOfBounds(addr))
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), CoreError> {
        *self
            .bytes
            .get_mut(addr as usize)
            .ok_or(CoreError::AddressOutOfBounds(addr))? = value;
        Ok(())
    }

    /// Borrows `len` bytes starting at `addr`, e.g. the rows of a sprite.
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8], CoreError> {
        let start = addr as usize;
        self.bytes
            .get(start..start + len)
            .ok_or(CoreError::AddressOutOfBounds(addr))
    }

    /// Bulk-installs `data` at `addr`. Nothing is written on failure.
    pub fn load(&mut self, addr: u16, data: &[u8]) -> Result<(), CoreError> {
        let start = addr as usize;
        self.bytes
            .get_mut(start..start + data.len())
            .ok_or(CoreError::AddressOutOfBounds(addr))?
            .copy_from_slice(data);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_memory_has_font_then_zeroes() {
        let memory = Memory::new();
        assert_eq!(memory.bytes[..80], font::GLYPHS);
        assert_eq!(memory.bytes[80..], [0; MEMORY_SIZE - 80]);
    }

    #[test]
    fn test_read_write_round_trip() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAB).unwrap();
        assert_eq!(memory.read(0x200), Ok(0xAB));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = Memory::new();
        assert_eq!(memory.read(0x1000), Err(CoreError::AddressOutOfBounds(0x1000)));
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.write(0x1000, 0xFF),
            Err(CoreError::AddressOutOfBounds(0x1000))
        );
    }

    #[test]
    fn test_slice_reads_sprite_rows() {
        let mut memory = Memory::new();
        memory.load(0x300, &[0x3C, 0x42, 0x81]).unwrap();
        assert_eq!(memory.slice(0x300, 3), Ok(&[0x3C, 0x42, 0x81][..]));
    }

    #[test]
    fn test_slice_past_end() {
        let memory = Memory::new();
        assert_eq!(
            memory.slice(0xFFE, 3),
            Err(CoreError::AddressOutOfBounds(0xFFE))
        );
    }

    #[test]
    fn test_load_past_end_leaves_memory_untouched() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.load(0xFFE, &[1, 2, 3]),
            Err(CoreError::AddressOutOfBounds(0xFFE))
        );
        assert_eq!(memory.read(0xFFE), Ok(0));
        assert_eq!(memory.read(0xFFF), Ok(0));
    }
}
