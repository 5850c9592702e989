use thiserror::Error;

/// Fatal contract violations raised by the core.
///
/// Well-formed programs cannot trigger any of these through legal opcodes;
/// when one surfaces it means the cartridge is malformed and the run should
/// be aborted rather than continued on corrupt state. Unrecognized opcodes
/// are deliberately *not* errors (they execute as no-ops).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("address {0:#05x} is outside addressable memory")]
    AddressOutOfBounds(u16),
    #[error("call stack overflow")]
    StackOverflow,
    #[error("call stack underflow")]
    StackUnderflow,
    #[error("key {0:#x} is not on the hex keypad")]
    KeyOutOfBounds(u8),
    #[error("cartridge of {0} bytes does not fit in program memory")]
    CartridgeTooLarge(usize),
}
