use crate::error::CoreError;

/// Number of keys on the hex pad.
pub const KEY_COUNT: usize = 16;

/// Key-down latches for the 16-key input pad.
///
/// This only tracks which keys are currently held; the Fx0A wait-for-key
/// mechanism lives in the CPU's execution mode and is resolved by the
/// console when a key goes down.
pub struct Keyboard {
    keys: [bool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard {
            keys: [false; KEY_COUNT],
        }
    }

    pub fn press(&mut self, key: u8) -> Result<(), CoreError> {
        *self
            .keys
            .get_mut(key as usize)
            .ok_or(CoreError::KeyOutOfBounds(key))? = true;
        Ok(())
    }

    pub fn release(&mut self, key: u8) -> Result<(), CoreError> {
        *self
            .keys
            .get_mut(key as usize)
            .ok_or(CoreError::KeyOutOfBounds(key))? = false;
        Ok(())
    }

    pub fn is_down(&self, key: u8) -> Result<bool, CoreError> {
        self.keys
            .get(key as usize)
            .copied()
            .ok_or(CoreError::KeyOutOfBounds(key))
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
