use crate::error::CoreError;

/// Canonical CHIP-8 call depth.
pub const STACK_DEPTH: usize = 16;

/// Fixed-depth return-address stack for 2nnn/00EE.
///
/// Exceeding the depth in either direction is a contract violation, not a
/// recoverable condition; legal programs stay within 16 nested calls.
pub struct Stack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), CoreError> {
        if self.sp == STACK_DEPTH {
            return Err(CoreError::StackOverflow);
        }
        self.frames[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, CoreError> {
        if self.sp == 0 {
            return Err(CoreError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x200).unwrap();
        stack.push(0x400).unwrap();
        assert_eq!(stack.pop(), Ok(0x400));
        assert_eq!(stack.pop(), Ok(0x200));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_push_past_depth_overflows() {
        let mut stack = Stack::new();
        for _ in 0..STACK_DEPTH {
            stack.push(0x200).unwrap();
        }
        assert_eq!(stack.push(0x200), Err(CoreError::StackOverflow));
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(CoreError::StackUnderflow));
    }
}
