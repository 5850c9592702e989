pub use config::Config;
pub use console::Console;
pub use error::CoreError;
pub use framebuffer::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

mod config;
mod console;
mod cpu;
mod error;
mod font;
mod framebuffer;
mod keyboard;
mod memory;
mod opcode;
mod registers;
mod stack;
mod timers;
