pub use chip8::{Chip8, HaltReason, Status, StopHandle};
pub use config::{Config, Quirks};
pub use error::Chip8Error;
pub use framebuffer::FrameBuffer;
pub use opcode::Instruction;
pub use ports::{Audio, Display, Keyboard, Mute};

mod chip8;
pub mod config;
pub mod constants;
mod error;
pub mod framebuffer;
mod instruction;
pub mod memory;
mod opcode;
mod operations;
pub mod ports;
pub mod state;
