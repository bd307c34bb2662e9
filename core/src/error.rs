use std::io;

use thiserror::Error;

/// Everything that can stop a program from running.
///
/// None of these are recoverable by the interpreter; it halts and hands the
/// error to whoever called `run`.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("program image is {size} bytes but at most {max} bytes fit in memory")]
    ImageTooLarge { size: usize, max: usize },

    #[error("unable to read program image: {0}")]
    SourceUnavailable(#[from] io::Error),

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("program counter {pc:#06X} ran past the end of memory")]
    OutOfProgram { pc: u16 },

    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("return with an empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}
