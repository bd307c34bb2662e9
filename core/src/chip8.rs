use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::constants::MAX_PROGRAM_SIZE;
use crate::error::Chip8Error;
use crate::instruction::{from_op, Effect};
use crate::opcode::Instruction;
use crate::ports::{Audio, Display, Keyboard};
use crate::state::State;

/// Why the interpreter stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// `StopHandle::stop` was called
    Stopped,
    /// The display reported it was no longer open
    DisplayClosed,
    /// The host shut down while the program waited for a key
    KeyWaitAborted,
    /// A cycle failed; the error was returned to the caller
    Fault,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(HaltReason),
}

/// Asks a running interpreter to stop.
///
/// The request is checked at the start of every cycle, so the interpreter
/// finishes the instruction it's on first. Handles can be cloned and sent to
/// other threads.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns the machine `state` for the whole run and borrows the `display`,
/// `keyboard` and `audio` it talks to.
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU a single cycle at a time
/// - running until the program, the host or a `StopHandle` ends things
/// - inspecting its state
pub struct Chip8<'a, D: Display, K: Keyboard, A: Audio> {
    state: State,
    config: Config,
    status: Status,
    stop: StopHandle,
    display: &'a mut D,
    keyboard: &'a mut K,
    audio: &'a mut A,
}

impl<'a, D: Display, K: Keyboard, A: Audio> Chip8<'a, D, K, A> {
    pub fn new(display: &'a mut D, keyboard: &'a mut K, audio: &'a mut A, config: Config) -> Self {
        Chip8 {
            state: State::with_quirks(config.quirks),
            config,
            status: Status::Running,
            stop: StopHandle::default(),
            display,
            keyboard,
            audio,
        }
    }

    /// Load a program image into memory
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), Chip8Error> {
        self.state.memory.load_program(image)?;
        log::debug!("loaded {} byte program", image.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// Reads at most one byte more than fits in memory, so an oversized or
    /// endless source is rejected without being read in full.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Chip8Error> {
        let mut image = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut image)?;
        self.load_program(&image)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run cycles until something halts the interpreter, pacing them
    /// `config.cycle_delay` apart.
    ///
    /// Returns why it halted, or the error that made it halt.
    pub fn run(&mut self) -> Result<HaltReason, Chip8Error> {
        let mut last_cycle = Instant::now();
        loop {
            if let Status::Halted(reason) = self.status {
                return Ok(reason);
            }

            if self.stop.is_stopped() {
                self.halt(HaltReason::Stopped);
            } else if !self.display.is_open() {
                self.halt(HaltReason::DisplayClosed);
            } else {
                self.step()?;

                // Handle timing
                let elapsed_cycle_time = last_cycle.elapsed();
                if self.config.cycle_delay > elapsed_cycle_time {
                    thread::sleep(self.config.cycle_delay - elapsed_cycle_time);
                }
                last_cycle = Instant::now();
            }
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches, decodes and executes the next instruction
    /// - counts the timers down
    ///
    /// Does nothing once halted. Any error halts the interpreter.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        if self.status != Status::Running {
            return Ok(());
        }
        let result = self.cycle();
        if let Err(e) = &result {
            log::debug!("cycle failed: {}", e);
            self.halt(HaltReason::Fault);
        }
        result
    }

    fn cycle(&mut self) -> Result<(), Chip8Error> {
        let pc = self.state.pc;
        let bytes = self.state.memory.fetch(pc)?;
        self.state.pc = pc.wrapping_add(0x2);

        let op = Instruction::decode(bytes);
        log::trace!(
            "{:04X} pc{:03X} v{:02X?} i{:03X}",
            op.raw,
            pc,
            self.state.v,
            self.state.i
        );
        let operation = from_op(&op).ok_or(Chip8Error::UnknownOpcode { opcode: op.raw, pc })?;

        match operation(&op, &mut self.state, &mut *self.keyboard)? {
            Effect::Continue => {}
            Effect::Render => self.display.render(&self.state.frame_buffer),
            Effect::Halt => {
                self.halt(HaltReason::KeyWaitAborted);
                return Ok(());
            }
        }

        if self.state.tick_timers() {
            self.audio.play_tone();
        }
        Ok(())
    }

    fn halt(&mut self, reason: HaltReason) {
        log::debug!("halted at {:03X}: {:?}", self.state.pc, reason);
        self.status = Status::Halted(reason);
    }
}
