//! The interpreter's view of the outside world.
//!
//! The interpreter doesn't know how pixels reach a screen, where key presses
//! come from or how a beep is made; a frontend provides those by implementing
//! these traits.

use crate::framebuffer::FrameBuffer;

/// Something that can show the frame buffer
pub trait Display {
    /// Draw the current frame. Called whenever the frame buffer changes.
    fn render(&mut self, frame: &FrameBuffer);

    /// Whether the host surface is still there; the interpreter halts once
    /// this returns false
    fn is_open(&mut self) -> bool;
}

/// The hexadecimal keypad
pub trait Keyboard {
    /// Whether `key` (0x0..=0xF) is currently held
    fn is_down(&mut self, key: u8) -> bool;

    /// Block until a key is pressed, returning it.
    ///
    /// Returns `None` if the host shuts down while waiting.
    fn wait_for_key(&mut self) -> Option<u8>;
}

/// Something that can beep
pub trait Audio {
    /// Sound a tone for at least the current cycle. Called once per cycle
    /// while the sound timer is running.
    fn play_tone(&mut self);
}

/// An `Audio` that stays quiet
#[derive(Debug, Default)]
pub struct Mute;

impl Audio for Mute {
    fn play_tone(&mut self) {}
}
