use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::Keyboard;
use emu8_display::SharedEvents;

use crate::keymap::{keymap, scancode};

/// Reads the keypad from the keyboard of the SDL window
pub struct SdlKeyboard {
    events: SharedEvents,
}

impl SdlKeyboard {
    pub fn new(events: SharedEvents) -> Self {
        SdlKeyboard { events }
    }
}

impl Keyboard for SdlKeyboard {
    fn is_down(&mut self, key: u8) -> bool {
        match scancode(key) {
            Some(scancode) => self
                .events
                .borrow()
                .keyboard_state()
                .is_scancode_pressed(scancode),
            None => false,
        }
    }

    /// Blocks on the window's events until a mapped key goes down. Closing the
    /// window or pressing escape gives up.
    fn wait_for_key(&mut self) -> Option<u8> {
        let mut events = self.events.borrow_mut();
        loop {
            match events.wait_event() {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return None,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        return Some(kc);
                    }
                }
                _ => continue,
            }
        }
    }
}
