use std::cell::RefCell;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::rc::Rc;

use emu8_core::{Audio, Chip8, Chip8Error, Config, HaltReason, Mute};
use emu8_display::SdlDisplay;

use crate::keyboard::SdlKeyboard;
use crate::speaker::SdlSpeaker;

/// How to run a ROM
pub struct Options {
    pub rom: PathBuf,
    pub config: Config,
    /// Window pixels per Chip-8 pixel
    pub scale: u32,
    pub mute: bool,
}

pub fn run(options: &Options) -> Result<HaltReason, Box<dyn Error>> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let events = Rc::new(RefCell::new(sdl.event_pump()?));
    let mut display = SdlDisplay::new(&sdl, Rc::clone(&events), options.scale)?;
    let mut keyboard = SdlKeyboard::new(Rc::clone(&events));

    // Open ROM
    let file = File::open(&options.rom).map_err(Chip8Error::SourceUnavailable)?;
    let mut reader = BufReader::new(file);

    let reason = if options.mute {
        execute(
            &mut display,
            &mut keyboard,
            &mut Mute,
            options.config,
            &mut reader,
        )?
    } else {
        let mut speaker = SdlSpeaker::new(&sdl)?;
        execute(
            &mut display,
            &mut keyboard,
            &mut speaker,
            options.config,
            &mut reader,
        )?
    };
    Ok(reason)
}

fn execute<A: Audio>(
    display: &mut SdlDisplay,
    keyboard: &mut SdlKeyboard,
    audio: &mut A,
    config: Config,
    rom: &mut dyn Read,
) -> Result<HaltReason, Chip8Error> {
    let mut chip8 = Chip8::new(display, keyboard, audio, config);
    chip8.load_rom(rom)?;
    log::info!("successfully loaded ROM");
    chip8.run()
}
