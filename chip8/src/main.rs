use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use emu8_core::{Config, Quirks};

mod keyboard;
mod keymap;
mod run;
mod speaker;

/// Runs a Chip-8 ROM in an SDL window
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// ROM to run
    #[arg(env = "ROM_FILE")]
    rom: PathBuf,

    /// Microseconds from the start of one instruction to the next
    #[arg(long, default_value_t = 500)]
    cycle_delay_us: u64,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Don't open an audio device
    #[arg(long)]
    mute: bool,

    /// Shift left copies bit 3 into VF instead of bit 7
    #[arg(long)]
    shift_left_bit3: bool,

    /// Fx29 points I at the glyph for Vx instead of address Vx
    #[arg(long)]
    scaled_font_index: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = run::Options {
        rom: args.rom,
        config: Config {
            cycle_delay: Duration::from_micros(args.cycle_delay_us),
            quirks: Quirks {
                shift_left_bit3: args.shift_left_bit3,
                scaled_font_index: args.scaled_font_index,
            },
        },
        scale: args.scale,
        mute: args.mute,
    };

    match run::run(&options) {
        Ok(reason) => {
            log::info!("bye! ({:?})", reason);
            Ok(())
        }
        Err(e) => {
            log::error!("{}", e);
            Err(e)
        }
    }
}
