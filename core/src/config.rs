use std::time::Duration;

use crate::constants::CYCLE_DELAY;

/// Settings for a single run of the interpreter
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Minimum time from the start of one cycle to the start of the next
    pub cycle_delay: Duration,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycle_delay: CYCLE_DELAY,
            quirks: Quirks::default(),
        }
    }
}

/// # Quirks
/// Interpreters disagree on a couple of instructions. The defaults follow the
/// behaviour programs for this machine are most commonly written against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8xyE` copies bit 3 of Vx into VF rather than bit 7 (the bit that is
    /// actually shifted out)
    pub shift_left_bit3: bool,

    /// `Fx29` points I at the glyph for digit Vx (`Vx * 5`) rather than at
    /// address Vx
    pub scaled_font_index: bool,
}
