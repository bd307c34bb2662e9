use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use emu8_core::Audio;

const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.1;
const SAMPLE_RATE: i32 = 44_100;

/// Each request keeps the tone going for one 60Hz tick
const TICKS_PER_SECOND: u32 = 60;

/// A square wave that only sounds while `remaining` samples are left
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    remaining: Arc<AtomicU32>,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            let sounding = self
                .remaining
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
                .is_ok();
            *x = match (sounding, self.phase <= 0.5) {
                (false, _) => 0.0,
                (true, true) => VOLUME,
                (true, false) => -VOLUME,
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Beeps through the default SDL audio device
pub struct SdlSpeaker {
    device: AudioDevice<SquareWave>,
    remaining: Arc<AtomicU32>,
    samples_per_tone: u32,
}

impl SdlSpeaker {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, Box<dyn Error>> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let remaining = Arc::new(AtomicU32::new(0));
        let gate = Arc::clone(&remaining);
        let mut samples_per_tone = SAMPLE_RATE as u32 / TICKS_PER_SECOND;

        let device = audio_subsystem.open_playback(None, &desired, |spec| {
            samples_per_tone = spec.freq as u32 / TICKS_PER_SECOND;
            SquareWave {
                phase_inc: PITCH / spec.freq as f32,
                phase: 0.0,
                remaining: gate,
            }
        })?;
        device.resume();

        Ok(SdlSpeaker {
            device,
            remaining,
            samples_per_tone,
        })
    }
}

impl Audio for SdlSpeaker {
    fn play_tone(&mut self) {
        self.remaining
            .store(self.samples_per_tone, Ordering::Relaxed);
    }
}

impl Drop for SdlSpeaker {
    fn drop(&mut self) {
        self.device.pause();
    }
}
