//! Speaker output
//!
//! Clips are square waves on a PWM channel. The round driver and the
//! buzzer task share one speaker through an async mutex, so whoever asks
//! second waits for the running clip to finish.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use fixed::types::U12F4;
use quizbuzz_core::traits::{Sound, SoundPlayer};
use quizbuzz_drivers::speaker::{ToneOutput, ToneSpeaker};

/// PWM clock divider; keeps `top` within 16 bits down to ~30 Hz
const TONE_DIVIDER: u32 = 64;

/// Tone generator on one PWM channel (A side of the slice)
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
    clock_hz: u32,
}

impl PwmTone {
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = U12F4::from_num(TONE_DIVIDER);
        config.compare_a = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            clock_hz: embassy_rp::clocks::clk_sys_freq(),
        }
    }

    /// PWM wrap value for a tone frequency
    fn top_for(&self, frequency_hz: u32) -> u16 {
        let counts = self.clock_hz / TONE_DIVIDER / frequency_hz.max(1);
        counts.saturating_sub(1).min(u32::from(u16::MAX)) as u16
    }
}

impl ToneOutput for PwmTone {
    fn start_tone(&mut self, frequency_hz: u32) {
        let top = self.top_for(frequency_hz);
        self.config.top = top;
        // 50% duty
        self.config.compare_a = top / 2;
        self.pwm.set_config(&self.config);
    }

    fn stop_tone(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}

/// The board's speaker
pub type Speaker = ToneSpeaker<PwmTone, Delay>;

/// Handle to the shared speaker
#[derive(Clone, Copy)]
pub struct SharedSpeaker(&'static Mutex<CriticalSectionRawMutex, Speaker>);

impl SharedSpeaker {
    pub fn new(speaker: &'static Mutex<CriticalSectionRawMutex, Speaker>) -> Self {
        Self(speaker)
    }
}

impl SoundPlayer for SharedSpeaker {
    async fn play(&mut self, sound: Sound) {
        let mut speaker = self.0.lock().await;
        debug!("Sound: {}", sound.name());
        speaker.play(sound).await;
    }
}
