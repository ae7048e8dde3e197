//! Tone speaker
//!
//! Plays the game's clips as short note sequences on a square-wave
//! output (a PWM channel driving a piezo or small speaker). Clips are
//! fixed tables; nothing is decoded at runtime.

use embedded_hal_async::delay::DelayNs;
use quizbuzz_core::traits::{Sound, SoundPlayer};

/// Square-wave output the speaker drives
pub trait ToneOutput {
    /// Start a tone at the given frequency
    fn start_tone(&mut self, frequency_hz: u32);

    /// Silence the output
    fn stop_tone(&mut self);
}

/// One step of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Tone frequency; 0 is a rest
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Note {
    pub const fn tone(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    pub const fn rest(duration_ms: u32) -> Self {
        Self::tone(0, duration_ms)
    }

    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Harsh double blast for a won buzz
const BUZZER_CLIP: &[Note] = &[
    Note::tone(220, 250),
    Note::rest(40),
    Note::tone(220, 400),
];

/// Rising fanfare announcing a round
const SHOWDOWN_CLIP: &[Note] = &[
    Note::tone(392, 150),
    Note::tone(523, 150),
    Note::tone(659, 150),
    Note::rest(60),
    Note::tone(784, 450),
];

/// Note sequence for a clip
pub fn clip(sound: Sound) -> &'static [Note] {
    match sound {
        Sound::Buzzer => BUZZER_CLIP,
        Sound::Showdown => SHOWDOWN_CLIP,
    }
}

/// Total playing time of a clip
pub fn clip_duration_ms(sound: Sound) -> u32 {
    clip(sound).iter().map(|note| note.duration_ms).sum()
}

/// Clip player over a tone output and a delay
pub struct ToneSpeaker<T, D> {
    output: T,
    delay: D,
}

impl<T: ToneOutput, D: DelayNs> ToneSpeaker<T, D> {
    /// Create a speaker, silent until the first clip
    pub fn new(mut output: T, delay: D) -> Self {
        output.stop_tone();
        Self { output, delay }
    }

    /// Play an arbitrary note sequence to completion
    pub async fn play_notes(&mut self, notes: &[Note]) {
        for note in notes {
            if note.is_rest() {
                self.output.stop_tone();
            } else {
                self.output.start_tone(note.frequency_hz);
            }
            self.delay.delay_ms(note.duration_ms).await;
        }
        self.output.stop_tone();
    }
}

impl<T: ToneOutput, D: DelayNs> SoundPlayer for ToneSpeaker<T, D> {
    async fn play(&mut self, sound: Sound) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Playing {} ({} ms)", sound.name(), clip_duration_ms(sound));

        self.play_notes(clip(sound)).await;
    }
}
