//! Sound playback trait

/// Named sound clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sound {
    /// Played when a team wins the buzz
    Buzzer,
    /// Played when a round opens, before the buzzers go live
    Showdown,
}

impl Sound {
    /// Asset name of the clip
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Buzzer => "buzzer",
            Sound::Showdown => "showdown",
        }
    }
}

/// Trait for clip playback
///
/// `play` resolves only once the clip has finished. There is no way to
/// interrupt a clip.
#[allow(async_fn_in_trait)]
pub trait SoundPlayer {
    /// Play a clip to completion
    async fn play(&mut self, sound: Sound);
}
