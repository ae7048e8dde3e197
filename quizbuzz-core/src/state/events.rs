//! Events that trigger phase transitions

/// Events that can advance a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Judge console events
    /// The judge's `start` was accepted
    StartAccepted,
    /// The judge picked the team that answered
    TeamChosen,
    /// The judge entered a valid award
    PointsAwarded,

    // Hardware events
    /// Showdown cue finished playing, buzzers are live
    ShowdownFinished,
    /// A buzzer press won the round
    BuzzerHit,

    // Round boundary events
    /// Nobody has reached the threshold, play on
    NextRound,
    /// A team reached the threshold
    ThresholdReached,
}

impl Event {
    /// Check if this event closes a round
    pub fn is_round_boundary(&self) -> bool {
        matches!(self, Event::NextRound | Event::ThresholdReached)
    }
}
