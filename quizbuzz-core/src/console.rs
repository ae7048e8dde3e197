//! Judge console protocol
//!
//! Transmits queued prompts and interprets completed lines. A line that
//! repeats the previous one within the same phase is dropped, so a
//! terminal that re-sends a line does not trigger a second rejection.

use alloc::string::String;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::Write;
use quizbuzz_protocol::Prompt;

use crate::coordinator::Coordinator;
use crate::session::{Reply, Session};
use crate::state::Phase;

/// Console side of the game
#[derive(Debug, Default)]
pub struct ConsoleHandler {
    last_line: Option<String>,
    last_phase: Phase,
}

impl ConsoleHandler {
    pub const fn new() -> Self {
        Self {
            last_line: None,
            last_phase: Phase::AwaitingStart,
        }
    }

    /// Decide on one completed line
    ///
    /// Runs under the session lock. The dedupe memory is forgotten whenever
    /// the phase has moved on since the previous line.
    pub fn handle_line(&mut self, session: &mut Session, line: String) -> Reply {
        let phase = session.phase();
        if phase != self.last_phase {
            self.last_line = None;
            self.last_phase = phase;
        }

        if self.last_line.as_deref() == Some(line.as_str()) {
            return Reply::Duplicate;
        }

        let reply = session.interpret_line(&line);
        self.last_line = Some(line);
        reply
    }

    /// Transmit the pending prompt, if any
    ///
    /// The slot is freed even when the write fails, so the round never
    /// stalls on a broken link. Returns whether a prompt was sent.
    pub async fn transmit_pending<M, W>(
        &mut self,
        coord: &Coordinator<M>,
        tx: &mut W,
    ) -> Result<bool, W::Error>
    where
        M: RawMutex,
        W: Write,
    {
        let Some(text) = coord.pending_prompt() else {
            return Ok(false);
        };

        let result = tx.write_all(text.as_bytes()).await;
        coord.prompt_sent();
        result?;
        tx.flush().await?;
        Ok(true)
    }

    /// Do all console work that is ready right now
    ///
    /// Pending output goes first, then at most one input line.
    pub async fn service<M, W>(&mut self, coord: &Coordinator<M>, tx: &mut W) -> Result<(), W::Error>
    where
        M: RawMutex,
        W: Write,
    {
        self.transmit_pending(coord, tx).await?;

        let Some(line) = coord.take_line() else {
            return Ok(());
        };

        match coord.with(|s| self.handle_line(s, line)) {
            Reply::Accepted => coord.notify_driver(),
            Reply::Rejected(prompt) => self.deliver(coord, tx, prompt).await?,
            Reply::Ignored | Reply::Duplicate => {}
        }
        Ok(())
    }

    /// Send a rejection, flushing whatever occupies the slot first
    async fn deliver<M, W>(
        &mut self,
        coord: &Coordinator<M>,
        tx: &mut W,
        prompt: Prompt,
    ) -> Result<(), W::Error>
    where
        M: RawMutex,
        W: Write,
    {
        while !coord.post_prompt(prompt) {
            self.transmit_pending(coord, tx).await?;
        }
        self.transmit_pending(coord, tx).await?;
        Ok(())
    }

    /// Serve the console until shutdown
    ///
    /// Whatever is still queued at shutdown (the winner announcement) is
    /// transmitted before returning.
    pub async fn run<M, W>(&mut self, coord: &Coordinator<M>, tx: &mut W) -> Result<(), W::Error>
    where
        M: RawMutex,
        W: Write,
    {
        loop {
            if !coord.console_has_work() {
                if coord.is_shutdown() {
                    return Ok(());
                }
                coord.console_ready().await;
            }

            self.service(coord, tx).await?;

            if coord.is_shutdown() && !coord.console_has_work() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::Event;
    use alloc::vec::Vec;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use quizbuzz_protocol::Team;

    /// Serial sink that records everything written
    #[derive(Default)]
    struct Sink {
        bytes: Vec<u8>,
    }

    impl Sink {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.bytes).unwrap()
        }
    }

    impl embedded_io_async::ErrorType for Sink {
        type Error = Infallible;
    }

    impl Write for Sink {
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn coordinator_in_team_choice() -> Coordinator<NoopRawMutex> {
        let coord = Coordinator::new(GameConfig::default());
        coord.with(|s| {
            s.interpret_line("start");
            s.apply(Event::StartAccepted);
            s.apply(Event::ShowdownFinished);
            s.try_buzz(false, true);
            s.apply(Event::BuzzerHit);
        });
        coord
    }

    #[test]
    fn test_duplicate_line_dropped() {
        let mut console = ConsoleHandler::new();
        let coord = coordinator_in_team_choice();

        let first = coord.with(|s| console.handle_line(s, String::from("x")));
        assert_eq!(first, Reply::Rejected(Prompt::InvalidTeam));

        let again = coord.with(|s| console.handle_line(s, String::from("x")));
        assert_eq!(again, Reply::Duplicate);

        let other = coord.with(|s| console.handle_line(s, String::from("y")));
        assert_eq!(other, Reply::Rejected(Prompt::InvalidTeam));
    }

    #[test]
    fn test_dedupe_forgotten_on_phase_change() {
        let mut console = ConsoleHandler::new();
        let coord = Coordinator::<NoopRawMutex>::new(GameConfig::default());

        assert_eq!(
            coord.with(|s| console.handle_line(s, String::from("start"))),
            Reply::Accepted
        );

        // Play a full round so the phase comes back around
        coord.with(|s| {
            s.apply(Event::StartAccepted);
            s.apply(Event::ShowdownFinished);
            s.try_buzz(true, false);
            s.apply(Event::BuzzerHit);
        });
        assert_eq!(
            coord.with(|s| console.handle_line(s, String::from("a"))),
            Reply::Accepted
        );
        coord.with(|s| s.apply(Event::TeamChosen));
        assert_eq!(
            coord.with(|s| console.handle_line(s, String::from("10"))),
            Reply::Accepted
        );
        coord.with(|s| {
            s.apply(Event::PointsAwarded);
            s.finish_round();
        });

        assert_eq!(
            coord.with(|s| console.handle_line(s, String::from("start"))),
            Reply::Accepted
        );
    }

    #[test]
    fn test_service_sends_prompt_then_rejection() {
        let mut console = ConsoleHandler::new();
        let coord = coordinator_in_team_choice();
        let mut sink = Sink::default();

        assert!(coord.post_prompt(Prompt::WhichTeam { buzzed: Team::B }));
        coord.receive(b"c\n");

        block_on(console.service(&coord, &mut sink)).unwrap();

        assert_eq!(
            sink.text(),
            "Team B buzzed! Which team won? (A/B)\n\
             Invalid team name!\n\
             Which team won? (A/B)\n"
        );
        assert!(!coord.console_has_work());
    }

    #[test]
    fn test_service_accepts_team() {
        let mut console = ConsoleHandler::new();
        let coord = coordinator_in_team_choice();
        let mut sink = Sink::default();

        coord.receive(b"A\r\n");
        block_on(console.service(&coord, &mut sink)).unwrap();

        assert!(sink.bytes.is_empty());
        assert_eq!(coord.with(|s| s.flags().winning_team), Some(Team::A));
    }

    #[test]
    fn test_run_flushes_final_prompt() {
        let mut console = ConsoleHandler::new();
        let coord = Coordinator::<NoopRawMutex>::new(GameConfig::default());
        let mut sink = Sink::default();

        assert!(coord.post_prompt(Prompt::Winner { team: Team::A }));
        coord.shut_down();

        block_on(console.run(&coord, &mut sink)).unwrap();
        assert_eq!(sink.text(), "Winner: Team A\n");
    }
}
