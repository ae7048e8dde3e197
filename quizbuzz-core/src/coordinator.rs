//! Lock and wakeups around the shared session
//!
//! The coordinator owns the only [`Session`]. Every read or write of round
//! state goes through [`Coordinator::with`], which holds a blocking mutex
//! for the duration of one closure, so no task ever sees a half-updated
//! round. Tasks that need to wait do so on [`Signal`]s, never on the lock.
//!
//! Three wakeups are used:
//! - `driver_wake` fires when a flag the round driver waits on may have
//!   changed, or when the prompt slot has been emptied
//! - `console_wake` fires when a line completes or a prompt is posted
//! - `halted` releases every task parked in [`Coordinator::halted`], once,
//!   on shutdown

use alloc::string::String;
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_sync::waitqueue::MultiWakerRegistration;
use portable_atomic::{AtomicBool, Ordering};
use quizbuzz_protocol::{Prompt, PromptText, Team};

use crate::config::GameConfig;
use crate::session::{Reply, Session, Snapshot};

/// Tasks that can wait on [`Coordinator::halted`] without extra wakeups
const HALT_LISTENERS: usize = 4;

/// Returned by waits that were cut short by shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Halted;

/// Shared session plus the signals the tasks wait on
pub struct Coordinator<M: RawMutex> {
    session: Mutex<M, RefCell<Session>>,
    driver_wake: Signal<M, ()>,
    console_wake: Signal<M, ()>,
    halted: Mutex<M, RefCell<MultiWakerRegistration<HALT_LISTENERS>>>,
    shutdown: AtomicBool,
}

impl<M: RawMutex> Coordinator<M> {
    /// Create a coordinator for a fresh game
    ///
    /// `const` so firmware can place it in a `static`.
    pub const fn new(config: GameConfig) -> Self {
        Self {
            session: Mutex::new(RefCell::new(Session::new(config))),
            driver_wake: Signal::new(),
            console_wake: Signal::new(),
            halted: Mutex::new(RefCell::new(MultiWakerRegistration::new())),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Run a closure with exclusive access to the session
    ///
    /// The closure must not call back into the coordinator.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        self.session.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.with(|s| s.snapshot())
    }

    /// Feed bytes from the serial port
    pub fn receive(&self, bytes: &[u8]) {
        if self.with(|s| s.receive(bytes)) {
            self.console_wake.signal(());
        }
    }

    /// Take the completed console line, if any
    pub fn take_line(&self) -> Option<String> {
        self.with(|s| s.take_line())
    }

    /// Register one buzzer poll; see [`Session::try_buzz`]
    pub fn try_buzz(&self, a_pressed: bool, b_pressed: bool) -> Option<Team> {
        let team = self.with(|s| s.try_buzz(a_pressed, b_pressed));
        if team.is_some() {
            self.driver_wake.signal(());
        }
        team
    }

    /// Team whose buzzer fired first this round
    pub fn buzzed_team(&self) -> Option<Team> {
        self.with(|s| s.flags().buzzed_team)
    }

    /// Interpret one judge line; see [`Session::interpret_line`]
    pub fn interpret_line(&self, line: &str) -> Reply {
        let reply = self.with(|s| s.interpret_line(line));
        if reply == Reply::Accepted {
            self.notify_driver();
        }
        reply
    }

    /// Wake the round driver to re-check its condition
    pub fn notify_driver(&self) {
        self.driver_wake.signal(());
    }

    /// Try to queue a prompt for the console
    ///
    /// Returns `false` if the slot still holds an untransmitted prompt.
    pub fn post_prompt(&self, prompt: Prompt) -> bool {
        let posted = self.with(|s| s.prompt_mut().post(prompt));
        if posted {
            self.console_wake.signal(());
        }
        posted
    }

    /// Copy of the prompt waiting for transmission
    pub fn pending_prompt(&self) -> Option<PromptText> {
        self.with(|s| s.prompt().pending().cloned())
    }

    /// Mark the pending prompt as transmitted and free the slot
    pub fn prompt_sent(&self) {
        self.with(|s| s.prompt_mut().clear());
        self.driver_wake.signal(());
    }

    /// Queue a prompt, waiting for the slot to free up if needed
    pub async fn issue(&self, prompt: Prompt) -> Result<(), Halted> {
        loop {
            if self.is_shutdown() {
                return Err(Halted);
            }
            if self.post_prompt(prompt) {
                return Ok(());
            }
            self.driver_wake.wait().await;
        }
    }

    /// Wait until a condition on the session holds
    ///
    /// The condition is re-checked under the lock after every driver wakeup,
    /// so a wakeup that arrives before the wait starts is not lost.
    pub async fn wait_until(&self, condition: impl Fn(&Session) -> bool) -> Result<(), Halted> {
        loop {
            if self.is_shutdown() {
                return Err(Halted);
            }
            if self.with(|s| condition(s)) {
                return Ok(());
            }
            self.driver_wake.wait().await;
        }
    }

    /// Wait for console work: a completed line or a posted prompt
    pub async fn console_ready(&self) {
        self.console_wake.wait().await;
    }

    /// Check for pending console work without waiting
    pub fn console_has_work(&self) -> bool {
        self.with(|s| s.console().has_line() || s.prompt().is_pending())
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Stop the game and release every waiting task
    pub fn shut_down(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.driver_wake.signal(());
        self.console_wake.signal(());
        self.halted.lock(|wakers| wakers.borrow_mut().wake());
    }

    /// Wait for shutdown
    ///
    /// Any number of tasks may wait at once; all of them resolve.
    pub async fn halted(&self) {
        poll_fn(|cx| {
            if self.is_shutdown() {
                return Poll::Ready(());
            }
            self.halted.lock(|wakers| wakers.borrow_mut().register(cx.waker()));

            // Shutdown may have landed between the check and the registration
            if self.is_shutdown() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Event, Phase};
    use core::cell::Cell;
    use embassy_futures::block_on;
    use embassy_futures::join::join4;
    use embassy_futures::select::{select, Either};
    use embassy_futures::yield_now;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn coordinator() -> Coordinator<NoopRawMutex> {
        Coordinator::new(GameConfig::default())
    }

    #[test]
    fn test_prompt_slot_handshake() {
        let coord = coordinator();
        assert!(coord.post_prompt(Prompt::WaitingForBuzzer));
        assert!(!coord.post_prompt(Prompt::InvalidTeam));
        assert!(coord.console_has_work());

        let text = coord.pending_prompt();
        assert_eq!(text.as_deref(), Some("Waiting for buzzer...\n"));

        coord.prompt_sent();
        assert_eq!(coord.pending_prompt(), None);
        assert!(coord.post_prompt(Prompt::InvalidTeam));
    }

    #[test]
    fn test_receive_wakes_on_line() {
        let coord = coordinator();
        coord.receive(b"sta");
        assert!(!coord.console_has_work());
        coord.receive(b"rt\r\n");
        assert!(coord.console_has_work());
        assert_eq!(coord.take_line().as_deref(), Some("start"));
    }

    #[test]
    fn test_wait_until_sees_accepted_input() {
        let coord = coordinator();

        block_on(async {
            let judge = async {
                yield_now().await;
                assert_eq!(coord.interpret_line("start"), Reply::Accepted);
            };
            let wait = coord.wait_until(|s| s.flags().round_started);

            match select(wait, async {
                judge.await;
                core::future::pending::<()>().await
            })
            .await
            {
                Either::First(result) => assert_eq!(result, Ok(())),
                Either::Second(()) => unreachable!(),
            }
        });

        assert_eq!(coord.with(|s| s.apply(Event::StartAccepted)), Phase::RoundStarted);
    }

    #[test]
    fn test_issue_waits_for_free_slot() {
        let coord = coordinator();
        assert!(coord.post_prompt(Prompt::WaitingForBuzzer));

        block_on(async {
            let console = async {
                yield_now().await;
                coord.prompt_sent();
                core::future::pending::<()>().await
            };
            match select(coord.issue(Prompt::Scores { score_a: 1, score_b: 2 }), console).await {
                Either::First(result) => assert_eq!(result, Ok(())),
                Either::Second(()) => unreachable!(),
            }
        });

        assert_eq!(
            coord.pending_prompt().as_deref(),
            Some("Score: Team A 1 - Team B 2\n")
        );
    }

    #[test]
    fn test_shutdown_releases_waiters() {
        let coord = coordinator();
        assert!(coord.post_prompt(Prompt::WaitingForBuzzer));

        block_on(async {
            let stopper = async {
                yield_now().await;
                coord.shut_down();
                core::future::pending::<()>().await
            };
            match select(coord.wait_until(|s| s.flags().buzzer_hit), stopper).await {
                Either::First(result) => assert_eq!(result, Err(Halted)),
                Either::Second(()) => unreachable!(),
            }
            assert_eq!(coord.issue(Prompt::InvalidTeam).await, Err(Halted));
            coord.halted().await;
        });
        assert!(coord.is_shutdown());
    }

    async fn count_release(coord: &Coordinator<NoopRawMutex>, released: &Cell<usize>) {
        coord.halted().await;
        released.set(released.get() + 1);
    }

    #[test]
    fn test_shutdown_releases_every_halted_waiter() {
        let coord = coordinator();
        let released = Cell::new(0);

        block_on(async {
            let stopper = async {
                for _ in 0..10 {
                    yield_now().await;
                }
                assert_eq!(released.get(), 0);
                coord.shut_down();
            };
            join4(
                count_release(&coord, &released),
                count_release(&coord, &released),
                count_release(&coord, &released),
                stopper,
            )
            .await;
        });

        assert_eq!(released.get(), 3);

        // Late waiters return immediately
        block_on(coord.halted());
    }

    #[test]
    fn test_driver_wakeups_do_not_release_halted() {
        let coord = coordinator();
        let released = Cell::new(0);

        block_on(async {
            let judge = async {
                for _ in 0..50 {
                    coord.notify_driver();
                    coord.receive(b"a\n");
                    yield_now().await;
                }
                assert_eq!(released.get(), 0);
                coord.shut_down();
            };
            join4(
                count_release(&coord, &released),
                count_release(&coord, &released),
                count_release(&coord, &released),
                judge,
            )
            .await;
        });

        assert_eq!(released.get(), 3);
    }
}
