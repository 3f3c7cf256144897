use crate::shared::console::Console;
use crate::shared::progress::ProgressBar;
use crate::shared::signal::CancellationSignal;
use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Receiver, select};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub const TICK: Duration = Duration::from_secs(1);

// How the countdown thread ended. While the thread is alive the countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Expired,
    Cancelled,
}

// Background bar renderer. Its join handle is the completion barrier of the wait phase.
pub struct Countdown {
    handle: JoinHandle<Result<CountdownState>>,
}

impl Countdown {
    // `ticks` paces the bar, one advance per message; the wait phase passes `tick(TICK)`.
    pub fn spawn(
        bar: ProgressBar,
        cancel: CancellationSignal,
        console: Console,
        ticks: Receiver<Instant>,
    ) -> Self {
        let handle = thread::spawn(move || run_countdown(bar, &cancel, &console, &ticks));
        Self { handle }
    }

    // Block until the thread has exited. Consuming `self` makes this a single-use barrier.
    pub fn wait(self) -> Result<CountdownState> {
        self.handle
            .join()
            .map_err(|_| anyhow!("countdown thread panicked"))?
    }
}

// The final second is left to the alarm timer: the bar completes at `total - 1` so it is
// never drawn full after the alarm has already gone off.
fn run_countdown(
    mut bar: ProgressBar,
    cancel: &CancellationSignal,
    console: &Console,
    ticks: &Receiver<Instant>,
) -> Result<CountdownState> {
    let cancelled = cancel.listen();
    while bar.current() < bar.total() - 1.0 {
        if cancel.is_fired() {
            return Ok(CountdownState::Cancelled);
        }
        console
            .write_with(|out| bar.render(out))
            .context("rendering countdown failed")?;
        let interrupted = select! {
            recv(ticks) -> _ => false,
            recv(cancelled) -> _ => true,
        };
        if interrupted {
            return Ok(CountdownState::Cancelled);
        }
        bar.advance();
    }

    console
        .write_with(|out| bar.render_complete(out))
        .context("rendering completed countdown failed")?;
    Ok(CountdownState::Expired)
}
