use crate::commands::countdown::{Countdown, CountdownState, TICK};
use crate::commands::run::AlarmContext;
use crate::shared::progress::ProgressBar;
use crate::shared::signal::CancellationSignal;
use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, after, select, tick};
use std::time::{Duration, Instant};

const CANCELLED_MESSAGE: &str = " Alarm cancelled.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Elapsed,
    Cancelled,
}

// Race the alarm timer against an interrupt while the countdown bar runs in the background.
// Both outcomes wait for the countdown thread to finish before returning.
pub fn wait_for_alarm(ctx: &AlarmContext, wait: Duration) -> Result<WaitOutcome> {
    wait_with_timer(
        ctx,
        wait,
        CancellationSignal::new(),
        after(wait),
        tick(TICK),
    )
}

fn wait_with_timer(
    ctx: &AlarmContext,
    wait: Duration,
    signal: CancellationSignal,
    alarm: Receiver<Instant>,
    ticks: Receiver<Instant>,
) -> Result<WaitOutcome> {
    let bar = ProgressBar::new(wait.as_secs_f64())
        .context("alarm wait must be longer than zero")?
        .with_width(ctx.bar_width)
        .with_style(ctx.bar_style.clone());

    let listener = signal.arm(
        ctx.interrupts.as_ref(),
        CANCELLED_MESSAGE,
        ctx.console.clone(),
    );
    let countdown = Countdown::spawn(bar, signal.clone(), ctx.console.clone(), ticks);
    let cancelled = signal.listen();

    let outcome = select! {
        recv(alarm) -> _ => {
            // Losing the fire means an interrupt got there first; honour it.
            if signal.fire() {
                WaitOutcome::Elapsed
            } else {
                WaitOutcome::Cancelled
            }
        }
        recv(cancelled) -> _ => WaitOutcome::Cancelled,
    };

    let state = countdown.wait()?;
    drop(listener);
    tracing::debug!(?outcome, ?state, "wait phase finished");

    // The timer can beat the last tick; end the partial bar line before ringing.
    if outcome == WaitOutcome::Elapsed && state == CountdownState::Cancelled {
        ctx.console
            .write_str("\n")
            .context("finishing countdown line failed")?;
    }
    Ok(outcome)
}
