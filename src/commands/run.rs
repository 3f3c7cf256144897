use crate::args::Cli;
use crate::commands::ring::ring;
use crate::commands::wait::{WaitOutcome, wait_for_alarm};
use crate::shared::console::Console;
use crate::shared::progress::BarStyle;
use crate::shared::schedule::{WaitDisplay, schedule_alarm};
use crate::shared::signal::{InterruptSource, OsInterrupts};
use crate::shared::sound::{AlarmOutput, Speaker, resolve_sound_file};
use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

// Everything a phase needs, handed down explicitly. Each phase creates its own
// cancellation signal on top of the shared interrupt source.
pub struct AlarmContext {
    pub interrupts: Arc<dyn InterruptSource>,
    pub console: Console,
    pub bar_width: usize,
    pub bar_style: BarStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    // Interrupted while waiting; nothing was played.
    Cancelled,
    // Rang and was stopped by an interrupt.
    Stopped,
}

// Public alarm entrypoint. Every input is validated (sound file resolved and decoded,
// time parsed) before the countdown starts.
pub fn run_alarm(args: Cli) -> Result<AlarmOutcome> {
    let path = resolve_sound_file(&args.file)?;
    let mut speaker = Speaker::new(path)?;
    let first_sound = speaker.load()?;
    let schedule = schedule_alarm(&args.time, Local::now())?;

    let console = Console::stdout();
    console
        .write_str(&format!(
            "Setting alarm for: {}\nAlarm sounds in: {}\nUsing sound file: {}\n",
            schedule.at.format("%A %B %-d, %Y at %-I:%M%P (%Z)"),
            WaitDisplay(schedule.wait),
            args.file
        ))
        .context("writing alarm summary failed")?;
    tracing::info!(wait_secs = schedule.wait.as_secs(), "alarm armed");

    let ctx = AlarmContext {
        interrupts: Arc::new(OsInterrupts::install()?),
        console,
        bar_width: usize::from(args.bar_width),
        bar_style: BarStyle::default(),
    };
    run_phases(&ctx, schedule.wait, &mut speaker, first_sound)
}

// Wait phase, then ring phase when the wait was not cancelled.
pub fn run_phases<O: AlarmOutput>(
    ctx: &AlarmContext,
    wait: Duration,
    output: &mut O,
    first_sound: O::Sound,
) -> Result<AlarmOutcome> {
    match wait_for_alarm(ctx, wait)? {
        WaitOutcome::Cancelled => Ok(AlarmOutcome::Cancelled),
        WaitOutcome::Elapsed => {
            let cycles = ring(ctx, output, first_sound)?;
            tracing::info!(cycles, "alarm stopped");
            Ok(AlarmOutcome::Stopped)
        }
    }
}
