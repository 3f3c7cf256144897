use crate::commands::run::AlarmContext;
use crate::shared::signal::CancellationSignal;
use crate::shared::sound::AlarmOutput;
use anyhow::{Context, Result};
use crossbeam_channel::{bounded, select};

const STOPPED_MESSAGE: &str = " Alarm stopped.\n";
const SOUNDING_NOTICE: &str = "Sounding Alarm!\n";

// Play the alarm on repeat until interrupted. Each cycle releases the previous playback
// and decodes the file again instead of rewinding. Returns the number of cycles started.
pub fn ring<O: AlarmOutput>(ctx: &AlarmContext, output: &mut O, first: O::Sound) -> Result<u64> {
    // A fresh signal so that nothing from the wait phase can stop the ringing.
    let signal = CancellationSignal::new();
    let _listener = signal.arm(
        ctx.interrupts.as_ref(),
        STOPPED_MESSAGE,
        ctx.console.clone(),
    );
    let stopped = signal.listen();

    let mut sound = first;
    let mut cycles = 0_u64;
    loop {
        if signal.is_fired() {
            break;
        }
        ctx.console
            .write_str(SOUNDING_NOTICE)
            .context("writing alarm notice failed")?;

        let (done_tx, done_rx) = bounded(1);
        output
            .play(sound, done_tx)
            .context("starting alarm playback failed")?;
        cycles += 1;

        let interrupted = select! {
            recv(done_rx) -> _ => false,
            recv(stopped) -> _ => true,
        };
        if interrupted {
            break;
        }

        output.stop();
        sound = output.load().context("decoding alarm sound for replay failed")?;
    }

    output.stop();
    tracing::debug!(cycles, "ring phase finished");
    Ok(cycles)
}
