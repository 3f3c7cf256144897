use crate::shared::console::Console;
use crate::shared::error::AlarmError;
use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

// Where interrupts come from. Each delivery is consumed by at most one armed listener.
pub trait InterruptSource: Send + Sync {
    fn deliveries(&self) -> Receiver<()>;
}

// SIGINT/SIGTERM forwarded from a single process-wide Ctrl-C handler.
pub struct OsInterrupts {
    rx: Receiver<()>,
}

impl OsInterrupts {
    // ctrlc allows one handler per process, so phases subscribe to this feed instead of
    // registering their own.
    pub fn install() -> Result<Self, AlarmError> {
        let (tx, rx) = unbounded();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })?;
        Ok(Self { rx })
    }
}

impl InterruptSource for OsInterrupts {
    fn deliveries(&self) -> Receiver<()> {
        self.rx.clone()
    }
}

// Programmatic interrupt feed standing in for OS signals.
#[cfg(test)]
#[derive(Clone)]
pub struct ManualInterrupts {
    tx: Sender<()>,
    rx: Receiver<()>,
}

#[cfg(test)]
impl ManualInterrupts {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

#[cfg(test)]
impl InterruptSource for ManualInterrupts {
    fn deliveries(&self) -> Receiver<()> {
        self.rx.clone()
    }
}

/// One-shot broadcast stop event.
///
/// Nothing is ever sent on the inner channel; firing drops its only sender, which
/// disconnects every receiver at once. Later fires find the sender gone and do nothing.
#[derive(Clone)]
pub struct CancellationSignal {
    inner: Arc<SignalInner>,
}

struct SignalInner {
    trigger: Mutex<Option<Sender<()>>>,
    fired: Receiver<()>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            inner: Arc::new(SignalInner {
                trigger: Mutex::new(Some(tx)),
                fired: rx,
            }),
        }
    }

    // Returns true only for the call that performed the transition.
    pub fn fire(&self) -> bool {
        let mut trigger = self
            .inner
            .trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        trigger.take().is_some()
    }

    pub fn is_fired(&self) -> bool {
        self.inner
            .trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    // Block until fired; returns immediately once it has been.
    #[cfg(test)]
    pub fn wait(&self) {
        let _ = self.inner.fired.recv();
    }

    // Receiver that becomes ready (disconnected) when the signal fires, for use in `select!`.
    pub fn listen(&self) -> Receiver<()> {
        self.inner.fired.clone()
    }

    // Fire this signal on the next interrupt from `source`, printing `message` once.
    // Deliveries queued before arming belong to an earlier phase and are discarded.
    pub fn arm(
        &self,
        source: &dyn InterruptSource,
        message: &str,
        console: Console,
    ) -> InterruptListener {
        let deliveries = source.deliveries();
        let stale = deliveries.try_iter().count();
        if stale > 0 {
            tracing::debug!(stale, "discarded interrupts delivered before arming");
        }

        let signal = self.clone();
        let fired = self.listen();
        let message = message.to_owned();
        let handle = thread::spawn(move || {
            select! {
                recv(deliveries) -> delivery => {
                    if delivery.is_ok() && signal.fire() {
                        if let Err(err) = console.write_str(&message) {
                            tracing::warn!("writing cancellation message failed: {err}");
                        }
                    }
                }
                recv(fired) -> _ => {}
            }
        });

        InterruptListener {
            signal: self.clone(),
            handle: Some(handle),
        }
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

// Interrupt listener bound to one signal. Dropping it fires the signal (a no-op if it
// already fired) and joins the listener thread, so no handler outlives its phase.
pub struct InterruptListener {
    signal: CancellationSignal,
    handle: Option<JoinHandle<()>>,
}

impl Drop for InterruptListener {
    fn drop(&mut self) {
        self.signal.fire();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("interrupt listener panicked");
            }
        }
    }
}
