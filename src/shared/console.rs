use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

// Terminal writer shared by every phase. One lock per write keeps bar frames and
// status messages from interleaving mid-line.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<dyn Write + Send>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            out: Arc::new(Mutex::new(io::stdout())),
        }
    }

    pub fn write_str(&self, text: &str) -> io::Result<()> {
        self.write_with(|out| out.write_all(text.as_bytes()))
    }

    pub fn write_with<F>(&self, write: F) -> io::Result<()>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write(&mut *out)?;
        out.flush()
    }
}
