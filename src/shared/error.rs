use std::io;
use std::path::PathBuf;

// Failures that end a run with status 1. Argument errors are reported by clap before any of these.
#[derive(Debug, thiserror::Error)]
pub enum AlarmError {
    #[error("file does not exist: {0}")]
    FileNotFound(String),
    #[error("unable to resolve home directory for '{0}'")]
    NoHomeDir(String),
    #[error("only [mp3, flac, wav] supported: unable to use file '{0}'")]
    UnsupportedFormat(String),
    #[error("failed to open sound file {}: {source}", path.display())]
    OpenSound { path: PathBuf, source: io::Error },
    #[error("failed to decode sound file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    #[error("failed to parse time '{0}': expected a clock time such as 7:00am")]
    TimeParse(String),
    #[error("local time {0} does not exist in the current time zone")]
    NonexistentLocalTime(String),
    #[error("failed to open audio output: {0}")]
    AudioOutput(String),
    #[error("installing interrupt handler failed: {0}")]
    InterruptHandler(#[from] ctrlc::Error),
}
