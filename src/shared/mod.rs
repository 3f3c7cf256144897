// Building blocks shared by the wait and ring phases.
pub mod console;
pub mod error;
pub mod logging;
pub mod progress;
pub mod schedule;
pub mod signal;
pub mod sound;
