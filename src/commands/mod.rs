// Alarm phases, one module each, wired together by `run`.
pub mod countdown;
pub mod ring;
pub mod run;
pub mod wait;

pub use run::run_alarm;
