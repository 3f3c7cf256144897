use clap::Parser;

// CLI root definition: one clock time, plus where the sound comes from and how the bar looks.
#[derive(Parser, Debug)]
#[command(name = "alarm", version)]
#[command(
    about = "Simple alarm that takes as input a clock time hh:mm(am/pm) that will play an [mp3, flac, wav] sound file (e.g. 7:00am)"
)]
pub struct Cli {
    /// Clock time to ring at, e.g. 7:00am, 7:00 PM or 19:00
    pub time: String,
    /// Sound file to play; `~` expands to the home directory
    #[arg(
        short = 'f',
        long = "file",
        env = "ALARM_SOUND_FILE",
        default_value = "~/sounds/alarm.mp3"
    )]
    pub file: String,
    /// Width of the countdown bar in columns
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u16).range(1..))]
    pub bar_width: u16,
}
