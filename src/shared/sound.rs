use crate::shared::error::AlarmError;
use crossbeam_channel::Sender;
use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub type SoundStream = Decoder<BufReader<File>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    Mp3,
    Flac,
    Wav,
}

impl SoundFormat {
    // Dispatch on the file extension; anything outside the three supported formats is rejected.
    pub fn from_path(path: &Path) -> Result<Self, AlarmError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("mp3") => Ok(Self::Mp3),
            Some("flac") => Ok(Self::Flac),
            Some("wav") => Ok(Self::Wav),
            _ => Err(AlarmError::UnsupportedFormat(file_name(path))),
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// Expand `~`, make the path absolute, and require that the file exists.
pub fn resolve_sound_file(raw: &str) -> Result<PathBuf, AlarmError> {
    resolve_with_home(raw, dirs::home_dir())
}

fn resolve_with_home(raw: &str, home: Option<PathBuf>) -> Result<PathBuf, AlarmError> {
    let expanded = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            let home = home.ok_or_else(|| AlarmError::NoHomeDir(raw.to_owned()))?;
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(raw),
    };

    let absolute =
        std::path::absolute(&expanded).map_err(|_| AlarmError::FileNotFound(raw.to_owned()))?;
    if !absolute.is_file() {
        return Err(AlarmError::FileNotFound(raw.to_owned()));
    }
    Ok(absolute)
}

pub fn decode_sound_file(path: &Path, format: SoundFormat) -> Result<SoundStream, AlarmError> {
    let file = File::open(path).map_err(|source| AlarmError::OpenSound {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_len = file
        .metadata()
        .map_err(|source| AlarmError::OpenSound {
            path: path.to_path_buf(),
            source,
        })?
        .len();

    Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(byte_len)
        .with_hint(format.hint())
        .with_seekable(true)
        .build()
        .map_err(|source| AlarmError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

// Playback backend seen by the ringer: produce a fresh sound, play it to completion
// (signalled on `done`), and release whatever the last cycle held.
pub trait AlarmOutput {
    type Sound: Send + 'static;

    fn load(&mut self) -> Result<Self::Sound, AlarmError>;
    fn play(&mut self, sound: Self::Sound, done: Sender<()>) -> Result<(), AlarmError>;
    fn stop(&mut self);
}

/// Sound file played through the default output device.
///
/// The device is opened on first playback so that argument and decode errors are
/// reported without touching audio hardware. Each cycle gets its own sink, which is
/// stopped and dropped before the next decode.
pub struct Speaker {
    path: PathBuf,
    format: SoundFormat,
    stream: Option<OutputStream>,
    sink: Option<Sink>,
}

impl Speaker {
    pub fn new(path: PathBuf) -> Result<Self, AlarmError> {
        let format = SoundFormat::from_path(&path)?;
        Ok(Self {
            path,
            format,
            stream: None,
            sink: None,
        })
    }

    fn output_stream(&mut self) -> Result<&OutputStream, AlarmError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|err| AlarmError::AudioOutput(err.to_string()))?;
            // Otherwise rodio prints a notice on stderr every time the alarm is stopped.
            stream.log_on_drop(false);
            tracing::debug!("opened default audio output");
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| AlarmError::AudioOutput("output stream unavailable".into()))
    }
}

impl AlarmOutput for Speaker {
    type Sound = SoundStream;

    fn load(&mut self) -> Result<SoundStream, AlarmError> {
        decode_sound_file(&self.path, self.format)
    }

    fn play(&mut self, sound: SoundStream, done: Sender<()>) -> Result<(), AlarmError> {
        self.stop();
        let sink = Sink::connect_new(self.output_stream()?.mixer());
        sink.append(sound);
        sink.append(EmptyCallback::new(Box::new(move || {
            let _ = done.try_send(());
        })));
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
