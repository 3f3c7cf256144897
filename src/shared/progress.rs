use std::io::{self, Write};

// Return to column zero and clear the line so every frame overwrites the previous one.
const CLEAR_LINE: &str = "\r\x1b[K";
const DEFAULT_WIDTH: usize = 70;

/// Glyphs used to draw the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarStyle {
    pub left: String,
    pub right: String,
    pub fill: String,
    pub head: String,
    pub empty: String,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            left: "[".into(),
            right: "]".into(),
            fill: "=".into(),
            head: ">".into(),
            empty: "-".into(),
        }
    }
}

/// Countdown bar measured in seconds of the wait.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: f64,
    current: f64,
    width: usize,
    style: BarStyle,
}

impl ProgressBar {
    // `total` is the wait in seconds; anything that is not a positive finite number is rejected.
    pub fn new(total: f64) -> Option<Self> {
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        Some(Self {
            total,
            current: 0.0,
            width: DEFAULT_WIDTH,
            style: BarStyle::default(),
        })
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    // Count one elapsed second. The return value is informational; the wait itself is
    // ended by the alarm timer, not by this counter.
    pub fn advance(&mut self) -> bool {
        self.current += 1.0;
        self.current >= self.total
    }

    // Number of filled cells for the current position.
    pub fn place(&self) -> usize {
        let place = (self.width as f64 * self.current / self.total).floor() as usize;
        place.min(self.width)
    }

    pub fn line(&self) -> String {
        let place = self.place();
        let style = &self.style;
        let mut out = String::with_capacity(self.width + 3);
        out.push_str(&style.left);
        out.push_str(&style.fill.repeat(place));
        out.push_str(&style.head);
        out.push_str(&style.empty.repeat(self.width - place));
        out.push_str(&style.right);
        out
    }

    pub fn render<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(CLEAR_LINE.as_bytes())?;
        out.write_all(self.line().as_bytes())?;
        out.flush()
    }

    // Full bar plus newline, drawn once when the wait runs out uncancelled.
    pub fn render_complete<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let style = &self.style;
        let line = format!(
            "{}{}{}{}\n",
            style.left,
            style.fill.repeat(self.width),
            style.head,
            style.right
        );
        out.write_all(CLEAR_LINE.as_bytes())?;
        out.write_all(line.as_bytes())?;
        out.flush()
    }
}
