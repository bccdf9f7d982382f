use std::error::Error;

pub const DISPLAY_LINES: usize = 12;
pub const DISPLAY_COLUMNS: usize = 56;

/// Text panel the pipeline renders into, one frame per `flush`.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Blank every line of the pending frame.
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a line of the pending frame (0-based). Text past the last column is cut.
    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show the pending frame.
    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn num_lines(&self) -> usize {
        DISPLAY_LINES
    }

    fn chars_per_line(&self) -> usize {
        DISPLAY_COLUMNS
    }
}

/// Fixed-size line buffer shared by the display implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new(); DISPLAY_LINES],
        }
    }

    pub fn clear(&mut self) {
        self.lines.iter_mut().for_each(String::clear);
    }

    pub fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let slot = self
            .lines
            .get_mut(line)
            .ok_or_else(|| format!("Invalid line number {}", line))?;
        *slot = text.chars().take(DISPLAY_COLUMNS).collect();
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
