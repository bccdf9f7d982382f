use crate::device_display::interface::{DeviceDisplay, LineBuffer};
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every flushed frame so tests can read back what was shown.
#[derive(Clone)]
pub struct DeviceDisplayFake {
    buffer: LineBuffer,
    frames: Arc<Mutex<Vec<Vec<String>>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self {
            buffer: LineBuffer::new(),
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn frames(&self) -> Vec<Vec<String>> {
        match self.frames.lock() {
            Ok(frames) => frames.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last_frame(&self) -> Vec<String> {
        self.frames().pop().unwrap_or_default()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer.clear();
        Ok(())
    }

    fn write_line(&mut self, line: usize, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.buffer.write_line(line, text)
    }

    fn flush(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.frames
            .lock()
            .map_err(|_| "display frames poisoned")?
            .push(self.buffer.lines().to_vec());
        Ok(())
    }
}
