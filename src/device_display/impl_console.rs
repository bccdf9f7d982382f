use crate::device_display::interface::{DeviceDisplay, LineBuffer, DISPLAY_COLUMNS};
use std::error::Error;

pub struct DeviceDisplayConsole {
    buffer: LineBuffer,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            buffer: LineBuffer::new(),
        }
    }

    fn render_display(&self) {
        let border = "─".repeat(DISPLAY_COLUMNS);
        println!("┌{}┐", border);
        for line in self.buffer.lines() {
            println!("│{:<width$}│", line, width = DISPLAY_COLUMNS);
        }
        println!("└{}┘", border);
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
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
        self.render_display();
        Ok(())
    }
}
