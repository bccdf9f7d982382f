use crate::device_input::interface::{parse_command, DeviceInput, UserAction};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

/// Reads commands from stdin. End of input quits.
pub struct DeviceInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("device_input").with_namespace("console"),
        }
    }
}

impl DeviceInput for DeviceInputConsole {
    fn events(&self) -> Receiver<UserAction> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        let _ = logger.error(&format!("Failed to read stdin: {}", e));
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                match parse_command(&line) {
                    Some(action) => {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                    None => {
                        let _ = logger.info(&format!(
                            "Unknown command {:?}. Try: open <path>, clear, history, back, quit",
                            line.trim()
                        ));
                    }
                }
            }

            let _ = tx.send(UserAction::Quit);
        });

        rx
    }
}
