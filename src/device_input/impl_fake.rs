use crate::device_input::interface::{DeviceInput, UserAction};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Hands out a receiver fed by `sender()`, so tests act as the user.
pub struct DeviceInputFake {
    sender: Sender<UserAction>,
    receiver: Mutex<Option<Receiver<UserAction>>>,
}

impl DeviceInputFake {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn sender(&self) -> Sender<UserAction> {
        self.sender.clone()
    }
}

impl DeviceInput for DeviceInputFake {
    fn events(&self) -> Receiver<UserAction> {
        let taken = match self.receiver.lock() {
            Ok(mut receiver) => receiver.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        // A second subscriber gets a receiver that is already closed.
        taken.unwrap_or_else(|| channel().1)
    }
}
