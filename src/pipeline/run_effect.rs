use crate::config::Config;
use crate::device_input::interface::DeviceInput;
use crate::history::interface::HistoryStore;
use crate::image_classifier::interface::{ImageClassifier, InferenceError};
use crate::image_source::interface::{DecodeError, ImageSource};
use crate::image_source::to_model_input;
use crate::library::logger::interface::Logger;
use crate::library::panic::panic_message;
use crate::pipeline::core::{Effect, Event};
use crate::thumbnail::encode_thumbnail;
use chrono::Utc;
use image::RgbImage;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_input: Arc<dyn DeviceInput + Send + Sync>,
    image_source: Arc<dyn ImageSource + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    history: Arc<dyn HistoryStore + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
        image_source: Arc<dyn ImageSource + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        history: Arc<dyn HistoryStore + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("run_effect"),
            device_input,
            image_source,
            image_classifier,
            history,
            event_sender,
        }
    }

    pub fn run_effect(&self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::SubscribeToInput => {
                let actions = self.device_input.events();
                for action in actions.iter() {
                    if self.event_sender.send(Event::Input(action)).is_err() {
                        break;
                    }
                }
            }
            Effect::LoadImage {
                request_id,
                selection,
            } => {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    self.image_source
                        .load(&selection)
                        .and_then(|image| to_model_input(&image))
                }))
                .unwrap_or_else(|payload| {
                    Err(DecodeError::Format(format!(
                        "decoder panicked: {}",
                        panic_message(payload.as_ref())
                    )))
                });

                if let Err(e) = &result {
                    let _ = self
                        .logger
                        .error(&format!("Could not load {}: {}", selection, e));
                }

                let _ = self
                    .event_sender
                    .send(Event::ImageLoadDone { request_id, result });
            }
            Effect::Classify { request_id, image } => {
                let result =
                    panic::catch_unwind(AssertUnwindSafe(|| self.image_classifier.predict(&image)))
                        .unwrap_or_else(|payload| {
                            Err(InferenceError::new(format!(
                                "inference panicked: {}",
                                panic_message(payload.as_ref())
                            )))
                        });

                let thumbnail = match &result {
                    Ok(ranked) if !ranked.is_empty() => self.thumbnail(&image),
                    _ => None,
                };

                if let Err(e) = &result {
                    let _ = self.logger.error(&format!("Inference failed: {}", e));
                }

                let _ = self.event_sender.send(Event::ClassifyDone {
                    request_id,
                    result,
                    thumbnail,
                    finished_at: Utc::now(),
                });
            }
            Effect::AppendRecord { record } => {
                let appended = self.history.append(&record);

                if let Err(e) = &appended {
                    let _ = self
                        .logger
                        .error(&format!("Failed to append {:?}: {}", record, e));
                }

                let _ = self.event_sender.send(Event::RecordAppendDone(appended));
            }
            Effect::LoadHistory => {
                let records = self.history.list();

                if let Err(e) = &records {
                    let _ = self.logger.error(&format!("Failed to list history: {}", e));
                }

                let _ = self.event_sender.send(Event::HistoryLoadDone(records));
            }
        }
    }

    /// Best effort. A failed encode only costs the record its thumbnail.
    fn thumbnail(&self, image: &RgbImage) -> Option<Vec<u8>> {
        match encode_thumbnail(
            image,
            self.config.thumbnail_max_side,
            self.config.thumbnail_quality,
        ) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                let _ = self
                    .logger
                    .error(&format!("Thumbnail encoding failed: {}", e));
                None
            }
        }
    }
}
