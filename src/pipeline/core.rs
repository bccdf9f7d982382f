use crate::device_input::interface::UserAction;
use crate::history::interface::HistoryError;
use crate::image_classifier::interface::{Classification, InferenceError};
use crate::image_source::interface::{DecodeError, ImageSelection};
use crate::record::ClassificationRecord;
use chrono::{DateTime, Utc};
use image::RgbImage;
use std::sync::Arc;

pub const REASON_INVALID_IMAGE: &str = "invalid image";
pub const REASON_NO_RESULT: &str = "no result";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Analyzing,
    Completed {
        label: String,
        confidence: f32,
    },
    Failed {
        reason: String,
    },
}

impl PipelineState {
    pub fn failed(reason: impl Into<String>) -> Self {
        PipelineState::Failed {
            reason: reason.into(),
        }
    }

    pub fn status_text(&self) -> String {
        match self {
            PipelineState::Idle => "Ready to identify".to_string(),
            PipelineState::Analyzing => "Analyzing...".to_string(),
            PipelineState::Completed { label, confidence } => {
                format!("{} ({:.1}%)", label, confidence * 100.0)
            }
            PipelineState::Failed { reason } => format!("Failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Analyzer,
    History {
        records: Vec<ClassificationRecord>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub state: PipelineState,
    pub screen: Screen,
    /// Request currently loading or being classified.
    pub in_flight: Option<u64>,
    pub next_request_id: u64,
    pub selection: Option<ImageSelection>,
    /// Problems that do not change the classification result, e.g. history writes.
    pub notice: Option<String>,
    pub running: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            state: PipelineState::Idle,
            screen: Screen::Analyzer,
            in_flight: None,
            next_request_id: 1,
            selection: None,
            notice: None,
            running: true,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    Input(UserAction),
    ImageLoadDone {
        request_id: u64,
        result: Result<RgbImage, DecodeError>,
    },
    ClassifyDone {
        request_id: u64,
        result: Result<Vec<Classification>, InferenceError>,
        thumbnail: Option<Vec<u8>>,
        finished_at: DateTime<Utc>,
    },
    RecordAppendDone(Result<(), HistoryError>),
    HistoryLoadDone(Result<Vec<ClassificationRecord>, HistoryError>),
}

impl Event {
    pub fn to_display_string(&self) -> String {
        match self {
            Event::ImageLoadDone {
                request_id,
                result: Ok(image),
            } => format!(
                "ImageLoadDone {{ request_id: {}, image: {}x{} }}",
                request_id,
                image.width(),
                image.height()
            ),
            Event::ClassifyDone {
                request_id,
                result,
                thumbnail,
                finished_at,
            } => format!(
                "ClassifyDone {{ request_id: {}, result: {:?}, thumbnail_bytes: {:?}, finished_at: {} }}",
                request_id,
                result,
                thumbnail.as_ref().map(Vec::len),
                finished_at
            ),
            Event::HistoryLoadDone(Ok(records)) => {
                format!("HistoryLoadDone(Ok({} records))", records.len())
            }
            event => format!("{:?}", event),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeToInput,
    LoadImage {
        request_id: u64,
        selection: ImageSelection,
    },
    Classify {
        request_id: u64,
        image: Arc<RgbImage>,
    },
    AppendRecord {
        record: ClassificationRecord,
    },
    LoadHistory,
}

impl Effect {
    /// Blocking work goes to a worker thread. History access stays on the loop.
    pub fn runs_in_background(&self) -> bool {
        match self {
            Effect::SubscribeToInput | Effect::LoadImage { .. } | Effect::Classify { .. } => true,
            Effect::AppendRecord { .. } | Effect::LoadHistory => false,
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Classify { request_id, image } => format!(
                "Classify {{ request_id: {}, image: {}x{} }}",
                request_id,
                image.width(),
                image.height()
            ),
            effect => format!("{:?}", effect),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::SubscribeToInput])
}

pub fn transition(model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::Input(action) => on_input(model, action),

        Event::ImageLoadDone { request_id, result } => {
            if model.in_flight != Some(request_id) {
                return (model, vec![]);
            }

            match result {
                Ok(image) => (
                    Model {
                        state: PipelineState::Analyzing,
                        ..model
                    },
                    vec![Effect::Classify {
                        request_id,
                        image: Arc::new(image),
                    }],
                ),
                Err(_) => (
                    Model {
                        state: PipelineState::failed(REASON_INVALID_IMAGE),
                        in_flight: None,
                        ..model
                    },
                    vec![],
                ),
            }
        }

        Event::ClassifyDone {
            request_id,
            result,
            thumbnail,
            finished_at,
        } => {
            if model.in_flight != Some(request_id) || model.state != PipelineState::Analyzing {
                return (model, vec![]);
            }

            let model = Model {
                in_flight: None,
                ..model
            };

            let top = match result {
                Ok(ranked) => ranked.into_iter().next(),
                Err(e) => {
                    return (
                        Model {
                            state: PipelineState::failed(e.message),
                            ..model
                        },
                        vec![],
                    )
                }
            };

            let Some(top) = top else {
                return (
                    Model {
                        state: PipelineState::failed(REASON_NO_RESULT),
                        ..model
                    },
                    vec![],
                );
            };

            match ClassificationRecord::new(finished_at, top.label, top.confidence, thumbnail) {
                Ok(record) => (
                    Model {
                        state: PipelineState::Completed {
                            label: record.label().to_string(),
                            confidence: record.confidence(),
                        },
                        ..model
                    },
                    vec![Effect::AppendRecord { record }],
                ),
                Err(e) => (
                    Model {
                        state: PipelineState::failed(e.to_string()),
                        ..model
                    },
                    vec![],
                ),
            }
        }

        Event::RecordAppendDone(Ok(())) => (model, vec![]),
        Event::RecordAppendDone(Err(e)) => (
            Model {
                notice: Some(format!("History not saved: {}", e)),
                ..model
            },
            vec![],
        ),

        Event::HistoryLoadDone(Ok(records)) => (
            Model {
                screen: Screen::History { records },
                ..model
            },
            vec![],
        ),
        Event::HistoryLoadDone(Err(e)) => (
            Model {
                notice: Some(format!("History unavailable: {}", e)),
                ..model
            },
            vec![],
        ),
    }
}

fn on_input(model: Model, action: UserAction) -> (Model, Vec<Effect>) {
    match action {
        UserAction::SelectImage(selection) => {
            if model.in_flight.is_some() {
                return (
                    Model {
                        notice: Some("Still analyzing the previous image".to_string()),
                        ..model
                    },
                    vec![],
                );
            }

            let request_id = model.next_request_id;
            (
                Model {
                    screen: Screen::Analyzer,
                    in_flight: Some(request_id),
                    next_request_id: request_id + 1,
                    selection: Some(selection.clone()),
                    notice: None,
                    ..model
                },
                vec![Effect::LoadImage {
                    request_id,
                    selection,
                }],
            )
        }
        UserAction::SelectCancelled => (model, vec![]),
        UserAction::Clear => (
            Model {
                state: PipelineState::Idle,
                screen: Screen::Analyzer,
                in_flight: None,
                selection: None,
                notice: None,
                ..model
            },
            vec![],
        ),
        UserAction::ShowHistory => (model, vec![Effect::LoadHistory]),
        UserAction::ShowAnalyzer => (
            Model {
                screen: Screen::Analyzer,
                ..model
            },
            vec![],
        ),
        UserAction::Quit => (
            Model {
                running: false,
                ..model
            },
            vec![],
        ),
    }
}
