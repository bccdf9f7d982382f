use crate::image_classifier::models::model_config::ModelConfig;
use chrono::Offset;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayKind {
    #[default]
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub timezone: chrono::FixedOffset,
    pub display: DisplayKind,
    /// `None` keeps history in memory for the lifetime of the process.
    pub history_path: Option<PathBuf>,
    pub history_timestamp_format: String,
    pub thumbnail_max_side: u32,
    pub thumbnail_quality: u8,
    /// `None` falls back to the fake classifier.
    pub model: Option<ModelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: local_timezone(),
            display: DisplayKind::Console,
            history_path: Some(PathBuf::from("pixel_vision_history.sqlite3")),
            history_timestamp_format: "%m/%d/%y, %I:%M %p".to_string(),
            thumbnail_max_side: 160,
            thumbnail_quality: 85,
            model: None,
        }
    }
}

fn local_timezone() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}
