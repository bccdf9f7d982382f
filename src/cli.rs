use crate::config::{Config, DisplayKind};
use crate::image_classifier::models::model_config::ModelConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixel-vision")]
#[command(about = "Classify photos with an on-device model and keep a history", long_about = None)]
pub struct Cli {
    /// ONNX image classification model. Without it a fake classifier is used
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Class labels, one per line, in model output order
    #[arg(short, long, requires = "model")]
    pub labels: Option<PathBuf>,

    /// Square input side the model expects
    #[arg(long, default_value_t = 224)]
    pub input_size: u32,

    /// SQLite file holding the classification history
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, conflicts_with = "history")]
    pub in_memory_history: bool,

    #[arg(short, long, value_enum)]
    pub display: Option<DisplayKind>,
}

impl Cli {
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(path) = self.model {
            let mut model = ModelConfig::new(path);
            model.labels_path = self.labels;
            model.input_shape = (self.input_size, self.input_size);
            config.model = Some(model);
        }

        if self.in_memory_history {
            config.history_path = None;
        } else if let Some(path) = self.history {
            config.history_path = Some(path);
        }

        if let Some(display) = self.display {
            config.display = display;
        }

        config
    }
}
