use clap::Parser;
use cli::Cli;
use config::{Config, DisplayKind};
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use device_input::impl_console::DeviceInputConsole;
use history::impl_memory::HistoryStoreMemory;
use history::impl_sqlite::HistoryStoreSqlite;
use history::interface::HistoryStore;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use image_source::impl_file::ImageSourceFile;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use pipeline::main::Pipeline;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod cli;
mod config;
mod device_display;
mod device_input;
mod history;
mod image_classifier;
mod image_source;
mod library;
mod pipeline;
mod record;
mod thumbnail;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Cli::parse().apply(Config::default());

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.timezone));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match &config.model {
        Some(model) => {
            logger.info(&format!("Loading model {}", model.onnx_model_path.display()))?;
            Arc::new(ImageClassifierTractOnnx::new(model.clone())?)
        }
        None => {
            logger.info("No model given, using the fake classifier")?;
            Arc::new(ImageClassifierFake::new(logger.clone()).with_latency(Duration::from_millis(800)))
        }
    };

    let history: Arc<dyn HistoryStore + Send + Sync> = match &config.history_path {
        Some(path) => Arc::new(HistoryStoreSqlite::open(path)?),
        None => Arc::new(HistoryStoreMemory::new()),
    };

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display {
        DisplayKind::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayKind::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new(logger.clone()))),
    };
    device_display
        .lock()
        .map_err(|_| "display lock poisoned")?
        .init()?;

    let device_input = Arc::new(DeviceInputConsole::new(logger.clone()));

    let image_source = Arc::new(ImageSourceFile::new(logger.clone()));

    let status_logger = logger.with_namespace("status");

    let mut pipeline = Pipeline::new(
        config,
        logger,
        device_input,
        device_display,
        image_source,
        image_classifier,
        history,
    );

    pipeline.subscribe(move |state| {
        let _ = status_logger.info(&state.status_text());
    });

    pipeline.run()?;

    Ok(())
}
