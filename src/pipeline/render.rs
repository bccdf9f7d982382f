use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::pipeline::core::{Model, PipelineState, Screen};
use crate::record::ClassificationRecord;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    config: Config,
}

impl Render {
    pub fn new(
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        config: Config,
    ) -> Self {
        Self {
            device_display,
            config,
        }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|_| "display lock poisoned")?;

        device_display.clear()?;
        let last_line = device_display.num_lines() - 1;

        match &model.screen {
            Screen::Analyzer => {
                device_display.write_line(0, "PixelVision")?;

                match &model.selection {
                    Some(selection) => {
                        device_display.write_line(1, &format!("Image: {}", selection))?
                    }
                    None => device_display.write_line(1, "No image selected")?,
                }

                device_display.write_line(3, &status_line(model))?;

                device_display.write_line(last_line, "open <path> | clear | history | quit")?;
            }
            Screen::History { records } => {
                device_display.write_line(0, &format!("History ({})", records.len()))?;

                if records.is_empty() {
                    device_display.write_line(2, "No classifications yet")?;
                }

                // one line each for the title, the notice and the command hint
                let visible = last_line.saturating_sub(2);
                let width = device_display.chars_per_line();
                for (i, record) in records.iter().take(visible).enumerate() {
                    device_display.write_line(i + 1, &self.history_line(record, width))?;
                }

                device_display.write_line(last_line, "back | open <path> | quit")?;
            }
        }

        if let Some(notice) = &model.notice {
            device_display.write_line(last_line - 1, notice)?;
        }

        device_display.flush()?;

        Ok(())
    }

    fn history_line(&self, record: &ClassificationRecord, width: usize) -> String {
        let timestamp = record
            .timestamp()
            .with_timezone(&self.config.timezone)
            .format(&self.config.history_timestamp_format)
            .to_string();
        let thumbnail = if record.thumbnail().is_some() { "[img]" } else { "" };

        let right = format!("{:>3}%  {}  {:<5}", record.confidence_percent(), timestamp, thumbnail);
        let label_width = width.saturating_sub(right.chars().count() + 1).max(1);
        let label: String = record.label().chars().take(label_width).collect();

        format!("{:<label_width$} {}", label, right, label_width = label_width)
    }
}

fn status_line(model: &Model) -> String {
    if model.in_flight.is_some() && model.state != PipelineState::Analyzing {
        "Loading image...".to_string()
    } else {
        model.state.status_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_display::impl_fake::DeviceDisplayFake;
    use crate::image_source::interface::ImageSelection;
    use chrono::{TimeZone, Utc};

    fn render_with(model: &Model) -> Vec<String> {
        render_in(model, chrono::FixedOffset::east_opt(0).unwrap())
    }

    fn render_in(model: &Model, timezone: chrono::FixedOffset) -> Vec<String> {
        let display = DeviceDisplayFake::new();
        let config = Config {
            timezone,
            ..Config::default()
        };
        let render = Render::new(Arc::new(Mutex::new(display.clone())), config);

        render.render(model).unwrap();

        display.last_frame()
    }

    #[test]
    fn test_idle_shows_ready() {
        let frame = render_with(&Model::default());

        assert_eq!(frame[0], "PixelVision");
        assert_eq!(frame[1], "No image selected");
        assert_eq!(frame[3], "Ready to identify");
    }

    #[test]
    fn test_completed_shows_label_and_percent() {
        let model = Model {
            state: PipelineState::Completed {
                label: "cat".to_string(),
                confidence: 0.93,
            },
            selection: Some(ImageSelection::new("cat.jpg")),
            ..Model::default()
        };

        let frame = render_with(&model);

        assert_eq!(frame[1], "Image: cat.jpg");
        assert_eq!(frame[3], "cat (93.0%)");
    }

    #[test]
    fn test_loading_before_analyzing() {
        let model = Model {
            in_flight: Some(1),
            ..Model::default()
        };

        let frame = render_with(&model);

        assert_eq!(frame[3], "Loading image...");
    }

    #[test]
    fn test_failed_and_notice() {
        let model = Model {
            state: PipelineState::failed("no result"),
            notice: Some("History not saved: disk full".to_string()),
            ..Model::default()
        };

        let frame = render_with(&model);

        assert_eq!(frame[3], "Failed: no result");
        assert_eq!(frame[frame.len() - 2], "History not saved: disk full");
    }

    #[test]
    fn test_history_lists_records() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 17, 21, 5, 0).unwrap();
        let records = vec![
            ClassificationRecord::new(timestamp, "tabby cat", 0.938, Some(vec![1])).unwrap(),
            ClassificationRecord::new(timestamp, "dog", 0.5, None).unwrap(),
        ];
        let model = Model {
            screen: Screen::History { records },
            ..Model::default()
        };

        let frame = render_with(&model);

        assert_eq!(frame[0], "History (2)");
        assert!(frame[1].starts_with("tabby cat"));
        assert!(frame[1].contains(" 93%  10/17/26, 09:05 PM  [img]"));
        assert!(frame[2].starts_with("dog"));
        assert!(frame[2].contains(" 50%"));
    }

    #[test]
    fn test_empty_history() {
        let model = Model {
            screen: Screen::History { records: vec![] },
            ..Model::default()
        };

        let frame = render_with(&model);

        assert_eq!(frame[0], "History (0)");
        assert_eq!(frame[2], "No classifications yet");
    }

    #[test]
    fn test_history_timestamps_use_configured_timezone() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 17, 21, 5, 0).unwrap();
        let model = Model {
            screen: Screen::History {
                records: vec![ClassificationRecord::new(timestamp, "cat", 0.5, None).unwrap()],
            },
            ..Model::default()
        };

        let frame = render_in(&model, chrono::FixedOffset::east_opt(2 * 3600).unwrap());

        assert!(frame[1].contains("10/17/26, 11:05 PM"));
    }
}
