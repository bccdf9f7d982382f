use crate::image_classifier::interface::{Classification, ImageClassifier, InferenceError};
use crate::library::logger::interface::Logger;
use image::RgbImage;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const OBJECTS: [&str; 18] = [
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

/// Answers from a script when one is queued, otherwise makes up a ranking.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Mutex<VecDeque<Result<Vec<Classification>, InferenceError>>>,
    calls: AtomicUsize,
    latency: Duration,
    /// Makes `predict` panic with this message.
    fault: Option<String>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            latency: Duration::ZERO,
            fault: None,
        }
    }

    #[cfg(test)]
    pub fn with_script(
        self,
        outcomes: Vec<Result<Vec<Classification>, InferenceError>>,
    ) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            ..self
        }
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    #[cfg(test)]
    pub fn with_fault(self, message: impl Into<String>) -> Self {
        Self {
            fault: Some(message.into()),
            ..self
        }
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn random_ranking(&self) -> Result<Vec<Classification>, InferenceError> {
        let mut rng = rand::rng();

        let confidence_dist =
            Uniform::new(0.0f32, 1.0).map_err(|e| InferenceError::new(e.to_string()))?;

        let picked = rand::seq::index::sample(&mut rng, OBJECTS.len(), 3);
        let weights: Vec<f32> = (0..picked.len())
            .map(|_| confidence_dist.sample(&mut rng) + f32::EPSILON)
            .collect();
        let total: f32 = weights.iter().sum();

        let mut classifications: Vec<Classification> = picked
            .iter()
            .zip(weights)
            .map(|(index, weight)| Classification::new(OBJECTS[index], weight / total))
            .collect();
        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(classifications)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn predict(&self, image: &RgbImage) -> Result<Vec<Classification>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ));

        if let Some(fault) = &self.fault {
            panic!("{}", fault);
        }

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let scripted = self
            .script
            .lock()
            .map_err(|_| InferenceError::new("fake classifier script poisoned"))?
            .pop_front();

        let outcome = match scripted {
            Some(outcome) => outcome,
            None => self.random_ranking(),
        };

        let _ = self.logger.info(&format!("Classifications: {:?}", outcome));

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use image::Rgb;

    fn image() -> RgbImage {
        RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]))
    }

    #[test]
    fn test_script_is_replayed_in_order() {
        let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new())).with_script(vec![
            Ok(vec![Classification::new("cat", 0.93)]),
            Err(InferenceError::new("model unavailable")),
        ]);

        assert_eq!(
            classifier.predict(&image()),
            Ok(vec![Classification::new("cat", 0.93)])
        );
        assert_eq!(
            classifier.predict(&image()),
            Err(InferenceError::new("model unavailable"))
        );
        assert_eq!(classifier.calls(), 2);
    }

    #[test]
    fn test_random_ranking_is_sorted_and_in_range() {
        let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new()));

        let ranked = classifier.predict(&image()).unwrap();

        assert_eq!(ranked.len(), 3);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence));
        assert!(ranked
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.confidence)));
    }
}
