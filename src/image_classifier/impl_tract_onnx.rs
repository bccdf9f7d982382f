use crate::image_classifier::interface::{Classification, ImageClassifier, InferenceError};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use image::RgbImage;
use std::path::Path;
use tract_onnx::prelude::*;

use super::models::model_config::ModelConfig;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(
                0,
                f32::fact([1, 3, height as usize, width as usize]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        let labels = match &config.labels_path {
            Some(path) => load_labels(path)?,
            None => Vec::new(),
        };

        Ok(Self {
            model,
            labels,
            config,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn predict(&self, image: &RgbImage) -> Result<Vec<Classification>, InferenceError> {
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(
            image,
            width,
            height,
            &self.config.mean,
            &self.config.std,
        );

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| InferenceError::new(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::new("model produced no output"))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::new(e.to_string()))?
            .iter()
            .copied()
            .collect();

        Ok(rank_scores(&scores, &self.labels, self.config.top_k))
    }
}

fn load_labels(path: &Path) -> std::io::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

fn is_probability_vector(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Turns raw model output into the `top_k` labelled candidates, best first.
pub fn rank_scores(scores: &[f32], labels: &[String], top_k: usize) -> Vec<Classification> {
    if scores.is_empty() {
        return Vec::new();
    }

    let probabilities = if is_probability_vector(scores) {
        scores.to_vec()
    } else {
        softmax(scores)
    };

    let mut ranked: Vec<(usize, f32)> = probabilities
        .into_iter()
        .map(|p| p.clamp(0.0, 1.0))
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_k);

    ranked
        .into_iter()
        .map(|(index, confidence)| {
            let label = labels
                .get(index)
                .filter(|label| !label.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("class {}", index));
            Classification { label, confidence }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["cat".to_string(), "dog".to_string(), "bird".to_string()]
    }

    #[test]
    fn test_probabilities_are_ranked_as_is() {
        let ranked = rank_scores(&[0.04, 0.93, 0.03], &labels(), 5);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], Classification::new("dog", 0.93));
        assert_eq!(ranked[1], Classification::new("cat", 0.04));
        assert_eq!(ranked[2], Classification::new("bird", 0.03));
    }

    #[test]
    fn test_logits_go_through_softmax() {
        let ranked = rank_scores(&[2.0, -1.0, 5.0], &labels(), 5);

        let total: f32 = ranked.iter().map(|c| c.confidence).sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert_eq!(ranked[0].label, "bird");
        assert!(ranked.iter().all(|c| (0.0..=1.0).contains(&c.confidence)));
    }

    #[test]
    fn test_top_k_truncates() {
        let ranked = rank_scores(&[0.1, 0.2, 0.7], &labels(), 1);

        assert_eq!(ranked, vec![Classification::new("bird", 0.7)]);
    }

    #[test]
    fn test_missing_label_falls_back_to_index() {
        let ranked = rank_scores(&[0.1, 0.2, 0.3, 0.4], &labels(), 1);

        assert_eq!(ranked[0].label, "class 3");
    }

    #[test]
    fn test_empty_output_ranks_nothing() {
        assert!(rank_scores(&[], &labels(), 5).is_empty());
    }

    #[test]
    fn test_missing_model_file_fails_to_load() {
        let config = ModelConfig::new("./does/not/exist.onnx");

        assert!(ImageClassifierTractOnnx::new(config).is_err());
    }
}
