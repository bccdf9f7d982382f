use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// One label per line, indexed by output position.
    pub labels_path: Option<PathBuf>,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub top_k: usize,
}

impl ModelConfig {
    /// ImageNet preprocessing defaults.
    pub fn new(onnx_model_path: impl Into<PathBuf>) -> Self {
        Self {
            onnx_model_path: onnx_model_path.into(),
            labels_path: None,
            input_shape: (224, 224),
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
            top_k: 5,
        }
    }
}
