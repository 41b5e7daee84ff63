//! Recognition model metadata catalog.
//!
//! A read-only table of known models, passed to whatever needs it rather
//! than living in process-wide mutable state. Acquiring the files themselves
//! is out of scope; users drop pre-downloaded models into the model
//! directory and refer to them by name.

use std::path::{Path, PathBuf};

/// Metadata for a recognition model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "tiny.en", "base", "large")
    pub name: &'static str,
    /// Model size in megabytes
    pub size_mb: u32,
    /// Download URL
    pub url: &'static str,
    /// Whether this model supports English only
    pub english_only: bool,
    /// Short human-readable description
    pub description: &'static str,
}

/// Catalog of known models, smallest first.
///
/// The `.en` suffix indicates English-only variants, which are smaller and
/// faster than their multilingual counterparts.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "tiny.en",
        size_mb: 75,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin",
        english_only: true,
        description: "Fastest, lowest accuracy; fine for previews",
    },
    ModelInfo {
        name: "tiny",
        size_mb: 75,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
        english_only: false,
        description: "Fastest multilingual model",
    },
    ModelInfo {
        name: "base.en",
        size_mb: 142,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin",
        english_only: true,
        description: "Good default for English subtitles",
    },
    ModelInfo {
        name: "base",
        size_mb: 142,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
        english_only: false,
        description: "Good default for non-English content",
    },
    ModelInfo {
        name: "small.en",
        size_mb: 466,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.en.bin",
        english_only: true,
        description: "Noticeably better accuracy, slower",
    },
    ModelInfo {
        name: "small",
        size_mb: 466,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
        english_only: false,
        description: "Noticeably better accuracy, slower",
    },
    ModelInfo {
        name: "medium.en",
        size_mb: 1533,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.en.bin",
        english_only: true,
        description: "High accuracy; podcast and broadcast quality",
    },
    ModelInfo {
        name: "large",
        size_mb: 3094,
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large.bin",
        english_only: false,
        description: "Highest accuracy, slowest",
    },
];

/// Find a model by name.
pub fn get_model(name: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.name == name)
}

/// All known models in catalog order.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

/// Expected on-disk location for a model inside `model_dir`.
pub fn model_path(model_dir: &Path, name: &str) -> PathBuf {
    model_dir.join(format!("ggml-{}.bin", name))
}
