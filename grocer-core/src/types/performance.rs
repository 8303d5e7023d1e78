//! Model performance information.

use serde::{Deserialize, Serialize};

/// Payload of `/model-performance`.
///
/// Every section is optional; the service fills in what it knows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPerformance {
    /// Models currently trained and held in memory
    pub active_ml_models: u64,
    /// Keys of the cached models
    pub cached_models: Vec<String>,
    /// Main algorithm name
    pub model_type: Option<String>,
    /// Feature descriptions
    pub features_used: Vec<String>,
    /// Hyperparameters, if reported
    pub model_params: Option<ModelParams>,
    /// Speed and memory figures, if reported
    pub performance_metrics: Option<PerformanceMetrics>,
}

/// Hyperparameters of the forecasting model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Trees in the forest
    pub n_estimators: Option<u64>,
    /// Maximum depth of each tree
    pub max_depth: Option<u64>,
    /// Days of history fed into each prediction
    pub feature_window: Option<u64>,
}

/// Human-readable speed and footprint figures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetrics {
    /// Typical time to train a model
    pub training_speed: Option<String>,
    /// Typical time for one prediction
    pub prediction_speed: Option<String>,
    /// Memory footprint of the cached models
    pub memory_usage: Option<String>,
    /// Models used when the main one cannot be trained
    pub fallback_models: Vec<String>,
}
