//! Metric cards for the model performance view.

use std::fmt;

use grocer_core::ModelPerformance;

/// Health of a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricStatus {
    /// Nothing to act on
    Good,
    /// Worth a look
    Warning,
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricStatus::Good => write!(f, "good"),
            MetricStatus::Warning => write!(f, "warning"),
        }
    }
}

/// One metric card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemMetric {
    /// Card title
    pub name: &'static str,
    /// Displayed value
    pub value: String,
    /// Health
    pub status: MetricStatus,
    /// What the value means
    pub description: &'static str,
}

impl SystemMetric {
    fn good(name: &'static str, value: impl ToString, description: &'static str) -> Self {
        Self {
            name,
            value: value.to_string(),
            status: MetricStatus::Good,
            description,
        }
    }
}

/// Builds the metric cards, substituting defaults for anything the service
/// left out. Zero and empty values count as missing.
pub fn system_metrics(perf: &ModelPerformance) -> Vec<SystemMetric> {
    let params = perf.model_params.clone().unwrap_or_default();
    let speeds = perf.performance_metrics.clone().unwrap_or_default();

    let text = |value: Option<String>, default: &str| {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    let count = |value: Option<u64>, default: u64| value.filter(|&v| v > 0).unwrap_or(default);

    let features = match perf.features_used.len() {
        0 => 6,
        n => n,
    };

    vec![
        SystemMetric {
            name: "Active ML models",
            value: perf.active_ml_models.to_string(),
            status: if perf.active_ml_models > 0 {
                MetricStatus::Good
            } else {
                MetricStatus::Warning
            },
            description: "Trained models cached and ready to predict",
        },
        SystemMetric::good(
            "Model type",
            text(perf.model_type.clone(), "Random Forest"),
            "Main machine learning algorithm",
        ),
        SystemMetric::good(
            "Training speed",
            text(speeds.training_speed, "~1-2 s"),
            "Average time to train a new model",
        ),
        SystemMetric::good(
            "Prediction speed",
            text(speeds.prediction_speed, "~0.1 s"),
            "Average time for one prediction",
        ),
        SystemMetric::good(
            "Memory usage",
            text(speeds.memory_usage, "Low"),
            "RAM held by the cached models",
        ),
        SystemMetric::good("Feature count", features, "Features used for each prediction"),
        SystemMetric::good(
            "Tree count",
            count(params.n_estimators, 20),
            "Decision trees in the forest",
        ),
        SystemMetric::good(
            "Max depth",
            count(params.max_depth, 5),
            "Maximum depth of each decision tree",
        ),
    ]
}
