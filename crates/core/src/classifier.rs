//! Statistical word classifier
//!
//! A linear model over hashed character n-grams, trained with hinge loss
//! (a linear SVM). The model is loaded once per run and is immutable
//! afterwards, so one instance can be shared by every classification worker.
//!
//! The on-disk artifact is a single bincode blob with no version header and
//! no provenance check.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Binary decision: is this word target-language content?
pub trait WordClassifier: Send + Sync {
    fn predict(&self, word: &str) -> bool;
}

/// Hyperparameters for [`NgramClassifier::train`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainParams {
    pub min_n: usize,
    pub max_n: usize,
    /// Number of hash buckets (feature dimension)
    pub buckets: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    /// L2 regularization strength
    pub lambda: f32,
    /// Seed for the per-epoch sample order
    pub seed: u64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            min_n: 1,
            max_n: 4,
            buckets: 1 << 18,
            epochs: 10,
            learning_rate: 0.1,
            lambda: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NgramClassifier {
    min_n: usize,
    max_n: usize,
    weights: Vec<f32>,
    bias: f32,
}

impl NgramClassifier {
    /// Load a serialized model
    pub fn load(path: &Path) -> Result<Self> {
        let unavailable = |reason: String| Error::ClassifierUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let model: Self = bincode::deserialize(&bytes).map_err(|e| unavailable(e.to_string()))?;

        if model.min_n == 0 || model.max_n < model.min_n {
            return Err(unavailable(format!(
                "invalid n-gram range {}..={}",
                model.min_n, model.max_n
            )));
        }
        if model.weights.is_empty() {
            return Err(unavailable("model has no weights".to_string()));
        }

        info!(
            "Loaded classifier from {:?} ({} buckets, n-grams {}..={})",
            path,
            model.weights.len(),
            model.min_n,
            model.max_n
        );
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self)
            .map_err(|e| Error::Training(format!("failed to serialize model: {}", e)))?;
        fs::write(path, bytes)?;
        info!("Saved classifier to {:?}", path);
        Ok(())
    }

    /// Fit a model on labeled words (`true` = target language)
    pub fn train<S: AsRef<str>>(samples: &[(S, bool)], params: &TrainParams) -> Result<Self> {
        if params.min_n == 0 || params.max_n < params.min_n {
            return Err(Error::InvalidConfig(format!(
                "invalid n-gram range {}..={}",
                params.min_n, params.max_n
            )));
        }
        if params.buckets == 0 {
            return Err(Error::InvalidConfig("buckets must be positive".to_string()));
        }
        if samples.is_empty() {
            return Err(Error::Training("no labeled samples".to_string()));
        }
        let positives = samples.iter().filter(|(_, label)| *label).count();
        if positives == 0 || positives == samples.len() {
            return Err(Error::Training(
                "samples must contain both target and non-target words".to_string(),
            ));
        }

        let mut model = Self {
            min_n: params.min_n,
            max_n: params.max_n,
            weights: vec![0.0; params.buckets],
            bias: 0.0,
        };

        let encoded: Vec<(Vec<usize>, f32, f32)> = samples
            .iter()
            .map(|(word, label)| {
                let features = model.features(word.as_ref());
                let value = feature_value(features.len());
                (features, value, if *label { 1.0 } else { -1.0 })
            })
            .collect();

        let mut order: Vec<usize> = (0..encoded.len()).collect();
        for epoch in 0..params.epochs {
            order.sort_by_key(|&i| {
                seahash::hash_seeded(&(i as u64).to_le_bytes(), params.seed, epoch as u64, 0, 0)
            });

            let mut violations = 0usize;
            for &i in &order {
                let (features, value, y) = &encoded[i];
                let (value, y) = (*value, *y);
                let margin = y * model.raw_score(features, value);

                for &f in features {
                    model.weights[f] -= params.learning_rate * params.lambda * model.weights[f];
                }
                if margin < 1.0 {
                    violations += 1;
                    for &f in features {
                        model.weights[f] += params.learning_rate * y * value;
                    }
                    model.bias += params.learning_rate * y;
                }
            }
            debug!("epoch {}: {} margin violations", epoch, violations);
        }

        info!(
            "Trained classifier on {} samples ({} target) for {} epochs",
            samples.len(),
            positives,
            params.epochs
        );
        Ok(model)
    }

    /// Decision value; positive means target language
    pub fn score(&self, word: &str) -> f32 {
        let features = self.features(word);
        self.raw_score(&features, feature_value(features.len()))
    }

    fn raw_score(&self, features: &[usize], value: f32) -> f32 {
        features.iter().map(|&f| self.weights[f] * value).sum::<f32>() + self.bias
    }

    /// Hashed character n-grams of the word wrapped in boundary markers
    fn features(&self, word: &str) -> Vec<usize> {
        let chars: Vec<char> = format!("<{}>", word).chars().collect();
        let buckets = self.weights.len() as u64;
        let mut features = Vec::new();
        let mut gram = String::new();

        for n in self.min_n..=self.max_n {
            for window in chars.windows(n) {
                gram.clear();
                gram.extend(window);
                features.push((seahash::hash(gram.as_bytes()) % buckets) as usize);
            }
        }
        features
    }
}

/// Scale so long words do not score higher just for having more n-grams
fn feature_value(count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        1.0 / (count as f32).sqrt()
    }
}

impl WordClassifier for NgramClassifier {
    fn predict(&self, word: &str) -> bool {
        self.score(word) > 0.0
    }
}
