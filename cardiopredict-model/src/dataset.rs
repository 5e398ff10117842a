//! Cardio training dataset: CSV loading and cleaning.
//!
//! The public cardio dataset is semicolon separated, records age in days
//! and carries blood pressure and anthropometric outliers that must be
//! dropped before fitting.

use std::path::Path;

use csv::ReaderBuilder;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;

use crate::artifacts::DEFAULT_FEATURE_NAMES;
use crate::error::ModelError;

/// Raw row of the cardio training CSV.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub id: u64,
    /// Age in days
    pub age: u32,
    /// 1 = female, 2 = male
    pub gender: u8,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    pub ap_hi: i32,
    pub ap_lo: i32,
    pub cholesterol: u8,
    pub gluc: u8,
    pub smoke: u8,
    pub alco: u8,
    pub active: u8,
    /// Target: 1 = cardiovascular disease present
    pub cardio: u8,
}

impl RawRecord {
    /// Whole years, as the model was trained on.
    pub fn age_years(&self) -> f64 {
        f64::from(self.age / 365)
    }

    pub fn bmi(&self) -> f64 {
        self.weight / (self.height / 100.0).powi(2)
    }

    /// Outlier filter applied before fitting.
    pub fn is_clean(&self) -> bool {
        self.ap_hi > 0
            && self.ap_lo > 0
            && self.ap_hi < 250
            && self.ap_lo < 200
            && self.ap_hi >= self.ap_lo
            && (120.0..=220.0).contains(&self.height)
            && (15.0..=60.0).contains(&self.bmi())
    }

    /// Feature row in the canonical order the classifier expects.
    pub fn features(&self) -> [f64; 12] {
        [
            f64::from(self.gender.saturating_sub(1)),
            self.height,
            self.weight,
            f64::from(self.ap_hi),
            f64::from(self.ap_lo),
            f64::from(self.cholesterol),
            f64::from(self.gluc),
            f64::from(self.smoke),
            f64::from(self.alco),
            f64::from(self.active),
            self.age_years(),
            self.bmi(),
        ]
    }
}

/// Cleaned dataset ready for splitting and fitting.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub x: Array2<f64>,
    /// Target vector (n_samples)
    pub y: Array1<f64>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Stratified train/test split with a seeded shuffle, so repeated
    /// training runs see the same folds.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> (Dataset, Dataset) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut train_idx = Vec::new();
        let mut test_idx = Vec::new();

        for class in [0.0, 1.0] {
            let mut indices: Vec<usize> = self
                .y
                .iter()
                .enumerate()
                .filter(|(_, &value)| value == class)
                .map(|(i, _)| i)
                .collect();
            indices.shuffle(&mut rng);

            let test_len = (indices.len() as f64 * test_ratio).round() as usize;
            test_idx.extend_from_slice(&indices[..test_len]);
            train_idx.extend_from_slice(&indices[test_len..]);
        }

        (self.subset(&train_idx), self.subset(&test_idx))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }
}

/// Load and clean the cardio CSV.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, ModelError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path.as_ref())?;

    let mut rows: Vec<[f64; 12]> = Vec::new();
    let mut targets: Vec<f64> = Vec::new();
    let mut dropped = 0usize;

    for record in reader.deserialize::<RawRecord>() {
        let record = record?;
        if record.is_clean() {
            rows.push(record.features());
            targets.push(f64::from(record.cardio));
        } else {
            dropped += 1;
        }
    }

    if rows.is_empty() {
        return Err(ModelError::EmptyDataset);
    }
    info!(kept = rows.len(), dropped, "cardio dataset loaded");

    let mut x = Array2::<f64>::zeros((rows.len(), DEFAULT_FEATURE_NAMES.len()));
    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            x[[i, j]] = *value;
        }
    }

    Ok(Dataset {
        x,
        y: Array1::from_vec(targets),
        feature_names: DEFAULT_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    })
}
