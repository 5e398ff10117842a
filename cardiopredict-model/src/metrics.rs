//! Classification metrics for held-out evaluation.

use ndarray::Array1;

/// Fraction of predictions matching the target labels.
pub fn accuracy(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| (**t - **p).abs() < 0.5)
        .count();
    hits as f64 / y_true.len() as f64
}

/// Confusion counts (tp, tn, fp, fn) for binary labels.
pub fn confusion_counts(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> (usize, usize, usize, usize) {
    let mut tp = 0;
    let mut tn = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        match (t >= 0.5, p >= 0.5) {
            (true, true) => tp += 1,
            (false, false) => tn += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
        }
    }
    (tp, tn, fp, fn_)
}

/// Precision for the positive class; 0 when nothing was predicted positive.
pub fn precision(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let (tp, _, fp, _) = confusion_counts(y_true, y_pred);
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// Recall for the positive class; 0 when there are no positives.
pub fn recall(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let (tp, _, _, fn_) = confusion_counts(y_true, y_pred);
    if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}
