// Public request/response entities
pub mod prediction;

pub use prediction::{ModelInfoResponse, PredictionRequest, PredictionResponse};
