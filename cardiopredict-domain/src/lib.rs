// CardioPredict domain
// Business logic for the cardiovascular risk assessment pipeline.

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;
