//! Server crate for the ShopRecs recommendation service.
//!
//! This crate contains the service that coordinates cart and catalog
//! retrieval with the scoring engine for one request.

pub mod orchestrator;

pub use orchestrator::{RecommendationService, ServiceError};
