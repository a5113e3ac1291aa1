//! # Recommendation Service
//!
//! This module coordinates one recommendation request:
//! 1. Resolve the user's cart references and the catalog snapshot
//!    (in parallel, through the reader collaborators)
//! 2. Build the cart context
//! 3. Run the scoring engine off the async runtime
//! 4. Return the ranked candidates
//!
//! Retrieval failures and engine failures stay distinguishable so a
//! caller can map them to different responses.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use cart::{CartContext, CartReader, CatalogReader};
use recommender::{RecommendError, Recommender, ScoredCandidate};
use store::{StoreError, UserId};

/// Failure classification for a recommendation request
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Cart or catalog could not be retrieved
    #[error("Failed to retrieve cart or catalog: {0}")]
    Retrieval(#[from] StoreError),

    /// The engine rejected the request or violated an internal invariant
    #[error(transparent)]
    Engine(#[from] RecommendError),

    /// A worker task died before producing a result
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Coordinates the reader collaborators and the scoring engine.
///
/// Cheap to clone; every request works on call-local snapshots, so
/// concurrent requests share nothing mutable.
#[derive(Clone)]
pub struct RecommendationService {
    cart_reader: Arc<dyn CartReader>,
    catalog_reader: Arc<dyn CatalogReader>,
    engine: Arc<Recommender>,
}

impl RecommendationService {
    /// Create a service with the default engine configuration
    pub fn new(cart_reader: Arc<dyn CartReader>, catalog_reader: Arc<dyn CatalogReader>) -> Self {
        Self {
            cart_reader,
            catalog_reader,
            engine: Arc::new(Recommender::new()),
        }
    }

    /// Replace the engine, e.g. with custom similarity weights
    pub fn with_engine(mut self, engine: Recommender) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Main entry point: get recommendations for a user.
    ///
    /// # Arguments
    /// * `user_id` - The user to recommend for
    /// * `limit` - Maximum number of recommendations to return
    ///
    /// # Returns
    /// Scored candidates sorted by descending score, at most `limit` of
    /// them; empty when the user's cart or the catalog is empty.
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCandidate>, ServiceError> {
        let start_time = Instant::now();

        // Resolve cart and catalog in parallel. The readers may sit on
        // blocking storage, so both run off the async runtime.
        let (cart_result, catalog_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let cart_reader = self.cart_reader.clone();
                move || cart_reader.cart_references(user_id)
            }),
            tokio::task::spawn_blocking({
                let catalog_reader = self.catalog_reader.clone();
                move || catalog_reader.catalog()
            })
        );
        let references = cart_result.map_err(|e| ServiceError::Task(e.to_string()))??;
        let catalog = catalog_result.map_err(|e| ServiceError::Task(e.to_string()))??;
        info!(
            "Resolved {} cart references and {} catalog products for user {}",
            references.len(),
            catalog.len(),
            user_id
        );

        let context = CartContext::from_references(references);

        // Scoring is bounded CPU work; keep it off the runtime threads too.
        let engine = self.engine.clone();
        let recommendations =
            tokio::task::spawn_blocking(move || engine.recommend(&context, &catalog, limit))
                .await
                .map_err(|e| ServiceError::Task(e.to_string()))??;

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }
}
