//! Simple test harness for the recommendation service.
//!
//! This binary exercises the end-to-end path: load the store, wire the
//! readers, and request recommendations for a sample user.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cart::{StoreCartReader, StoreCatalogReader};
use recommender::DEFAULT_TOP_N;
use server::RecommendationService;
use store::StoreIndex;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,cart=debug,recommender=debug")
        .init();

    info!("Starting ShopRecs server test harness");

    info!("Loading store data...");
    let path = Path::new("data/store");
    let index = Arc::new(StoreIndex::load_from_files(path)?);
    let (products, carts, entries) = index.counts();
    info!(
        "Store loaded: {} products, {} carts, {} cart entries",
        products, carts, entries
    );

    let service = RecommendationService::new(
        Arc::new(StoreCartReader::new(index.clone())),
        Arc::new(StoreCatalogReader::new(index)),
    );

    let user_id = 10;
    info!(
        "Getting recommendations for user {} (limit: {})",
        user_id, DEFAULT_TOP_N
    );
    let recommendations = service.get_recommendations(user_id, DEFAULT_TOP_N).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} [{}] - ${:.2} - Score: {:.3}",
            i + 1,
            rec.product.name,
            rec.product.category,
            rec.product.price,
            rec.score
        );
    }

    Ok(())
}
