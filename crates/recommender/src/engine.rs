//! The ranking engine.
//!
//! Given a resolved cart and a catalog snapshot, produces the top-N
//! candidate products ranked by averaged similarity to the cart. The
//! computation is synchronous, performs no I/O, and keeps no state across
//! calls; given valid in-memory inputs it cannot fail except on a caller
//! error (`top_n == 0`, invalid weights).

use crate::filter_pipeline::FilterPipeline;
use crate::filters::InCartFilter;
use crate::scoring::{similarity, PriceRange, SimilarityWeights};
use cart::CartContext;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use store::Product;
use thiserror::Error;
use tracing::{debug, instrument};

/// How many recommendations a caller gets when it does not ask for a count
pub const DEFAULT_TOP_N: usize = 4;

/// Errors the engine itself can raise.
///
/// Retrieval problems never appear here; they belong to the collaborators
/// that fetch cart and catalog before the engine runs.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// A caller-supplied argument was unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal invariant was violated during scoring
    #[error("Computation failed: {0}")]
    Computation(String),
}

/// A catalog product annotated with its derived score.
///
/// Serializes flat (`{id, name, price, image, description, category,
/// score}`) so the presentation layer can hand it straight to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub product: Product,
    pub score: f64,
}

/// Content-based recommender over cart and catalog snapshots.
pub struct Recommender {
    weights: SimilarityWeights,
    filters: FilterPipeline,
}

impl Recommender {
    /// Create a recommender with default weights and the cart-exclusion
    /// filter installed.
    pub fn new() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            filters: FilterPipeline::new().add_filter(InCartFilter),
        }
    }

    /// Override the similarity weights (builder pattern)
    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Score the catalog against the cart and return the top `top_n`
    /// candidates.
    ///
    /// ## Algorithm
    /// 1. Validate `top_n` and the configured weights
    /// 2. Empty cart or empty catalog: empty result, not an error
    /// 3. Compute the catalog-wide price range (before exclusion, so cart
    ///    products still anchor the scale)
    /// 4. Drop cart products from the candidate pool
    /// 5. Score each candidate as the mean similarity over all cart
    ///    references, in parallel
    /// 6. Sort by descending score, ties broken by ascending product id,
    ///    and truncate to `top_n`
    ///
    /// # Returns
    /// At most `top_n` scored candidates; fewer when fewer products are
    /// eligible. Identical inputs always produce identical ordered output.
    #[instrument(skip_all, fields(references = context.references.len(), catalog = catalog.len(), top_n = top_n))]
    pub fn recommend(
        &self,
        context: &CartContext,
        catalog: &[Product],
        top_n: usize,
    ) -> Result<Vec<ScoredCandidate>, RecommendError> {
        if top_n == 0 {
            return Err(RecommendError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }
        if !self.weights.is_valid() {
            return Err(RecommendError::InvalidArgument(format!(
                "similarity weights must be finite and non-negative, got {:?}",
                self.weights
            )));
        }

        // No cart means no similarity anchors; no catalog means no candidates.
        if context.is_empty() || catalog.is_empty() {
            return Ok(Vec::new());
        }

        // Observed over the full catalog, fresh on every call.
        let range = PriceRange::over(catalog);

        let candidates = self
            .filters
            .apply(catalog.to_vec(), context)
            .map_err(|e| RecommendError::Computation(e.to_string()))?;
        debug!("{} candidates eligible after exclusion", candidates.len());

        let reference_count = context.references.len() as f64;
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_par_iter()
            .map(|product| {
                let total: f64 = context
                    .references
                    .iter()
                    .map(|reference| similarity(&product, reference, &range, &self.weights))
                    .sum();
                ScoredCandidate {
                    score: total / reference_count,
                    product,
                }
            })
            .collect();

        if let Some(bad) = scored.iter().find(|c| !c.score.is_finite()) {
            return Err(RecommendError::Computation(format!(
                "non-finite score for product {}",
                bad.product.id
            )));
        }

        // Descending score; ascending id makes equal scores deterministic.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.product.id.cmp(&b.product.id))
        });
        scored.truncate(top_n);

        debug!("Returning {} recommendations", scored.len());
        Ok(scored)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart::ReferenceProduct;

    fn product(id: u32, price: f64, category: &str) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price,
            category: category.to_string(),
            image: format!("img/{id}.jpg"),
            description: String::new(),
        }
    }

    fn reference(id: u32, price: f64, category: &str) -> ReferenceProduct {
        ReferenceProduct {
            id,
            price,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_same_category_same_price_ranks_first() {
        // Catalog prices span 10..20; the cart holds product 1 (10, "A").
        // Product 3 shares category and normalized price -> score 1.0.
        // Product 2 differs in both -> score 0.0.
        let catalog = vec![
            product(1, 10.0, "A"),
            product(2, 20.0, "B"),
            product(3, 10.0, "A"),
        ];
        let context = CartContext::from_references(vec![reference(1, 10.0, "A")]);

        let result = Recommender::new().recommend(&context, &catalog, 2).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].product.id, 3);
        assert!((result[0].score - 1.0).abs() < 1e-12);
        assert_eq!(result[1].product.id, 2);
        assert!(result[1].score.abs() < 1e-12);
    }

    #[test]
    fn test_empty_cart_yields_empty_result() {
        let catalog = vec![product(1, 10.0, "A"), product(2, 20.0, "B")];
        let context = CartContext::default();

        let result = Recommender::new()
            .recommend(&context, &catalog, DEFAULT_TOP_N)
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let context = CartContext::from_references(vec![reference(1, 10.0, "A")]);

        let result = Recommender::new()
            .recommend(&context, &[], DEFAULT_TOP_N)
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_equal_prices_rank_by_category_alone() {
        // One distinct price in the catalog: the price term is 1 for every
        // pair, so only the category match separates candidates.
        let catalog = vec![
            product(1, 15.0, "Coffee"),
            product(2, 15.0, "Tea"),
            product(3, 15.0, "Coffee"),
            product(4, 15.0, "Equipment"),
        ];
        let context = CartContext::from_references(vec![reference(1, 15.0, "Coffee")]);

        let result = Recommender::new().recommend(&context, &catalog, 3).unwrap();

        assert_eq!(result[0].product.id, 3);
        assert!((result[0].score - 1.0).abs() < 1e-12);
        // The two non-matching categories tie at 0.3 and fall back to id order.
        assert_eq!(result[1].product.id, 2);
        assert_eq!(result[2].product.id, 4);
        assert!((result[1].score - 0.3).abs() < 1e-12);
        assert!((result[2].score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_output_shorter_than_top_n_when_few_eligible() {
        // topN = 4 requested, but only 2 products are not in the cart.
        let catalog = vec![
            product(1, 10.0, "A"),
            product(2, 12.0, "A"),
            product(3, 14.0, "B"),
        ];
        let context = CartContext::from_references(vec![reference(1, 10.0, "A")]);

        let result = Recommender::new()
            .recommend(&context, &catalog, DEFAULT_TOP_N)
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_cart_products_never_recommended() {
        let catalog: Vec<Product> = (1..=10)
            .map(|id| product(id, 10.0 + id as f64, "Coffee"))
            .collect();
        let context = CartContext::from_references(vec![
            reference(2, 12.0, "Coffee"),
            reference(5, 15.0, "Coffee"),
        ]);

        let result = Recommender::new().recommend(&context, &catalog, 10).unwrap();

        assert_eq!(result.len(), 8);
        for candidate in &result {
            assert!(!context.product_ids.contains(&candidate.product.id));
        }
    }

    #[test]
    fn test_scores_average_over_cart_references() {
        // Two references, one matching category each candidate, prices all
        // equal so the price term contributes 0.3 per reference.
        let catalog = vec![
            product(1, 15.0, "Coffee"),
            product(2, 15.0, "Tea"),
            product(3, 15.0, "Coffee"),
        ];
        let context = CartContext::from_references(vec![
            reference(1, 15.0, "Coffee"),
            reference(2, 15.0, "Tea"),
        ]);

        let result = Recommender::new().recommend(&context, &catalog, 1).unwrap();

        // Candidate 3 vs Coffee ref: 1.0; vs Tea ref: 0.3; mean 0.65.
        assert_eq!(result[0].product.id, 3);
        assert!((result[0].score - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_zero_top_n_is_invalid_argument() {
        let catalog = vec![product(1, 10.0, "A")];
        let context = CartContext::from_references(vec![reference(1, 10.0, "A")]);

        let err = Recommender::new()
            .recommend(&context, &catalog, 0)
            .unwrap_err();
        assert!(matches!(err, RecommendError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let catalog = vec![product(1, 10.0, "A"), product(2, 12.0, "A")];
        let context = CartContext::from_references(vec![reference(1, 10.0, "A")]);

        let engine = Recommender::new().with_weights(SimilarityWeights {
            category: f64::NAN,
            price: 0.3,
        });
        let err = engine.recommend(&context, &catalog, 1).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidArgument(_)));
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let catalog: Vec<Product> = (1..=50)
            .map(|id| {
                let category = match id % 3 {
                    0 => "Coffee",
                    1 => "Tea",
                    _ => "Equipment",
                };
                product(id, (id % 7) as f64 * 3.5, category)
            })
            .collect();
        let context = CartContext::from_references(vec![
            reference(1, 3.5, "Tea"),
            reference(6, 21.0, "Coffee"),
        ]);

        let engine = Recommender::new();
        let first = engine.recommend(&context, &catalog, 10).unwrap();
        let second = engine.recommend(&context, &catalog, 10).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights_change_ranking() {
        // Candidate 2 matches category at the far price end; candidate 3
        // sits at the same price in another category. Category-heavy
        // weights prefer 2, price-only weights prefer 3.
        let catalog = vec![
            product(1, 10.0, "Coffee"),
            product(2, 20.0, "Coffee"),
            product(3, 10.0, "Tea"),
        ];
        let context = CartContext::from_references(vec![reference(1, 10.0, "Coffee")]);

        let default_order = Recommender::new().recommend(&context, &catalog, 2).unwrap();
        assert_eq!(default_order[0].product.id, 2);

        let price_only = Recommender::new()
            .with_weights(SimilarityWeights {
                category: 0.0,
                price: 1.0,
            })
            .recommend(&context, &catalog, 2)
            .unwrap();
        assert_eq!(price_only[0].product.id, 3);
    }

    #[test]
    fn test_scored_candidate_serializes_flat() {
        let candidate = ScoredCandidate {
            product: product(7, 12.0, "Coffee"),
            score: 0.85,
        };

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["category"], "Coffee");
        assert_eq!(json["score"], 0.85);
    }
}
