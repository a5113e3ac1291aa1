//! Similarity scoring primitives.
//!
//! A candidate is compared to one cart reference product along two axes:
//! category (exact case-insensitive match) and price (distance on a
//! catalog-normalized [0, 1] scale). The two are combined as a weighted
//! sum, category-heavy by default.

use cart::ReferenceProduct;
use store::Product;

/// Default weight of the category match in the combined similarity
const DEFAULT_CATEGORY_WEIGHT: f64 = 0.7;
/// Default weight of price proximity in the combined similarity
const DEFAULT_PRICE_WEIGHT: f64 = 0.3;

/// Weights for the two similarity components.
///
/// Tunable policy constants; the defaults sum to 1.0 so combined scores
/// stay in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub category: f64,
    pub price: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY_WEIGHT,
            price: DEFAULT_PRICE_WEIGHT,
        }
    }
}

impl SimilarityWeights {
    /// Weights must be finite and non-negative to produce meaningful scores
    pub fn is_valid(&self) -> bool {
        self.category.is_finite()
            && self.price.is_finite()
            && self.category >= 0.0
            && self.price >= 0.0
    }
}

/// Observed min/max price of a catalog, used to rescale prices to [0, 1].
///
/// Computed once per scoring call over the FULL catalog (cart products
/// included, since they anchor the comparison), never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Compute the observed price range of a catalog.
    ///
    /// Non-finite prices coerce to 0 before taking part, the same coercion
    /// `normalize` applies to its input.
    pub fn over(catalog: &[Product]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for product in catalog {
            let price = coerce_price(product.price);
            min = min.min(price);
            max = max.max(price);
        }
        if catalog.is_empty() {
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// Rescale a price into [0, 1] relative to this range.
    ///
    /// ## Algorithm
    /// - Coerce a non-finite price to 0
    /// - `(price - min) / (max - min)`, clamped to [0, 1]
    /// - If the catalog has a single distinct price (`max == min`), every
    ///   price maps to the neutral value 0.5: no division by zero, and no
    ///   bias toward either extreme
    pub fn normalize(&self, price: f64) -> f64 {
        let denom = self.max - self.min;
        if denom == 0.0 {
            return 0.5;
        }
        ((coerce_price(price) - self.min) / denom).clamp(0.0, 1.0)
    }
}

/// Non-numeric upstream prices arrive here as NaN/infinities; treat them as 0
fn coerce_price(price: f64) -> f64 {
    if price.is_finite() { price } else { 0.0 }
}

/// Category similarity: 1 if both labels are non-empty and equal
/// case-insensitively, else 0. Blank labels never match anything,
/// including each other.
pub fn category_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.to_lowercase() == b.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Combined similarity between one candidate and one cart reference.
///
/// `weights.category * category_sim + weights.price * (1 - |Δ normalized price|)`.
/// Pure function of its arguments; no side effects.
pub fn similarity(
    candidate: &Product,
    reference: &ReferenceProduct,
    range: &PriceRange,
    weights: &SimilarityWeights,
) -> f64 {
    let category_sim = category_similarity(&candidate.category, &reference.category);
    let price_sim =
        1.0 - (range.normalize(candidate.price) - range.normalize(reference.price)).abs();
    weights.category * category_sim + weights.price * price_sim
}
