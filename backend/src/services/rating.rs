//! Seller rating aggregation
//!
//! A seller's `rating` and `reviews_count` are recomputed from the full set
//! of their reviews after every new review. Concurrent recomputations are
//! last-write-wins; each one reads the complete set, so the final state is
//! consistent once the writes settle.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::models::DEFAULT_SELLER_RATING;
use crate::store::{MarketStore, StoreResult};

/// Mean of the ratings rounded to two decimals (half away from zero)
///
/// Sellers without reviews keep the default 5.00.
pub fn compute_seller_rating(ratings: &[i32]) -> (Decimal, i32) {
    if ratings.is_empty() {
        return (DEFAULT_SELLER_RATING, 0);
    }

    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let count = ratings.len() as i64;
    let mean = Decimal::from(sum) / Decimal::from(count);

    (
        mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ratings.len() as i32,
    )
}

async fn recompute(store: &dyn MarketStore, seller_id: Uuid) -> StoreResult<(Decimal, i32)> {
    let ratings = store.seller_ratings(seller_id).await?;
    let (rating, count) = compute_seller_rating(&ratings);
    store.update_user_rating(seller_id, rating, count).await?;
    Ok((rating, count))
}

/// Recompute and persist a seller's rating
///
/// Failures are logged and swallowed; the review that triggered the
/// recomputation has already been stored.
pub async fn update_seller_rating(store: &dyn MarketStore, seller_id: Uuid) {
    match recompute(store, seller_id).await {
        Ok((rating, reviews_count)) => {
            tracing::info!(
                seller_id = %seller_id,
                rating = %rating,
                reviews_count,
                "Seller rating updated"
            );
        }
        Err(e) => {
            tracing::error!(seller_id = %seller_id, error = %e, "Failed to update seller rating");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_no_reviews_keeps_default() {
        assert_eq!(compute_seller_rating(&[]), (dec("5.00"), 0));
    }

    #[test]
    fn test_mean_is_rounded_to_two_places() {
        assert_eq!(compute_seller_rating(&[5, 4]), (dec("4.50"), 2));
        assert_eq!(compute_seller_rating(&[5, 4, 4]), (dec("4.33"), 3));
        assert_eq!(compute_seller_rating(&[5, 5, 4]), (dec("4.67"), 3));
        assert_eq!(compute_seller_rating(&[1]), (dec("1"), 1));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 4.125 sits exactly on the midpoint
        let ratings = [5, 5, 5, 5, 4, 4, 4, 1];
        assert_eq!(compute_seller_rating(&ratings), (dec("4.13"), 8));
    }
}
