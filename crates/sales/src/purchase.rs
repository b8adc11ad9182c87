use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use growstack_core::{PrincipalId, ProductId, PurchaseId};

/// A completed purchase of a product.
///
/// `amount` is in the smallest currency unit and captured at purchase time,
/// so later price edits never rewrite past revenue. `buyer_id` is optional:
/// guest checkouts have no principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub product_id: ProductId,
    pub creator_id: PrincipalId,
    pub buyer_id: Option<PrincipalId>,
    pub amount: u64,
    pub occurred_at: DateTime<Utc>,
}

/// The creator dashboard's sales panel: sale count and gross revenue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales: u64,
    pub total_revenue: u64,
}

/// Fold a creator's purchases into a summary.
pub fn summarize<'a>(purchases: impl IntoIterator<Item = &'a Purchase>) -> SalesSummary {
    purchases
        .into_iter()
        .fold(SalesSummary::default(), |acc, purchase| SalesSummary {
            total_sales: acc.total_sales + 1,
            total_revenue: acc.total_revenue + purchase.amount,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(amount: u64) -> Purchase {
        Purchase {
            id: PurchaseId::new(),
            product_id: ProductId::new(),
            creator_id: PrincipalId::new(),
            buyer_id: Some(PrincipalId::new()),
            amount,
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn empty_history_summarizes_to_zero() {
        assert_eq!(summarize(&Vec::new()), SalesSummary::default());
    }

    #[test]
    fn summary_counts_and_sums_exactly() {
        let history = vec![purchase(250_000), purchase(99_900), purchase(0)];
        let summary = summarize(&history);
        assert_eq!(summary.total_sales, 3);
        assert_eq!(summary.total_revenue, 349_900);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the summary is order-independent.
            #[test]
            fn summary_is_order_independent(amounts in proptest::collection::vec(0u64..1_000_000, 0..20)) {
                let history: Vec<Purchase> = amounts.iter().map(|&a| purchase(a)).collect();
                let mut reversed = history.clone();
                reversed.reverse();
                prop_assert_eq!(summarize(&history), summarize(&reversed));
            }
        }
    }
}
