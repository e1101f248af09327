//! Per-processor aggregation of ledger records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::StoredItem;
use crate::processor::Processor;

/// Request count and amount handled by one processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorTotals {
    pub total_requests: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Totals for both processors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsSummary {
    pub default: ProcessorTotals,
    pub fallback: ProcessorTotals,
}

impl PaymentsSummary {
    /// Totals for a single processor
    #[must_use]
    pub const fn get(&self, processor: Processor) -> &ProcessorTotals {
        match processor {
            Processor::Default => &self.default,
            Processor::Fallback => &self.fallback,
        }
    }

    fn get_mut(&mut self, processor: Processor) -> &mut ProcessorTotals {
        match processor {
            Processor::Default => &mut self.default,
            Processor::Fallback => &mut self.fallback,
        }
    }
}

/// Aggregate `items` whose timestamp lies in `[from, to]`
///
/// Either bound may be omitted. An inverted window yields empty totals.
#[must_use]
pub fn summarize(items: &[StoredItem], from: Option<i64>, to: Option<i64>) -> PaymentsSummary {
    let mut summary = PaymentsSummary::default();
    let in_window = |ts: i64| from.map_or(true, |f| ts >= f) && to.map_or(true, |t| ts <= t);

    for item in items.iter().filter(|i| in_window(i.timestamp)) {
        let totals = summary.get_mut(item.processor);
        totals.total_requests += 1;
        totals.total_amount += item.value;
    }
    summary
}
