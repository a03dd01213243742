//! Per-faction finances: bank, tax, and popular opinion.
//!
//! The bank is a signed balance - debt is a game mechanic, not an error,
//! though it bleeds popular opinion every turn it persists. Tax is an
//! accumulator that only rises. Popular opinion is clamped to `[0, 1]` by
//! every update and multiplies the tax into per-turn income.

use serde::{Deserialize, Serialize};

/// One faction's economic state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialSituation {
    /// Spendable balance; may go negative.
    pub bank: i64,
    /// Per-turn income base, scaled by popular opinion.
    pub tax: u32,
    popular_opinion: f64,
}

impl FinancialSituation {
    /// Create a situation with the given starting values.
    ///
    /// Opinion is clamped into `[0, 1]` up front so the invariant holds
    /// from the first read.
    #[must_use]
    pub fn new(bank: i64, tax: u32, popular_opinion: f64) -> Self {
        Self {
            bank,
            tax,
            popular_opinion: popular_opinion.clamp(0.0, 1.0),
        }
    }

    /// The populace's opinion of the war, in `[0, 1]`.
    #[must_use]
    pub fn popular_opinion(&self) -> f64 {
        self.popular_opinion
    }

    /// Raise opinion by `amount`, clamping at 1.
    pub fn increase_opinion(&mut self, amount: f64) {
        self.popular_opinion = (self.popular_opinion + amount).min(1.0);
    }

    /// Lower opinion by `amount`, clamping at 0.
    pub fn decrease_opinion(&mut self, amount: f64) {
        self.popular_opinion = (self.popular_opinion - amount).max(0.0);
    }

    /// Apply a signed opinion change, dispatching on sign.
    pub fn change_opinion(&mut self, amount: f64) {
        if amount >= 0.0 {
            self.increase_opinion(amount);
        } else {
            self.decrease_opinion(-amount);
        }
    }

    /// Income credited at the start of this faction's turn:
    /// `floor(popular_opinion × tax)`.
    #[must_use]
    pub fn upkeep(&self) -> i64 {
        (self.popular_opinion * f64::from(self.tax)).floor() as i64
    }
}
