//! The money ledger and cumulative passenger statistics.

/// Cumulative passenger counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stats {
    pub passengers_created: u64,
    pub passengers_served:  u64,
}

/// Money balance plus stats.
///
/// Purchases go through [`try_spend`](Self::try_spend), which refuses to
/// overdraw.  Maintenance goes through [`charge`](Self::charge), which may
/// drive the balance negative.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Economy {
    pub money: f64,
    pub stats: Stats,
}

impl Economy {
    pub fn new(money: f64) -> Self {
        Self { money, stats: Stats::default() }
    }

    #[inline]
    pub fn can_afford(&self, price: f64) -> bool {
        self.money >= price
    }

    /// Debit `price` if the balance covers it.  Returns `false` and leaves
    /// the balance untouched otherwise.
    pub fn try_spend(&mut self, price: f64) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.money -= price;
        true
    }

    /// Unconditional debit.
    #[inline]
    pub fn charge(&mut self, amount: f64) {
        self.money -= amount;
    }

    #[inline]
    pub fn credit(&mut self, amount: f64) {
        self.money += amount;
    }

    /// Take the next passenger number and bump the created counter.
    pub fn next_passenger_id(&mut self) -> crate::PassengerId {
        let id = crate::PassengerId(self.stats.passengers_created);
        self.stats.passengers_created += 1;
        id
    }
}
