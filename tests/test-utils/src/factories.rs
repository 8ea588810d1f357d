//! Factory patterns for generating survey prices

use demand_core::{Price, PriceBounds};
use fake::Fake;

/// Generates prices relative to a configured range
#[derive(Debug, Clone, Copy)]
pub struct PriceFactory {
    bounds: PriceBounds,
}

impl Default for PriceFactory {
    fn default() -> Self {
        Self::new(10_000, 300_000, 500)
    }
}

impl PriceFactory {
    /// Factory over `[min, max]` in steps of `step`
    ///
    /// # Panics
    /// When the bounds are invalid.
    #[must_use]
    pub fn new(min: i64, max: i64, step: i64) -> Self {
        let bounds = PriceBounds::new(Price::new(min), Price::new(max), step)
            .unwrap_or_else(|e| panic!("invalid factory bounds: {e}"));
        Self { bounds }
    }

    /// Factory matching existing bounds
    #[must_use]
    pub const fn from_bounds(bounds: PriceBounds) -> Self {
        Self { bounds }
    }

    /// Random price the validator accepts
    #[must_use]
    pub fn build_valid(&self) -> Price {
        let steps = (self.bounds.max.as_i64() - self.bounds.min.as_i64()) / self.bounds.step;
        let k: i64 = (0..=steps).fake();
        Price::new(self.bounds.min.as_i64() + k * self.bounds.step)
    }

    /// `count` accepted prices
    #[must_use]
    pub fn build_batch(&self, count: usize) -> Vec<Price> {
        (0..count).map(|_| self.build_valid()).collect()
    }

    /// In range but between two steps
    ///
    /// Only meaningful for a step greater than one.
    #[must_use]
    pub fn build_off_step(&self) -> Price {
        let on_step = self.build_valid();
        let nudged = on_step.as_i64() + 1;
        if nudged > self.bounds.max.as_i64() {
            Price::new(on_step.as_i64() - 1)
        } else {
            Price::new(nudged)
        }
    }

    /// Price below the minimum
    #[must_use]
    pub fn build_below_range(&self) -> Price {
        let gap: i64 = (1..=10).fake();
        Price::new(self.bounds.min.as_i64() - gap * self.bounds.step)
    }

    /// Price above the maximum
    #[must_use]
    pub fn build_above_range(&self) -> Price {
        let gap: i64 = (1..=10).fake();
        Price::new(self.bounds.max.as_i64() + gap * self.bounds.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prices_sit_on_grid() {
        let factory = PriceFactory::default();
        let bounds = PriceBounds::new(Price::new(10_000), Price::new(300_000), 500)
            .unwrap_or_else(|e| panic!("{e}"));
        for price in factory.build_batch(200) {
            assert!(bounds.contains(price));
            assert!(bounds.is_on_step(price));
        }
    }

    #[test]
    fn test_invalid_prices_are_invalid() {
        let factory = PriceFactory::new(10_000, 30_000, 500);
        let bounds = PriceBounds::new(Price::new(10_000), Price::new(30_000), 500)
            .unwrap_or_else(|e| panic!("{e}"));
        for _ in 0..50 {
            assert!(!bounds.is_on_step(factory.build_off_step()));
            assert!(!bounds.contains(factory.build_below_range()));
            assert!(!bounds.contains(factory.build_above_range()));
        }
    }
}
