use serde::{Deserialize, Serialize};

use crate::config::{FEE_MULTIPLIER_HIGH, FEE_MULTIPLIER_LOW, FEE_MULTIPLIER_MIDDLE, FEE_MULTIPLIER_ZERO};

/// How `max_fee` is derived from the serialized size of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeCalculationStrategy {
    Zero,
    Low,
    Middle,
    High,
}

impl FeeCalculationStrategy {
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Zero => FEE_MULTIPLIER_ZERO,
            Self::Low => FEE_MULTIPLIER_LOW,
            Self::Middle => FEE_MULTIPLIER_MIDDLE,
            Self::High => FEE_MULTIPLIER_HIGH,
        }
    }

    /// `size * multiplier`, saturating.
    pub fn calculate(self, size: usize) -> u64 {
        u64::try_from(size)
            .unwrap_or(u64::MAX)
            .saturating_mul(self.multiplier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_scales_with_size() {
        assert_eq!(FeeCalculationStrategy::Zero.calculate(200), 0);
        assert_eq!(FeeCalculationStrategy::Low.calculate(200), 1_000);
        assert_eq!(FeeCalculationStrategy::Middle.calculate(200), 50_000);
        assert_eq!(FeeCalculationStrategy::High.calculate(200), 140_000);
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&FeeCalculationStrategy::Middle).unwrap();
        assert_eq!(json, "\"MIDDLE\"");
    }
}
