use async_trait::async_trait;
use originals_core::Result;

/// Supplies a sat/vB fee rate for a target confirmation window. §6.
#[async_trait]
pub trait FeeOracle: Send + Sync {
    async fn estimate_fee(&self, target_blocks: Option<u32>) -> Result<f64>;
}

/// Returns a fixed rate regardless of the target window, for deterministic
/// tests.
pub struct FixedFeeOracle {
    rate_sat_per_vb: f64,
}

impl FixedFeeOracle {
    pub fn new(rate_sat_per_vb: f64) -> Self {
        Self { rate_sat_per_vb }
    }
}

#[async_trait]
impl FeeOracle for FixedFeeOracle {
    async fn estimate_fee(&self, _target_blocks: Option<u32>) -> Result<f64> {
        Ok(self.rate_sat_per_vb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_oracle_ignores_the_requested_window() {
        let oracle = FixedFeeOracle::new(3.5);
        assert_eq!(oracle.estimate_fee(Some(1)).await.unwrap(), 3.5);
        assert_eq!(oracle.estimate_fee(Some(20)).await.unwrap(), 3.5);
    }
}
