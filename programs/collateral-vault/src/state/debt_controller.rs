use anchor_lang::prelude::*;

use crate::{
    constants::{APY_DENOMINATOR, INDEX_SCALE, LEVERAGE_DENOMINATOR, SECONDS_PER_YEAR},
    error::ErrorCode,
};

/// Rate model input. The actual rate computation lives off-chain / upstream;
/// this account caps what a period may charge.
#[account]
pub struct DebtController {
    pub max_apy: u64,
    pub max_leverage: u64,
}

impl DebtController {
    /// Fixed-point rate (scaled by `INDEX_SCALE`) charged over `elapsed`
    /// seconds: `max_apy * elapsed / (APY_DENOMINATOR * 365 days)`.
    pub fn period_rate_fp(&self, elapsed: u64) -> Result<u128> {
        INDEX_SCALE
            .checked_mul(self.max_apy as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_mul(elapsed as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_div((APY_DENOMINATOR as u128) * (SECONDS_PER_YEAR as u128))
            .ok_or_else(|| ErrorCode::ArithmeticOverflow.into())
    }

    /// Largest principal a borrower's liquid collateral value supports:
    /// `liquid_value * (max_leverage - LEVERAGE_DENOMINATOR) / LEVERAGE_DENOMINATOR`.
    pub fn compute_max_principal(&self, liquid_value: u64) -> Result<u64> {
        let multiplier = self
            .max_leverage
            .checked_sub(LEVERAGE_DENOMINATOR)
            .ok_or(ErrorCode::InvalidValue)?;
        let max_principal = (liquid_value as u128)
            .checked_mul(multiplier as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?
            .checked_div(LEVERAGE_DENOMINATOR as u128)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        u64::try_from(max_principal).map_err(|_| ErrorCode::ArithmeticOverflow.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_year_at_max_apy_charges_the_full_rate() {
        let controller = DebtController {
            max_apy: 10,
            max_leverage: 500,
        };
        assert_eq!(
            controller.period_rate_fp(SECONDS_PER_YEAR).unwrap(),
            INDEX_SCALE / 10
        );
        assert_eq!(controller.period_rate_fp(0).unwrap(), 0);
    }

    #[test]
    fn max_principal_scales_with_leverage() {
        let controller = DebtController {
            max_apy: 10,
            max_leverage: 500,
        };
        // 5x leverage: 1_000 down supports 4_000 borrowed on top.
        assert_eq!(controller.compute_max_principal(1_000).unwrap(), 4_000);
    }
}
