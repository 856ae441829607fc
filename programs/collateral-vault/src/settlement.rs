//! Interest settlement for a single borrower.
//!
//! Everything here is pure math over `(net_borrows, checkpoint, index,
//! liquid_value, intent)` so the collection policy can be tested without any
//! account plumbing. Instructions apply the returned [`SettlementOutcome`] to
//! the vault ledger and the borrower's posted shares.

use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// Whether the operation triggering settlement is adding or removing value
/// for the borrower.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementIntent {
    Deposit,
    Withdraw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// Interest actually collected, in asset terms.
    pub collected: u64,
    /// Interest owed that could not be collected this pass.
    pub remaining_owed: u64,
    /// Checkpoint to record for the borrower.
    pub new_checkpoint: u128,
}

/// Interest owed by a borrower since their last checkpoint:
/// `net_borrows * (index - checkpoint) / checkpoint`.
///
/// Zero when the borrower has no principal outstanding or has never been
/// checkpointed.
pub fn interest_owed(net_borrows: u64, checkpoint: u128, index: u128) -> Result<u64> {
    if net_borrows == 0 || checkpoint == 0 {
        return Ok(0);
    }
    require_gte!(index, checkpoint, ErrorCode::StaleIndex);

    let owed = (net_borrows as u128)
        .checked_mul(index - checkpoint)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_div(checkpoint)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    u64::try_from(owed).map_err(|_| ErrorCode::ArithmeticOverflow.into())
}

/// Advances a checkpoint by the fraction of `owed` actually collected:
/// `checkpoint + (index - checkpoint) * collected / owed`.
///
/// Collecting everything snaps to the current index; collecting nothing
/// leaves the checkpoint where it was. Any other split must advance the
/// checkpoint proportionally, otherwise the interval that was already paid
/// for gets recomputed on the next pass and the uncollected remainder is
/// double counted against the global aggregate.
pub fn proportional_checkpoint(
    checkpoint: u128,
    index: u128,
    owed: u64,
    collected: u64,
) -> Result<u128> {
    require_gte!(index, checkpoint, ErrorCode::StaleIndex);
    require_gte!(owed, collected, ErrorCode::ArithmeticUnderflow);

    if owed == collected {
        return Ok(index);
    }
    if collected == 0 {
        return Ok(checkpoint);
    }

    let advance = (index - checkpoint)
        .checked_mul(collected as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_div(owed as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    checkpoint
        .checked_add(advance)
        .ok_or_else(|| ErrorCode::ArithmeticOverflow.into())
}

/// Share of uncollected interest that dies with repaid principal:
/// `remaining_owed * repaid / net_borrows_before`.
///
/// Owed scales linearly with principal, so once principal shrinks the
/// checkpoint gap can never recover this portion. It has to leave the global
/// aggregate together with the repayment, or it lingers there as phantom
/// debt no borrower owes. A full repayment writes off the whole remainder.
pub fn principal_reduction_write_off(
    remaining_owed: u64,
    repaid: u64,
    net_borrows_before: u64,
) -> Result<u64> {
    if remaining_owed == 0 || net_borrows_before == 0 {
        return Ok(0);
    }
    require_gte!(net_borrows_before, repaid, ErrorCode::MaxRepayExceeded);

    let written_off = (remaining_owed as u128)
        .checked_mul(repaid as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_div(net_borrows_before as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;

    u64::try_from(written_off).map_err(|_| ErrorCode::ArithmeticOverflow.into())
}

/// Checkpoint for a position that grew by fresh principal while
/// `carried_owed` interest was still uncollected. Solves
/// `net_borrows * (index - checkpoint) / checkpoint == carried_owed`, so the
/// old debt keeps its value and the added principal owes nothing until the
/// index moves again. Without the re-blend the enlarged principal would
/// retroactively owe interest the accrual never fed into the global
/// aggregate. Rounded up so the carried debt is never overstated.
pub fn blended_checkpoint(index: u128, net_borrows: u64, carried_owed: u64) -> Result<u128> {
    if carried_owed == 0 || net_borrows == 0 {
        return Ok(index);
    }

    let denominator = (net_borrows as u128)
        .checked_add(carried_owed as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    index
        .checked_mul(net_borrows as u128)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_add(denominator - 1)
        .ok_or(ErrorCode::ArithmeticOverflow)?
        .checked_div(denominator)
        .ok_or_else(|| ErrorCode::ArithmeticOverflow.into())
}

/// Decides how much interest to collect from a borrower and where their
/// checkpoint lands.
///
/// * owed == 0: no-op, the checkpoint refreshes to the current index.
/// * liquid value covers owed: collect all of it. Only this path may land
///   the checkpoint on the current index with debt outstanding.
/// * insolvent + Withdraw: collect the whole liquid value, advance the
///   checkpoint by the paid fraction.
/// * insolvent + Deposit: the borrower is adding value, nothing may be
///   collected and the checkpoint stays put.
pub fn settle(
    net_borrows: u64,
    checkpoint: u128,
    index: u128,
    liquid_value: u64,
    intent: SettlementIntent,
) -> Result<SettlementOutcome> {
    let owed = interest_owed(net_borrows, checkpoint, index)?;
    if owed == 0 {
        return Ok(SettlementOutcome {
            collected: 0,
            remaining_owed: 0,
            new_checkpoint: index,
        });
    }

    let collected = if liquid_value >= owed {
        owed
    } else {
        match intent {
            SettlementIntent::Withdraw => liquid_value,
            SettlementIntent::Deposit => 0,
        }
    };

    Ok(SettlementOutcome {
        collected,
        remaining_owed: owed - collected,
        new_checkpoint: proportional_checkpoint(checkpoint, index, owed, collected)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INDEX_SCALE;

    fn fp(units: u128, hundredths: u128) -> u128 {
        units * INDEX_SCALE + hundredths * INDEX_SCALE / 100
    }

    #[test]
    fn owed_grows_with_the_index_gap() {
        assert_eq!(interest_owed(100, fp(1, 0), fp(1, 20)).unwrap(), 20);
        assert_eq!(interest_owed(1_000_000, fp(1, 0), fp(1, 5)).unwrap(), 50_000);
    }

    #[test]
    fn owed_is_zero_without_principal_or_checkpoint() {
        assert_eq!(interest_owed(0, fp(1, 0), fp(1, 20)).unwrap(), 0);
        assert_eq!(interest_owed(100, 0, fp(1, 20)).unwrap(), 0);
        assert_eq!(interest_owed(100, fp(1, 20), fp(1, 20)).unwrap(), 0);
    }

    #[test]
    fn backward_index_is_rejected() {
        assert_eq!(
            interest_owed(100, fp(1, 20), fp(1, 0)),
            Err(ErrorCode::StaleIndex.into())
        );
        assert_eq!(
            proportional_checkpoint(fp(1, 20), fp(1, 0), 10, 5),
            Err(ErrorCode::StaleIndex.into())
        );
    }

    #[test]
    fn checkpoint_advances_by_the_paid_fraction() {
        // Half of 20 owed paid: 1.0 + 0.2 * (10/20) = 1.1
        assert_eq!(
            proportional_checkpoint(fp(1, 0), fp(1, 20), 20, 10).unwrap(),
            fp(1, 10)
        );
        // Full payment snaps to the index, zero payment stays put.
        assert_eq!(
            proportional_checkpoint(fp(1, 0), fp(1, 20), 20, 20).unwrap(),
            fp(1, 20)
        );
        assert_eq!(
            proportional_checkpoint(fp(1, 0), fp(1, 20), 20, 0).unwrap(),
            fp(1, 0)
        );
    }

    #[test]
    fn checkpoint_never_decreases() {
        let checkpoint = fp(1, 35);
        let index = fp(2, 40);
        let owed = 1_000;
        for collected in [0u64, 1, 250, 999, 1_000] {
            let next = proportional_checkpoint(checkpoint, index, owed, collected).unwrap();
            assert!(next >= checkpoint);
            assert!(next <= index);
        }
    }

    #[test]
    fn solvent_borrower_pays_in_full() {
        let outcome = settle(100, fp(1, 0), fp(1, 20), 500, SettlementIntent::Withdraw).unwrap();
        assert_eq!(
            outcome,
            SettlementOutcome {
                collected: 20,
                remaining_owed: 0,
                new_checkpoint: fp(1, 20),
            }
        );
    }

    #[test]
    fn insolvent_withdraw_collects_everything_available() {
        let outcome = settle(100, fp(1, 0), fp(1, 20), 10, SettlementIntent::Withdraw).unwrap();
        assert_eq!(outcome.collected, 10);
        assert_eq!(outcome.remaining_owed, 10);
        assert_eq!(outcome.new_checkpoint, fp(1, 10));
    }

    #[test]
    fn insolvent_deposit_collects_nothing() {
        let outcome = settle(100, fp(1, 0), fp(1, 20), 10, SettlementIntent::Deposit).unwrap();
        assert_eq!(outcome.collected, 0);
        assert_eq!(outcome.remaining_owed, 20);
        assert_eq!(outcome.new_checkpoint, fp(1, 0));
    }

    #[test]
    fn settling_twice_at_one_index_collects_once() {
        let first = settle(100, fp(1, 0), fp(1, 20), 500, SettlementIntent::Withdraw).unwrap();
        assert_eq!(first.collected, 20);

        let second = settle(
            100,
            first.new_checkpoint,
            fp(1, 20),
            500,
            SettlementIntent::Withdraw,
        )
        .unwrap();
        assert_eq!(second.collected, 0);
        assert_eq!(second.remaining_owed, 0);
    }

    #[test]
    fn no_debt_refreshes_the_checkpoint() {
        let outcome = settle(0, fp(1, 0), fp(1, 20), 500, SettlementIntent::Deposit).unwrap();
        assert_eq!(outcome.collected, 0);
        assert_eq!(outcome.new_checkpoint, fp(1, 20));
    }

    #[test]
    fn partial_payment_does_not_double_count() {
        // 100_000 borrowed at checkpoint 1.0; index reaches 1.2 so 20_000 is
        // owed. 10_000 gets collected, the checkpoint lands on 1.1.
        let partial = settle(
            100_000,
            fp(1, 0),
            fp(1, 20),
            10_000,
            SettlementIntent::Withdraw,
        )
        .unwrap();
        assert_eq!(partial.collected, 10_000);
        assert_eq!(partial.new_checkpoint, fp(1, 10));

        // At 1.5 the borrower owes 100_000 * (1.5 - 1.1) / 1.1 = 36_363,
        // not the 50_000 a frozen checkpoint would recompute.
        let owed = interest_owed(100_000, partial.new_checkpoint, fp(1, 50)).unwrap();
        assert_eq!(owed, 36_363);
    }

    #[test]
    fn repaid_principal_takes_its_share_of_unpaid_interest() {
        // Insolvent borrower repays half: half of the 20_000 unpaid interest
        // can never be collected again and goes with it.
        assert_eq!(
            principal_reduction_write_off(20_000, 50_000, 100_000).unwrap(),
            10_000
        );
        // Full repayment degenerates to the whole remainder.
        assert_eq!(
            principal_reduction_write_off(20_000, 100_000, 100_000).unwrap(),
            20_000
        );
        assert_eq!(principal_reduction_write_off(0, 50_000, 100_000).unwrap(), 0);
        assert_eq!(
            principal_reduction_write_off(20_000, 200_000, 100_000),
            Err(ErrorCode::MaxRepayExceeded.into())
        );
    }

    #[test]
    fn borrow_increase_carries_owed_across_unchanged() {
        // 100_000 at checkpoint 1.0 owes 20_000 at index 1.2. Doubling the
        // principal must not recompute that debt against 200_000.
        let cp = blended_checkpoint(fp(1, 20), 200_000, 20_000).unwrap();
        assert!(cp > fp(1, 0));
        assert!(cp < fp(1, 20));

        let owed = interest_owed(200_000, cp, fp(1, 20)).unwrap();
        assert!(owed <= 20_000);
        assert!(20_000 - owed <= 1);

        // Nothing carried: the position starts clean at the index.
        assert_eq!(blended_checkpoint(fp(1, 20), 200_000, 0).unwrap(), fp(1, 20));
    }

    #[test]
    fn collected_never_exceeds_owed_or_liquid_value() {
        for liquid in [0u64, 1, 19, 20, 21, 10_000] {
            for intent in [SettlementIntent::Deposit, SettlementIntent::Withdraw] {
                let outcome = settle(100, fp(1, 0), fp(1, 20), liquid, intent).unwrap();
                assert!(outcome.collected <= 20);
                assert!(outcome.collected <= liquid);
                assert_eq!(outcome.collected + outcome.remaining_owed, 20);
            }
        }
    }
}
