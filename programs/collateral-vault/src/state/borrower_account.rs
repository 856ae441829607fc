use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    settlement::{self, SettlementOutcome},
};

/// Per-borrower debt state. Created on the trader's first interaction with a
/// vault; once `net_borrows` returns to zero the checkpoint is irrelevant but
/// the account is kept around for the next borrow.
#[account]
pub struct BorrowerAccount {
    /// Bump seed for the BorrowerAccount's PDA
    pub bump: u8,
    /// Wallet that owes the debt
    pub trader: Pubkey,
    /// The LP Vault the principal was borrowed from
    pub lp_vault: Pubkey,
    /// Principal currently owed
    pub net_borrows: u64,
    /// Borrow index recorded at the last full settlement. Zero until the
    /// first settlement touches this account.
    pub borrow_index_checkpoint: u128,
    /// Vault shares posted by the trader, held in the vault's shares escrow
    pub share_balance: u64,
}

impl BorrowerAccount {
    /// Interest owed since the last checkpoint at `current_index`.
    pub fn owed(&self, current_index: u128) -> Result<u64> {
        settlement::interest_owed(self.net_borrows, self.borrow_index_checkpoint, current_index)
    }

    /// Records a settlement outcome. The checkpoint may only move forward;
    /// a backward move means the index regressed upstream.
    pub fn apply_settlement(
        &mut self,
        outcome: &SettlementOutcome,
        shares_burned: u64,
    ) -> Result<()> {
        require_gte!(
            outcome.new_checkpoint,
            self.borrow_index_checkpoint,
            ErrorCode::StaleIndex
        );
        self.share_balance = self
            .share_balance
            .checked_sub(shares_burned)
            .ok_or(ErrorCode::InsufficientShares)?;
        self.borrow_index_checkpoint = outcome.new_checkpoint;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INDEX_SCALE;

    fn account() -> BorrowerAccount {
        BorrowerAccount {
            bump: 255,
            trader: Pubkey::default(),
            lp_vault: Pubkey::default(),
            net_borrows: 50_000,
            borrow_index_checkpoint: INDEX_SCALE,
            share_balance: 1_000,
        }
    }

    #[test]
    fn owed_tracks_the_index() {
        let borrower = account();
        assert_eq!(borrower.owed(INDEX_SCALE).unwrap(), 0);
        assert_eq!(
            borrower.owed(INDEX_SCALE + INDEX_SCALE / 10).unwrap(),
            5_000
        );
    }

    #[test]
    fn fresh_account_owes_nothing() {
        let mut borrower = account();
        borrower.borrow_index_checkpoint = 0;
        assert_eq!(borrower.owed(INDEX_SCALE * 3).unwrap(), 0);
        borrower.borrow_index_checkpoint = INDEX_SCALE;
        borrower.net_borrows = 0;
        assert_eq!(borrower.owed(INDEX_SCALE * 3).unwrap(), 0);
    }

    #[test]
    fn settlement_cannot_rewind_the_checkpoint() {
        let mut borrower = account();
        let outcome = SettlementOutcome {
            collected: 0,
            remaining_owed: 0,
            new_checkpoint: INDEX_SCALE / 2,
        };
        assert_eq!(
            borrower.apply_settlement(&outcome, 0),
            Err(ErrorCode::StaleIndex.into())
        );
    }

    #[test]
    fn settlement_burns_posted_shares() {
        let mut borrower = account();
        let outcome = SettlementOutcome {
            collected: 100,
            remaining_owed: 0,
            new_checkpoint: INDEX_SCALE + 1,
        };
        borrower.apply_settlement(&outcome, 400).unwrap();
        assert_eq!(borrower.share_balance, 600);
        assert_eq!(borrower.borrow_index_checkpoint, INDEX_SCALE + 1);

        assert_eq!(
            borrower.apply_settlement(&outcome, 601),
            Err(ErrorCode::InsufficientShares.into())
        );
    }
}
