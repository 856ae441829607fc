use {
    super::CollateralDepositOrWithdraw,
    crate::{
        error::ErrorCode, events::CollateralWithdraw as CollateralWithdrawEvent,
        settlement::SettlementIntent,
    },
    anchor_lang::prelude::*,
};

pub trait CollateralWithdraw {
    fn collateral_withdraw(&mut self, amount: u64) -> Result<()>;
}

impl CollateralWithdraw for CollateralDepositOrWithdraw<'_> {
    fn collateral_withdraw(&mut self, amount: u64) -> Result<()> {
        // Removing value: interest is collected first, partially if the
        // position is insolvent.
        self.settle(SettlementIntent::Withdraw)?;
        self.shares_mint.reload()?;

        let shares_supply = self.shares_mint.supply;
        let liquid_value = self
            .lp_vault
            .shares_to_assets(self.borrower_account.share_balance, shares_supply)?;
        require_gte!(liquid_value, amount, ErrorCode::InsufficientShares);

        let shares_burn_amount = self
            .lp_vault
            .assets_to_shares_ceil(amount, shares_supply)?
            .min(self.borrower_account.share_balance);

        self.transfer_token_from_vault_to_trader(amount)?;
        self.burn_escrowed_collateral_shares(shares_burn_amount)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticUnderflow)?;
        self.borrower_account.share_balance = self
            .borrower_account
            .share_balance
            .checked_sub(shares_burn_amount)
            .ok_or(ErrorCode::InsufficientShares)?;

        emit!(CollateralWithdrawEvent {
            trader: self.trader.key(),
            lp_vault: self.lp_vault.key(),
            assets: amount,
            shares: shares_burn_amount,
        });

        Ok(())
    }
}
