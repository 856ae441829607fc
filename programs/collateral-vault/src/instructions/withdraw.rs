use {
    super::DepositOrWithdraw,
    crate::{error::ErrorCode, events::Withdraw as WithdrawEvent},
    anchor_lang::prelude::*,
};

pub trait Withdraw {
    fn withdraw(&mut self, amount: u64) -> Result<()>;
}

impl Withdraw for DepositOrWithdraw<'_> {
    fn withdraw(&mut self, amount: u64) -> Result<()> {
        // Only idle assets can leave; lent-out principal and uncollected
        // interest stay behind.
        require_gte!(
            self.lp_vault.deposited_assets,
            amount,
            ErrorCode::ArithmeticUnderflow
        );

        let shares_burn_amount = self
            .lp_vault
            .assets_to_shares_ceil(amount, self.shares_mint.supply)?;

        self.transfer_token_from_vault_to_owner(amount)?;
        self.burn_shares_from_user(shares_burn_amount)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticUnderflow)?;

        emit!(WithdrawEvent {
            sender: self.owner.key(),
            receiver: self.owner_asset_account.owner.key(),
            owner: self.owner_shares_account.owner.key(),
            assets: amount,
            shares: shares_burn_amount,
        });

        Ok(())
    }
}
