use {
    super::DepositOrWithdraw,
    crate::{error::ErrorCode, events::Withdraw as WithdrawEvent},
    anchor_lang::prelude::*,
};

pub trait Redeem {
    fn redeem(&mut self, shares_amount: u64) -> Result<()>;
}

impl Redeem for DepositOrWithdraw<'_> {
    fn redeem(&mut self, shares_amount: u64) -> Result<()> {
        let token_transfer_amount = self
            .lp_vault
            .shares_to_assets(shares_amount, self.shares_mint.supply)?;
        require_gte!(
            self.lp_vault.deposited_assets,
            token_transfer_amount,
            ErrorCode::ArithmeticUnderflow
        );

        self.transfer_token_from_vault_to_owner(token_transfer_amount)?;
        self.burn_shares_from_user(shares_amount)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_sub(token_transfer_amount)
            .ok_or(ErrorCode::ArithmeticUnderflow)?;

        let sender_owner_receiver = self.owner.key();

        emit!(WithdrawEvent {
            sender: sender_owner_receiver,
            receiver: sender_owner_receiver,
            owner: sender_owner_receiver,
            assets: token_transfer_amount,
            shares: shares_amount,
        });

        Ok(())
    }
}
