use {
    crate::{
        events::InterestAccrued,
        state::{DebtController, LpVault},
    },
    anchor_lang::prelude::*,
};

/// Permissionless crank that rolls the vault's borrow index forward to the
/// current clock without touching any borrower.
#[derive(Accounts)]
pub struct AccrueInterest<'info> {
    #[account(mut)]
    pub lp_vault: Box<Account<'info, LpVault>>,

    #[account(
        seeds = [b"debt_controller"],
        bump,
    )]
    pub debt_controller: Account<'info, DebtController>,
}

impl<'info> AccrueInterest<'info> {
    pub fn accrue_interest(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let interest_delta = self.lp_vault.accrue(&self.debt_controller, now)?;
        if interest_delta > 0 {
            emit!(InterestAccrued {
                lp_vault: self.lp_vault.key(),
                borrow_index: self.lp_vault.borrow_index,
                interest_delta,
            });
        }
        Ok(())
    }
}
