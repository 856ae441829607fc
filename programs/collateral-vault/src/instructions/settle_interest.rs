use {
    super::SettlementEngine,
    crate::{
        settlement::SettlementIntent,
        state::{BorrowerAccount, DebtController, LpVault},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Permissionless crank that collects a borrower's accrued interest from
/// their escrowed collateral shares.
#[derive(Accounts)]
pub struct SettleInterest<'info> {
    #[account(
        mut,
        has_one = shares_mint,
        has_one = shares_escrow,
    )]
    pub lp_vault: Box<Account<'info, LpVault>>,

    #[account(
        mut,
        has_one = lp_vault,
    )]
    pub borrower_account: Box<Account<'info, BorrowerAccount>>,

    #[account(
        seeds = [b"debt_controller"],
        bump,
    )]
    pub debt_controller: Account<'info, DebtController>,

    #[account(mut)]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub shares_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> SettleInterest<'info> {
    pub fn settle_interest(&mut self) -> Result<()> {
        let mut engine = SettlementEngine {
            lp_vault: &mut self.lp_vault,
            borrower_account: &mut self.borrower_account,
            debt_controller: &self.debt_controller,
            shares_mint: &self.shares_mint,
            shares_escrow: &self.shares_escrow,
            token_program: &self.token_program,
        };
        engine.accrue_and_settle(SettlementIntent::Withdraw)?;
        Ok(())
    }
}
