use {
    crate::{
        events::{InterestAccrued, InterestSettled},
        lp_vault_signer_seeds,
        settlement::{self, SettlementIntent, SettlementOutcome},
        state::{BorrowerAccount, DebtController, LpVault},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{self, Burn, Mint, TokenAccount, TokenInterface},
};

/// Borrowed view over the accounts every settlement-triggering instruction
/// carries. Runs accrual and one settlement pass and applies the outcome to
/// the vault ledger, the borrower and the shares escrow, all before the
/// triggering instruction's own effect.
pub struct SettlementEngine<'a, 'info> {
    pub lp_vault: &'a mut Account<'info, LpVault>,
    pub borrower_account: &'a mut Account<'info, BorrowerAccount>,
    pub debt_controller: &'a Account<'info, DebtController>,
    pub shares_mint: &'a InterfaceAccount<'info, Mint>,
    pub shares_escrow: &'a InterfaceAccount<'info, TokenAccount>,
    pub token_program: &'a Interface<'info, TokenInterface>,
}

impl<'a, 'info> SettlementEngine<'a, 'info> {
    pub fn accrue_and_settle(&mut self, intent: SettlementIntent) -> Result<SettlementOutcome> {
        let now = Clock::get()?.unix_timestamp;
        let interest_delta = self.lp_vault.accrue(self.debt_controller, now)?;
        if interest_delta > 0 {
            emit!(InterestAccrued {
                lp_vault: self.lp_vault.key(),
                borrow_index: self.lp_vault.borrow_index,
                interest_delta,
            });
        }

        let shares_supply = self.shares_mint.supply;
        let liquid_value = self
            .lp_vault
            .shares_to_assets(self.borrower_account.share_balance, shares_supply)?;

        let outcome = settlement::settle(
            self.borrower_account.net_borrows,
            self.borrower_account.borrow_index_checkpoint,
            self.lp_vault.borrow_index,
            liquid_value,
            intent,
        )?;

        // Insolvent collection drains the whole posted balance; otherwise the
        // burn is the share equivalent of what was collected, rounded so the
        // borrower cannot underpay.
        let shares_burned = if outcome.collected == 0 {
            0
        } else if outcome.collected >= liquid_value {
            self.borrower_account.share_balance
        } else {
            self.lp_vault
                .assets_to_shares_ceil(outcome.collected, shares_supply)?
        };

        if shares_burned > 0 {
            self.burn_escrowed_shares(shares_burned)?;
        }
        self.borrower_account
            .apply_settlement(&outcome, shares_burned)?;
        self.lp_vault.collect_interest(outcome.collected);

        emit!(InterestSettled {
            trader: self.borrower_account.trader,
            lp_vault: self.lp_vault.key(),
            collected: outcome.collected,
            remaining_owed: outcome.remaining_owed,
            new_checkpoint: outcome.new_checkpoint,
        });

        Ok(outcome)
    }

    fn burn_escrowed_shares(&self, amount: u64) -> Result<()> {
        let cpi_accounts = Burn {
            mint: self.shares_mint.to_account_info(),
            from: self.shares_escrow.to_account_info(),
            authority: self.lp_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext {
            program: self.token_program.to_account_info(),
            accounts: cpi_accounts,
            remaining_accounts: Vec::new(),
            signer_seeds: &[lp_vault_signer_seeds!(self.lp_vault)],
        };
        token_interface::burn(cpi_ctx, amount)
    }
}
