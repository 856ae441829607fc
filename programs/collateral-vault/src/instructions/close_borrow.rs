use {
    super::SettlementEngine,
    crate::{
        error::ErrorCode,
        events::{BorrowClosed, DebtWrittenOff},
        settlement::{self, SettlementIntent},
        state::{BorrowerAccount, DebtController, GlobalSettings, LpVault, Permission},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

#[derive(Accounts)]
pub struct CloseBorrow<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub authority: Signer<'info>,

    #[account(has_one = authority)]
    pub permission: Account<'info, Permission>,

    /// Token account the repaid principal comes from
    #[account(
        mut,
        constraint = source.mint == currency.key(),
    )]
    pub source: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        has_one = vault,
        has_one = shares_mint,
        has_one = shares_escrow,
        constraint = lp_vault.asset == currency.key(),
    )]
    pub lp_vault: Box<Account<'info, LpVault>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub shares_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub currency: Box<InterfaceAccount<'info, Mint>>,

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

    #[account(
        seeds = [b"global_settings"],
        bump,
    )]
    pub global_settings: Account<'info, GlobalSettings>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CloseBorrow<'info> {
    pub fn validate(ctx: &Context<CloseBorrow>, amount: u64) -> Result<()> {
        require!(
            ctx.accounts.permission.can_borrow_from_vault(),
            ErrorCode::InvalidPermissions
        );
        require_gt!(amount, 0, ErrorCode::ZeroAmount);
        require_gte!(
            ctx.accounts.borrower_account.net_borrows,
            amount,
            ErrorCode::MaxRepayExceeded
        );
        Ok(())
    }

    fn transfer_token_from_source_to_vault(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.source.to_account_info(),
            mint: self.currency.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.payer.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.currency.decimals)
    }

    pub fn close_borrow(&mut self, amount: u64) -> Result<()> {
        let net_borrows_before = self.borrower_account.net_borrows;

        // Repayment shrinks the position, so interest is pulled first, as
        // much as the collateral covers.
        let mut engine = SettlementEngine {
            lp_vault: &mut self.lp_vault,
            borrower_account: &mut self.borrower_account,
            debt_controller: &self.debt_controller,
            shares_mint: &self.shares_mint,
            shares_escrow: &self.shares_escrow,
            token_program: &self.token_program,
        };
        let outcome = engine.accrue_and_settle(SettlementIntent::Withdraw)?;

        self.transfer_token_from_source_to_vault(amount)?;

        self.borrower_account.net_borrows = self
            .borrower_account
            .net_borrows
            .checked_sub(amount)
            .ok_or(ErrorCode::MaxRepayExceeded)?;
        self.lp_vault.assets_in_amm = self
            .lp_vault
            .assets_in_amm
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticUnderflow)?;
        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        // Owed scales with principal, so the repaid fraction of any
        // uncollected interest just became permanently uncollectable. It
        // leaves the global books with the principal; a full close writes
        // off the whole remainder.
        let write_off = settlement::principal_reduction_write_off(
            outcome.remaining_owed,
            amount,
            net_borrows_before,
        )?;
        if write_off > 0 {
            self.lp_vault.write_off_interest(write_off);
            if self.borrower_account.net_borrows == 0 {
                self.borrower_account.borrow_index_checkpoint = self.lp_vault.borrow_index;
            }

            emit!(DebtWrittenOff {
                trader: self.borrower_account.trader,
                lp_vault: self.lp_vault.key(),
                amount: write_off,
            });
        }

        emit!(BorrowClosed {
            trader: self.borrower_account.trader,
            lp_vault: self.lp_vault.key(),
            amount,
            net_borrows: self.borrower_account.net_borrows,
        });

        Ok(())
    }
}
