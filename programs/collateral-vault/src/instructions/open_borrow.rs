use {
    super::SettlementEngine,
    crate::{
        error::ErrorCode,
        events::BorrowOpened,
        lp_vault_signer_seeds,
        settlement::{self, SettlementIntent},
        state::{BorrowerAccount, DebtController, GlobalSettings, LpVault, Permission},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

#[derive(Accounts)]
pub struct OpenBorrow<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub authority: Signer<'info>,

    #[account(has_one = authority)]
    pub permission: Account<'info, Permission>,

    /// CHECK: The trader the borrow is opened on behalf of
    pub trader: AccountInfo<'info>,

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

    /// Where the borrowed principal lands, e.g. an AMM position account
    #[account(
        mut,
        constraint = destination.mint == currency.key(),
    )]
    pub destination: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub shares_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub currency: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = payer,
        seeds = [b"borrower", lp_vault.key().as_ref(), trader.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<BorrowerAccount>(),
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
    pub system_program: Program<'info, System>,
}

impl<'info> OpenBorrow<'info> {
    pub fn validate(ctx: &Context<OpenBorrow>, amount: u64) -> Result<()> {
        require!(
            ctx.accounts.permission.can_borrow_from_vault(),
            ErrorCode::InvalidPermissions
        );
        require!(
            ctx.accounts.global_settings.can_trade(),
            ErrorCode::UnpermittedIx
        );
        require_gt!(amount, 0, ErrorCode::ZeroAmount);

        let lp_vault = &ctx.accounts.lp_vault;
        require_gte!(
            lp_vault.max_borrow,
            lp_vault
                .assets_in_amm
                .checked_add(amount)
                .ok_or(ErrorCode::ArithmeticOverflow)?,
            ErrorCode::MaxBorrowExceeded
        );
        require_gte!(
            lp_vault.deposited_assets,
            amount,
            ErrorCode::MaxBorrowExceeded
        );

        Ok(())
    }

    fn init_borrower_if_needed(&mut self, bump: u8) {
        if self.borrower_account.trader == Pubkey::default() {
            self.borrower_account.set_inner(BorrowerAccount {
                bump,
                trader: self.trader.key(),
                lp_vault: self.lp_vault.key(),
                net_borrows: 0,
                borrow_index_checkpoint: 0,
                share_balance: 0,
            });
        }
    }

    fn transfer_token_from_vault_to_destination(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.currency.to_account_info(),
            to: self.destination.to_account_info(),
            authority: self.lp_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext {
            program: self.token_program.to_account_info(),
            accounts: cpi_accounts,
            remaining_accounts: Vec::new(),
            signer_seeds: &[lp_vault_signer_seeds!(self.lp_vault)],
        };
        token_interface::transfer_checked(cpi_ctx, amount, self.currency.decimals)
    }

    pub fn open_borrow(&mut self, amount: u64, bumps: &OpenBorrowBumps) -> Result<()> {
        self.init_borrower_if_needed(bumps.borrower_account);

        let mut engine = SettlementEngine {
            lp_vault: &mut self.lp_vault,
            borrower_account: &mut self.borrower_account,
            debt_controller: &self.debt_controller,
            shares_mint: &self.shares_mint,
            shares_escrow: &self.shares_escrow,
            token_program: &self.token_program,
        };
        let outcome = engine.accrue_and_settle(SettlementIntent::Deposit)?;
        self.shares_mint.reload()?;

        // Principal is capped by the leverage the posted collateral supports.
        let liquid_value = self
            .lp_vault
            .shares_to_assets(self.borrower_account.share_balance, self.shares_mint.supply)?;
        let max_principal = self.debt_controller.compute_max_principal(liquid_value)?;
        require_gte!(
            max_principal,
            self.borrower_account
                .net_borrows
                .checked_add(amount)
                .ok_or(ErrorCode::ArithmeticOverflow)?,
            ErrorCode::MaxLeverageExceeded
        );

        self.transfer_token_from_vault_to_destination(amount)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticUnderflow)?;
        self.lp_vault.assets_in_amm = self
            .lp_vault
            .assets_in_amm
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        self.borrower_account.net_borrows = self
            .borrower_account
            .net_borrows
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        // The settlement pass may have left interest uncollected with the
        // checkpoint behind the index. Re-blend the checkpoint over the
        // enlarged principal so that debt keeps its value and the fresh
        // principal owes nothing until the index moves again.
        self.borrower_account.borrow_index_checkpoint = settlement::blended_checkpoint(
            self.lp_vault.borrow_index,
            self.borrower_account.net_borrows,
            outcome.remaining_owed,
        )?;

        emit!(BorrowOpened {
            trader: self.borrower_account.trader,
            lp_vault: self.lp_vault.key(),
            amount,
            net_borrows: self.borrower_account.net_borrows,
        });

        Ok(())
    }
}
