use {
    super::SettlementEngine,
    crate::{
        error::ErrorCode,
        events::CollateralDeposit as CollateralDepositEvent,
        lp_vault_signer_seeds,
        settlement::SettlementIntent,
        state::{BorrowerAccount, DebtController, GlobalSettings, LpVault},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{
        self, Burn, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

#[derive(Accounts)]
pub struct CollateralDepositOrWithdraw<'info> {
    /// The trader posting or pulling collateral
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_asset_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        has_one = vault,
        has_one = shares_mint,
        has_one = shares_escrow,
        constraint = lp_vault.asset == asset_mint.key(),
    )]
    pub lp_vault: Box<Account<'info, LpVault>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub shares_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = trader,
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

impl<'info> CollateralDepositOrWithdraw<'info> {
    pub fn validate(ctx: &Context<CollateralDepositOrWithdraw>, amount: u64) -> Result<()> {
        require_gt!(amount, 0, ErrorCode::ZeroAmount);
        require!(
            ctx.accounts.global_settings.can_trade(),
            ErrorCode::UnpermittedIx
        );
        Ok(())
    }

    pub(crate) fn init_borrower_if_needed(&mut self, bump: u8) {
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

    pub(crate) fn settle(&mut self, intent: SettlementIntent) -> Result<crate::settlement::SettlementOutcome> {
        let mut engine = SettlementEngine {
            lp_vault: &mut self.lp_vault,
            borrower_account: &mut self.borrower_account,
            debt_controller: &self.debt_controller,
            shares_mint: &self.shares_mint,
            shares_escrow: &self.shares_escrow,
            token_program: &self.token_program,
        };
        engine.accrue_and_settle(intent)
    }

    pub(crate) fn transfer_token_from_trader_to_vault(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.trader_asset_account.to_account_info(),
            mint: self.asset_mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.trader.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.asset_mint.decimals)
    }

    pub(crate) fn transfer_token_from_vault_to_trader(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.asset_mint.to_account_info(),
            to: self.trader_asset_account.to_account_info(),
            authority: self.lp_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext {
            program: self.token_program.to_account_info(),
            accounts: cpi_accounts,
            remaining_accounts: Vec::new(),
            signer_seeds: &[lp_vault_signer_seeds!(self.lp_vault)],
        };
        token_interface::transfer_checked(cpi_ctx, amount, self.asset_mint.decimals)
    }

    pub(crate) fn burn_escrowed_collateral_shares(&self, amount: u64) -> Result<()> {
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

    fn mint_shares_to_escrow(&self, amount: u64) -> Result<()> {
        let cpi_accounts = MintTo {
            mint: self.shares_mint.to_account_info(),
            to: self.shares_escrow.to_account_info(),
            authority: self.lp_vault.to_account_info(),
        };
        let cpi_ctx = CpiContext {
            program: self.token_program.to_account_info(),
            accounts: cpi_accounts,
            remaining_accounts: Vec::new(),
            signer_seeds: &[lp_vault_signer_seeds!(self.lp_vault)],
        };
        token_interface::mint_to(cpi_ctx, amount)
    }

    pub fn collateral_deposit(
        &mut self,
        amount: u64,
        bumps: &CollateralDepositOrWithdrawBumps,
    ) -> Result<()> {
        self.init_borrower_if_needed(bumps.borrower_account);

        // Adding value: settlement may collect in full but never partially.
        self.settle(SettlementIntent::Deposit)?;
        self.shares_mint.reload()?;

        let shares = self
            .lp_vault
            .assets_to_shares(amount, self.shares_mint.supply)?;

        self.transfer_token_from_trader_to_vault(amount)?;
        self.mint_shares_to_escrow(shares)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;
        self.borrower_account.share_balance = self
            .borrower_account
            .share_balance
            .checked_add(shares)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        emit!(CollateralDepositEvent {
            trader: self.trader.key(),
            lp_vault: self.lp_vault.key(),
            assets: amount,
            shares,
        });

        Ok(())
    }
}
