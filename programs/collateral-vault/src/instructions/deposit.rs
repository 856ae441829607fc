use {
    crate::{
        error::ErrorCode,
        events::Deposit as DepositEvent,
        lp_vault_signer_seeds,
        state::{GlobalSettings, LpVault},
    },
    anchor_lang::prelude::*,
    anchor_spl::token_interface::{
        self, Burn, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

#[derive(Accounts)]
pub struct DepositOrWithdraw<'info> {
    /// The key of the user that owns the assets
    pub owner: Signer<'info>,

    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    /// The Owner's token account that holds the assets
    pub owner_asset_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = owner_shares_account.mint == shares_mint.key(),
    )]
    /// The Owner's token account that stores share tokens
    pub owner_shares_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        has_one = vault,
        has_one = shares_mint,
        constraint = lp_vault.asset == asset_mint.key(),
    )]
    pub lp_vault: Box<Account<'info, LpVault>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Mint of the vault asset - required for `TransferChecked`
    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        seeds = [b"global_settings"],
        bump,
    )]
    pub global_settings: Account<'info, GlobalSettings>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> DepositOrWithdraw<'info> {
    pub fn validate(ctx: &Context<DepositOrWithdraw>, amount: u64) -> Result<()> {
        require_gt!(amount, 0, ErrorCode::ZeroAmount);
        require!(
            ctx.accounts.global_settings.can_lp(),
            ErrorCode::UnpermittedIx
        );
        Ok(())
    }

    pub(crate) fn transfer_token_from_owner_to_vault(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.owner_asset_account.to_account_info(),
            mint: self.asset_mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.owner.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.asset_mint.decimals)
    }

    pub(crate) fn transfer_token_from_vault_to_owner(&self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.asset_mint.to_account_info(),
            to: self.owner_asset_account.to_account_info(),
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

    pub(crate) fn mint_shares_to_user(&self, amount: u64) -> Result<()> {
        let cpi_accounts = MintTo {
            mint: self.shares_mint.to_account_info(),
            to: self.owner_shares_account.to_account_info(),
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

    pub(crate) fn burn_shares_from_user(&self, amount: u64) -> Result<()> {
        let cpi_accounts = Burn {
            mint: self.shares_mint.to_account_info(),
            from: self.owner_shares_account.to_account_info(),
            authority: self.owner.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token_interface::burn(cpi_ctx, amount)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        let shares = self
            .lp_vault
            .assets_to_shares(amount, self.shares_mint.supply)?;

        self.transfer_token_from_owner_to_vault(amount)?;
        self.mint_shares_to_user(shares)?;

        self.lp_vault.deposited_assets = self
            .lp_vault
            .deposited_assets
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticOverflow)?;

        emit!(DepositEvent {
            sender: self.owner.key(),
            owner: self.owner_shares_account.owner.key(),
            assets: amount,
            shares,
        });

        Ok(())
    }
}
