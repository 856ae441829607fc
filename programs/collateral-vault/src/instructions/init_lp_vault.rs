use {
    crate::{
        constants::INDEX_SCALE,
        error::ErrorCode,
        state::{LpVault, Permission},
    },
    anchor_lang::prelude::*,
    anchor_spl::{
        associated_token::AssociatedToken,
        token_interface::{Mint, TokenAccount, TokenInterface},
    },
};

#[derive(Accounts)]
pub struct InitLpVault<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The key that has permission to init the vault
    pub authority: Signer<'info>,

    #[account(has_one = authority)]
    pub permission: Account<'info, Permission>,

    #[account(
        init,
        payer = payer,
        seeds = [b"lp_vault", asset_mint.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<LpVault>(),
    )]
    pub lp_vault: Box<Account<'info, LpVault>>,

    pub asset_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = lp_vault,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [lp_vault.key().as_ref(), asset_mint.key().as_ref()],
        bump,
        mint::authority = lp_vault,
        mint::decimals = asset_mint.decimals,
        mint::token_program = token_program,
    )]
    pub shares_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault-owned account holding every borrower's collateral shares
    #[account(
        init,
        payer = payer,
        associated_token::mint = shares_mint,
        associated_token::authority = lp_vault,
        associated_token::token_program = token_program,
    )]
    pub shares_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitLpVault<'info> {
    pub fn validate(ctx: &Context<InitLpVault>) -> Result<()> {
        require!(
            ctx.accounts.permission.can_init_vault(),
            ErrorCode::InvalidPermissions
        );
        Ok(())
    }

    pub fn init_lp_vault(&mut self, max_borrow: u64, bumps: &InitLpVaultBumps) -> Result<()> {
        self.lp_vault.set_inner(LpVault {
            bump: bumps.lp_vault,
            asset: self.asset_mint.key(),
            vault: self.vault.key(),
            shares_mint: self.shares_mint.key(),
            shares_escrow: self.shares_escrow.key(),
            deposited_assets: 0,
            assets_in_amm: 0,
            unrealized_global_interest: 0,
            borrow_index: INDEX_SCALE,
            last_accrual_timestamp: Clock::get()?.unix_timestamp,
            max_borrow,
        });

        Ok(())
    }
}
