use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod macros;
pub mod settlement;
pub mod state;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("GqSNW7BBZRkU821XJs38azxZNTLsxgtDhzuTkaXYt1NU");

#[program]
pub mod collateral_vault {
    use super::*;

    pub fn init_global_settings(
        ctx: Context<InitGlobalSettings>,
        args: InitGlobalSettingsArgs,
    ) -> Result<()> {
        ctx.accounts.init_global_settings(&args)
    }

    pub fn init_or_update_permission(
        ctx: Context<InitOrUpdatePermission>,
        args: InitOrUpdatePermissionArgs,
    ) -> Result<()> {
        ctx.accounts.init_or_update_permission(&args)
    }

    pub fn remove_permission(ctx: Context<RemovePermission>) -> Result<()> {
        ctx.accounts.remove_permission()
    }

    #[access_control(InitDebtController::validate(&args))]
    pub fn init_debt_controller(
        ctx: Context<InitDebtController>,
        args: InitDebtControllerArgs,
    ) -> Result<()> {
        ctx.accounts.init_debt_controller(&args)
    }

    #[access_control(SetMaxApy::validate(max_apy))]
    pub fn set_max_apy(ctx: Context<SetMaxApy>, max_apy: u64) -> Result<()> {
        ctx.accounts.set_max_apy(max_apy)
    }

    #[access_control(SetMaxLeverage::validate(max_leverage))]
    pub fn set_max_leverage(ctx: Context<SetMaxLeverage>, max_leverage: u64) -> Result<()> {
        ctx.accounts.set_max_leverage(max_leverage)
    }

    #[access_control(InitLpVault::validate(&ctx))]
    pub fn init_lp_vault(ctx: Context<InitLpVault>, max_borrow: u64) -> Result<()> {
        ctx.accounts.init_lp_vault(max_borrow, &ctx.bumps)
    }

    #[access_control(UpdateVaultMaxBorrow::validate(&ctx))]
    pub fn update_vault_max_borrow(
        ctx: Context<UpdateVaultMaxBorrow>,
        max_borrow: u64,
    ) -> Result<()> {
        ctx.accounts.update_vault_max_borrow(max_borrow)
    }

    #[access_control(DepositOrWithdraw::validate(&ctx, amount))]
    pub fn deposit(ctx: Context<DepositOrWithdraw>, amount: u64) -> Result<()> {
        ctx.accounts.deposit(amount)
    }

    #[access_control(DepositOrWithdraw::validate(&ctx, amount))]
    pub fn withdraw(ctx: Context<DepositOrWithdraw>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw(amount)
    }

    #[access_control(DepositOrWithdraw::validate(&ctx, shares_amount))]
    pub fn redeem(ctx: Context<DepositOrWithdraw>, shares_amount: u64) -> Result<()> {
        ctx.accounts.redeem(shares_amount)
    }

    #[access_control(Donate::validate(&ctx, amount))]
    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        ctx.accounts.donate(amount)
    }

    #[access_control(CollateralDepositOrWithdraw::validate(&ctx, amount))]
    pub fn collateral_deposit(
        ctx: Context<CollateralDepositOrWithdraw>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.collateral_deposit(amount, &ctx.bumps)
    }

    #[access_control(CollateralDepositOrWithdraw::validate(&ctx, amount))]
    pub fn collateral_withdraw(
        ctx: Context<CollateralDepositOrWithdraw>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.collateral_withdraw(amount)
    }

    #[access_control(OpenBorrow::validate(&ctx, amount))]
    pub fn open_borrow(ctx: Context<OpenBorrow>, amount: u64) -> Result<()> {
        ctx.accounts.open_borrow(amount, &ctx.bumps)
    }

    #[access_control(CloseBorrow::validate(&ctx, amount))]
    pub fn close_borrow(ctx: Context<CloseBorrow>, amount: u64) -> Result<()> {
        ctx.accounts.close_borrow(amount)
    }

    pub fn settle_interest(ctx: Context<SettleInterest>) -> Result<()> {
        ctx.accounts.settle_interest()
    }

    pub fn accrue_interest(ctx: Context<AccrueInterest>) -> Result<()> {
        ctx.accounts.accrue_interest()
    }
}
