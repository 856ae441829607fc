use {
    crate::{
        constants::APY_DENOMINATOR,
        error::ErrorCode,
        state::{DebtController, Permission},
    },
    anchor_lang::prelude::*,
};

#[derive(Accounts)]
pub struct SetMaxApy<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        has_one = authority,
        seeds = [b"super_admin"],
        bump,
    )]
    pub super_admin_permission: Account<'info, Permission>,

    #[account(
        mut,
        seeds = [b"debt_controller"],
        bump,
    )]
    pub debt_controller: Account<'info, DebtController>,
}

impl<'info> SetMaxApy<'info> {
    pub fn validate(max_apy: u64) -> Result<()> {
        require_gt!(max_apy, 0, ErrorCode::InvalidValue);
        require_gte!(1000 * APY_DENOMINATOR, max_apy, ErrorCode::InvalidValue);
        Ok(())
    }

    pub fn set_max_apy(&mut self, max_apy: u64) -> Result<()> {
        self.debt_controller.max_apy = max_apy;
        Ok(())
    }
}
