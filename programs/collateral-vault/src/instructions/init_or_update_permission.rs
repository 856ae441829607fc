use {
    crate::state::{AuthorityStatus, Permission},
    anchor_lang::prelude::*,
};

#[derive(Accounts)]
pub struct InitOrUpdatePermission<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    pub authority: Signer<'info>,

    #[account(
        has_one = authority,
        constraint = super_admin_permission.status == AuthorityStatus::Active,
        constraint = super_admin_permission.is_super_authority,
        seeds = [b"super_admin"],
        bump,
    )]
    pub super_admin_permission: Account<'info, Permission>,

    /// CHECK: The key being granted permissions
    pub new_authority: AccountInfo<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        seeds = [b"admin", new_authority.key().as_ref()],
        bump,
        space = 8 + std::mem::size_of::<Permission>(),
    )]
    pub permission: Account<'info, Permission>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitOrUpdatePermissionArgs {
    pub permissions: u8,
}

impl<'info> InitOrUpdatePermission<'info> {
    pub fn init_or_update_permission(&mut self, args: &InitOrUpdatePermissionArgs) -> Result<()> {
        self.permission.set_inner(Permission {
            authority: self.new_authority.key(),
            status: AuthorityStatus::Active,
            is_super_authority: false,
            permissions_map: args.permissions,
        });

        Ok(())
    }
}
