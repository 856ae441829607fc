use {
    crate::state::{AuthorityStatus, Permission},
    anchor_lang::prelude::*,
};

/// Revokes a key's grants (vault init, borrow-from-vault) by closing its
/// permission account; the rent refunds to the super admin. The super
/// admin's own permission cannot be closed this way.
#[derive(Accounts)]
pub struct RemovePermission<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        has_one = authority,
        constraint = super_admin_permission.status == AuthorityStatus::Active,
        constraint = super_admin_permission.is_super_authority,
    )]
    pub super_admin_permission: Account<'info, Permission>,

    /// The permission account being revoked
    #[account(
        mut,
        close = authority,
        constraint = !permission.is_super_authority,
    )]
    pub permission: Account<'info, Permission>,
}

impl<'info> RemovePermission<'info> {
    pub fn remove_permission(&mut self) -> Result<()> {
        Ok(())
    }
}
