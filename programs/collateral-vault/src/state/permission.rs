use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Copy, PartialEq)]
#[repr(u8)]
pub enum AuthorityStatus {
    Inactive,
    Active,
}

const INIT_VAULT_PERMISSION: u8 = 0b00000001;
const BORROW_FROM_VAULT_PERMISSION: u8 = 0b00000010;

#[account]
pub struct Permission {
    /// The key that is given these permissions
    pub authority: Pubkey,
    pub status: AuthorityStatus,
    pub is_super_authority: bool,
    pub permissions_map: u8,
}

impl Permission {
    /// True if the authority can grant permissions to other keys
    pub fn can_create_permission(&self) -> bool {
        self.is_super_authority
    }

    /// True if the authority has permission to initialize vaults
    pub fn can_init_vault(&self) -> bool {
        self.permissions_map & INIT_VAULT_PERMISSION == INIT_VAULT_PERMISSION
            || self.is_super_authority
    }

    /// True if the authority may move principal in and out of the vault on
    /// behalf of the position engine
    pub fn can_borrow_from_vault(&self) -> bool {
        self.permissions_map & BORROW_FROM_VAULT_PERMISSION == BORROW_FROM_VAULT_PERMISSION
            || self.is_super_authority
    }
}
