use anchor_lang::prelude::*;

#[event]
pub struct Deposit {
    pub sender: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

#[event]
pub struct Withdraw {
    pub sender: Pubkey,
    pub receiver: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

#[event]
pub struct Donate {
    pub source: Pubkey,
    pub vault: Pubkey,
    pub token: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CollateralDeposit {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

#[event]
pub struct CollateralWithdraw {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

#[event]
pub struct BorrowOpened {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub amount: u64,
    pub net_borrows: u64,
}

#[event]
pub struct BorrowClosed {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub amount: u64,
    pub net_borrows: u64,
}

#[event]
pub struct InterestAccrued {
    pub lp_vault: Pubkey,
    pub borrow_index: u128,
    pub interest_delta: u64,
}

/// Outcome record of a settlement pass over one borrower.
#[event]
pub struct InterestSettled {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub collected: u64,
    pub remaining_owed: u64,
    pub new_checkpoint: u128,
}

#[event]
pub struct DebtWrittenOff {
    pub trader: Pubkey,
    pub lp_vault: Pubkey,
    pub amount: u64,
}
