use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Unpermitted action by authority")]
    InvalidPermissions, // 6000
    #[msg("Unpermitted instructions in tx")]
    UnpermittedIx, // 6001
    #[msg("Amount must be greater than zero")]
    ZeroAmount, // 6002
    #[msg("Value out of accepted range")]
    InvalidValue, // 6003
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow, // 6004
    #[msg("Arithmetic underflow")]
    ArithmeticUnderflow, // 6005
    #[msg("Borrow index moved behind a recorded checkpoint")]
    StaleIndex, // 6006
    #[msg("Vault borrow limit exceeded")]
    MaxBorrowExceeded, // 6007
    #[msg("Repay exceeds outstanding principal")]
    MaxRepayExceeded, // 6008
    #[msg("Borrower has fewer shares posted than required")]
    InsufficientShares, // 6009
    #[msg("Principal exceeds what the posted collateral supports")]
    MaxLeverageExceeded, // 6010
}
