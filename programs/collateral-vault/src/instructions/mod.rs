pub mod accrue_and_settle;
pub mod accrue_interest;
pub mod close_borrow;
pub mod collateral_deposit;
pub mod collateral_withdraw;
pub mod deposit;
pub mod donate;
pub mod init_debt_controller;
pub mod init_global_settings;
pub mod init_lp_vault;
pub mod init_or_update_permission;
pub mod open_borrow;
pub mod redeem;
pub mod remove_permission;
pub mod set_max_apy;
pub mod set_max_leverage;
pub mod settle_interest;
pub mod update_vault_max_borrow;
pub mod withdraw;

pub use accrue_and_settle::*;
pub use accrue_interest::*;
pub use close_borrow::*;
pub use collateral_deposit::*;
pub use collateral_withdraw::*;
pub use deposit::*;
pub use donate::*;
pub use init_debt_controller::*;
pub use init_global_settings::*;
pub use init_lp_vault::*;
pub use init_or_update_permission::*;
pub use open_borrow::*;
pub use redeem::*;
pub use remove_permission::*;
pub use set_max_apy::*;
pub use set_max_leverage::*;
pub use settle_interest::*;
pub use update_vault_max_borrow::*;
pub use withdraw::*;
