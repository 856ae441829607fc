pub mod borrower_account;
pub mod debt_controller;
pub mod global_settings;
pub mod lp_vault;
pub mod permission;

pub use borrower_account::*;
pub use debt_controller::*;
pub use global_settings::*;
pub use lp_vault::*;
pub use permission::*;
