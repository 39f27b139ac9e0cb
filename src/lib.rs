pub mod accounting;
pub mod base;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod oracle;
pub mod submit;
pub mod vesting;
