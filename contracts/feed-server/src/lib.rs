pub mod condition;
pub mod contract;
pub mod error;
pub mod execute;
pub mod helpers;
pub mod msg;
pub mod oev;
pub mod query;
pub mod state;
pub mod verify;


pub use crate::error::ContractError;
