pub mod account;
pub mod organisation;
