pub mod fees;
pub mod scenarios;
pub mod stage;
pub mod validate;
