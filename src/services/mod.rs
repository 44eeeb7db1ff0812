pub mod export;
pub mod processing;
pub mod validation;
