pub mod clock;
pub mod constants;
pub mod types;
pub mod validation;
