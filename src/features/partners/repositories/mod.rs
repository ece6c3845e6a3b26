#[cfg(test)]
pub mod memory;
mod partner_repository;

pub use partner_repository::{PartnerRepository, PgPartnerRepository};
