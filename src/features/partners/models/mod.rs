mod partner;
mod service_catalog;

pub use partner::{CreatePartner, PartnerFilter, PartnerRecord, PartnerStatus};
pub use service_catalog::{ServiceCategory, ServiceType};
