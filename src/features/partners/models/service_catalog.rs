use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Top-level business type of a partner, matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "service_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    PetCare,
    VeterinaryCare,
}

impl ServiceCategory {
    /// Fixed catalog of service types a partner of this category offers by default
    pub fn default_services(self) -> &'static [ServiceType] {
        match self {
            ServiceCategory::PetCare => &[
                ServiceType::PetBoarding,
                ServiceType::PetSpa,
                ServiceType::PetGrooming,
                ServiceType::PetWalking,
            ],
            ServiceCategory::VeterinaryCare => &[
                ServiceType::VeterinaryExamination,
                ServiceType::Vaccination,
                ServiceType::Surgery,
                ServiceType::RegularCheckup,
            ],
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceCategory::PetCare => write!(f, "PET_CARE"),
            ServiceCategory::VeterinaryCare => write!(f, "VETERINARY_CARE"),
        }
    }
}

/// A specific offering a partner can provide, matching database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "service_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    PetBoarding,
    PetSpa,
    PetGrooming,
    PetWalking,
    VeterinaryExamination,
    Vaccination,
    Surgery,
    RegularCheckup,
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceType::PetBoarding => write!(f, "PET_BOARDING"),
            ServiceType::PetSpa => write!(f, "PET_SPA"),
            ServiceType::PetGrooming => write!(f, "PET_GROOMING"),
            ServiceType::PetWalking => write!(f, "PET_WALKING"),
            ServiceType::VeterinaryExamination => write!(f, "VETERINARY_EXAMINATION"),
            ServiceType::Vaccination => write!(f, "VACCINATION"),
            ServiceType::Surgery => write!(f, "SURGERY"),
            ServiceType::RegularCheckup => write!(f, "REGULAR_CHECKUP"),
        }
    }
}
