//! Pet-care and veterinary partners.
//!
//! A partner is a business owned by exactly one user account. It carries a
//! moderation status, an open/closed flag gated by operating hours, and a
//! set of offered services seeded from its category.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/partners` | Onboard partner |
//! | GET | `/api/partners` | List partners (filters: status, serviceCategory, isOpen) |
//! | GET | `/api/partners/{id}` | Get partner |
//! | PATCH | `/api/partners/{id}` | Update profile |
//! | DELETE | `/api/partners/{id}` | Delete partner |
//! | GET | `/api/users/{user_id}/partner` | Partner owned by a user |
//! | PATCH | `/api/partners/{id}/status` | Moderation decision |
//! | PATCH | `/api/partners/{id}/rating` | Aggregated rating |
//! | POST | `/api/partners/{id}/close` | Close early |
//! | POST | `/api/partners/{id}/reopen` | Reopen |
//! | POST | `/api/partners/{id}/availability/refresh` | Re-check operating hours |
//! | POST | `/api/partners/{id}/services/derive` | Add category services |
//! | POST | `/api/partners/{id}/services` | Add extra services |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgPartnerRepository;
pub use services::PartnerService;
