/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// PARTNER CONSTANTS
// =============================================================================

/// Rating assigned to a freshly onboarded partner
pub const DEFAULT_AVERAGE_RATING: f64 = 0.0;
