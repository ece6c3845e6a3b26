use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating partner business codes
    /// Alphanumeric segments optionally joined by single hyphens
    /// - Valid: "0101234567", "0101234567-001", "HCM-SPA-22"
    /// - Invalid: "-0101", "0101-", "01--01", "01 01", "01_01"
    pub static ref BUSINESS_CODE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap();
}
