//! Static reference data for substitute values
//!
//! Pools are process-wide and never mutated, so they are shared freely
//! between concurrent anonymization calls.

/// Candidate first names
pub static FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "Robert", "Emily", "David", "Lisa",
];

/// Candidate last names
pub static LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
];

/// Candidate middle initials
pub static MIDDLE_INITIALS: &[&str] = &["A", "B", "C", "D", "E"];

/// Candidate creditor and requesting-party organization names
pub static ORGANIZATION_NAMES: &[&str] = &[
    "ABC BANK",
    "XYZ CREDIT UNION",
    "GENERIC MORTGAGE CO",
    "SAMPLE FINANCIAL",
    "ANONYMOUS LENDER",
    "TEST BANK",
    "DEMO CREDIT CORP",
    "PLACEHOLDER FINANCE",
];

/// Street name appended to the random house number
pub const STREET_NAME: &str = "Main Street";
/// Substitute city
pub const CITY: &str = "Anytown";
/// Substitute state code
pub const STATE: &str = "CA";
/// Substitute postal code
pub const POSTAL_CODE: &str = "90001";
/// Domain used when generating e-mail addresses
pub const EMAIL_DOMAIN: &str = "example.com";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_are_populated() {
        assert!(!FIRST_NAMES.is_empty());
        assert!(!LAST_NAMES.is_empty());
        assert!(!MIDDLE_INITIALS.is_empty());
        assert_eq!(ORGANIZATION_NAMES.len(), 8);
    }

    #[test]
    fn test_middle_initials_are_single_letters() {
        assert!(MIDDLE_INITIALS
            .iter()
            .all(|m| m.len() == 1 && m.chars().all(|c| c.is_ascii_uppercase())));
    }
}
