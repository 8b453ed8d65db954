//! Flat launch parameters ↔ LTI 1.3 claim sets.

pub mod envelope;
pub mod formatter;
pub mod mapping;
pub mod vocab;

pub use envelope::LaunchClaims;
pub use formatter::PayloadFormatter;
pub use mapping::{ClaimGroup, ClaimMapping, ClaimMappingTable, ClaimType, STANDARD_CLAIM_MAPPING};
