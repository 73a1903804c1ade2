//! Service layer for basket-pickup records.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Maps storage failures onto `ServiceError` kinds the HTTP layer understands.

pub mod errors;
pub mod user_record;
#[cfg(test)]
pub mod test_support;
