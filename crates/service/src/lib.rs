//! Service layer providing business-oriented operations on top of models.
//! - Enforces ownership checks and duplicate-subscription prevention.
//! - Runs multi-step writes inside a single transaction.
//! - Provides the domain error taxonomy recovered at the API boundary.

pub mod errors;
pub mod subscription_service;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
