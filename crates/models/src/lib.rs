//! Data access layer: SeaORM entities plus the query primitives the
//! service layer builds on. Helpers are generic over `ConnectionTrait`
//! so callers can run them inside a transaction.
pub mod db;
pub mod errors;
pub mod subscription;
pub mod user;
