//! SeaORM entities.

pub mod blog;
pub mod comment;
pub mod user;
