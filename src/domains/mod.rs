//! Domains module containing business logic organized by bounded contexts.

pub mod instrument;
pub mod registration;
pub mod tools;
