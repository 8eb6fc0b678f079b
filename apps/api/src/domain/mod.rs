// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod category;
pub mod errors;
pub mod note;
pub mod repositories;
pub mod user;

pub use errors::DomainError;
