// Authentication primitives: token signing and credential hashing

pub mod jwt;
pub mod password;

pub use jwt::Claims;
