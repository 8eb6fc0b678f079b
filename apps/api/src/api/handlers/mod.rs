pub mod auth;
pub mod categories;
pub mod notes;
pub mod users;
