//! Keepnote API Library
//!
//! Notes, categories and users behind JWT-authenticated REST endpoints.
//! Notes are kept in one document per user (the owner's bucket) and every
//! protected operation is checked against the caller's own identity.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
