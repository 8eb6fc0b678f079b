use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::Repositories;
use crate::services::{AuthService, CategoryService, NoteService, TokenSettings, UserService};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub categories: Arc<CategoryService>,
    pub notes: Arc<NoteService>,
}

impl AppState {
    /// Wires the services over a set of repositories
    pub fn new(repositories: Repositories, config: &AppConfig) -> Self {
        let tokens = TokenSettings {
            secret: config.jwt_secret.clone(),
            expiry_hours: config.jwt_expiry_hours,
        };

        Self {
            auth: Arc::new(AuthService::new(
                repositories.users.clone(),
                tokens,
                config.bcrypt_cost,
            )),
            users: Arc::new(UserService::new(repositories.users, config.bcrypt_cost)),
            categories: Arc::new(CategoryService::new(repositories.categories)),
            notes: Arc::new(NoteService::new(repositories.notes)),
        }
    }
}
