use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::handlers::{auth, categories, notes, users};
use crate::api::middleware::require_bearer;
use crate::api::state::AppState;

/// Builds the application router
///
/// Registration, login, user creation and the health check are public.
/// Every other route sits behind the bearer-token gate.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(auth::health_check))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/user", post(users::create_user));

    let protected = Router::new()
        // User routes
        .route(
            "/api/v1/user/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Category routes
        .route("/api/v1/category", post(categories::create_category))
        .route(
            "/api/v1/category/:category_id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/api/v1/category/user/:user_id",
            get(categories::get_categories_by_user),
        )
        // Note routes
        .route("/api/v1/note", post(notes::create_note))
        .route(
            "/api/v1/note/:user_id",
            get(notes::get_notes_by_user).delete(notes::delete_all_notes),
        )
        .route(
            "/api/v1/note/:user_id/:note_id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    public.merge(protected).with_state(state)
}
