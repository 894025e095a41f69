use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::articles::create_article::create_article;
use super::handlers::articles::delete_article::delete_article;
use super::handlers::articles::get_article::get_article;
use super::handlers::articles::list_articles::list_articles;
use super::handlers::articles::transfer_article::transfer_article;
use super::handlers::articles::update_article::update_article;
use super::handlers::login::login;
use super::handlers::users::create_user::create_user;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_current_user::get_current_user;
use super::handlers::users::get_user::get_user;
use super::handlers::users::list_users::list_users;
use super::handlers::users::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    article_service: Arc<dyn ArticleServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/users/signup", post(create_user))
        .route("/users/login", post(login))
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user))
        .route("/articles", get(list_articles))
        .route("/articles/:article_id", get(get_article));

    let protected_routes = Router::new()
        .route("/users/me", get(get_current_user))
        .route("/users/:user_id", put(update_user).delete(delete_user))
        .route("/articles", post(create_article))
        .route(
            "/articles/:article_id",
            put(update_article).delete(delete_article),
        )
        .route("/articles/:article_id/owner", put(transfer_article))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
