use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{
    self, ApiServices, CategoryApiController, ContextApiController, ItemApiController,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub category_api: Arc<CategoryApiController>,
    pub context_api: Arc<ContextApiController>,
    pub item_api: Arc<ItemApiController>,
}

impl AppState {
    pub fn new(config: Config, services: ApiServices) -> Self {
        Self {
            config: Arc::new(config),
            category_api: Arc::new(CategoryApiController::new(services.clone())),
            context_api: Arc::new(ContextApiController::new(services.clone())),
            item_api: Arc::new(ItemApiController::new(services)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let category_routes = Router::new()
        .route(
            "/categories/items/popular",
            get(api::get_most_popular_items_for_all_categories),
        )
        .route(
            "/category/:category_id/items/popular",
            get(api::get_most_popular_items_for_category),
        );

    let context_routes = Router::new()
        .route(
            "/context/:id/items/viewed",
            get(api::get_recent_items_for_context),
        )
        .route(
            "/context/:id/items/recommended",
            get(api::get_recommended_items_for_context),
        );

    let item_routes = Router::new()
        .route(
            "/item/:id/alsoviewed",
            get(api::get_also_viewed_items_for_item),
        )
        .route(
            "/item/:id/alsobought",
            get(api::get_also_bought_items_for_item),
        );

    Router::new()
        .merge(category_routes)
        .merge(context_routes)
        .merge(item_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // CORS preflight for unknown paths; headers come from CorsLayer.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
