//! Recently viewed and recommended items for a browsing context.
//!
//! The context id comes from the path. A path id of `current` means "the
//! caller's own context" and is replaced by the `context_id` cookie when the
//! cookie carries a real value.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use super::error::{ApiResult, IdField};
use super::params::cookie_value;
use super::response::ContextResponse;
use super::services::{request_options, ApiServices};
use super::validate::require_valid;
use crate::server::AppState;
use crate::service::{PagingAndSorting, ProductInfo};
use crate::util::QueryParams;

pub const COOKIE_PATH_VARIABLE: &str = "current";
/// Cookie value that stands for "no context".
pub const NULL_COOKIE: &str = "null";

/// Effective context id for a request.
pub fn resolve_context_id<'a>(path_id: &'a str, cookie_id: Option<&'a str>) -> &'a str {
    match cookie_id {
        Some(cookie) if path_id == COOKIE_PATH_VARIABLE && cookie != NULL_COOKIE => cookie,
        _ => path_id,
    }
}

pub struct ContextApiController {
    services: ApiServices,
}

impl ContextApiController {
    pub fn new(services: ApiServices) -> Self {
        Self { services }
    }

    fn context_id<'a>(&self, path_id: &'a str, cookie_id: Option<&'a str>) -> ApiResult<&'a str> {
        info!("Getting context_id from URL - context_id = {}", path_id);
        let context_id = resolve_context_id(path_id, cookie_id);
        require_valid(self.services.validator.as_ref(), IdField::Context, context_id)?;
        Ok(context_id)
    }

    pub async fn recent_items_for_context(
        &self,
        paging: &PagingAndSorting,
        path_id: &str,
        cookie_id: Option<&str>,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        let context_id = self.context_id(path_id, cookie_id)?;

        let page = self
            .services
            .items
            .find_recently_viewed_items_for_context_id(paging, context_id, product_info)
            .await?;

        Ok(self.services.responses.recently_viewed(page, context_id, paging)?)
    }

    pub async fn recommended_items_for_context(
        &self,
        paging: &PagingAndSorting,
        path_id: &str,
        cookie_id: Option<&str>,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        let context_id = self.context_id(path_id, cookie_id)?;

        let page = self
            .services
            .items
            .find_recommended_items_for_context_id(paging, context_id, product_info)
            .await?;

        Ok(self.services.responses.recommended_items(page, context_id, paging)?)
    }
}

pub async fn get_recent_items_for_context(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
    headers: HeaderMap,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let cookie = cookie_value(&headers, &state.config.api.context_cookie);
    let response = state
        .context_api
        .recent_items_for_context(&paging, &id, cookie, product_info)
        .await?;
    Ok(Json(response))
}

pub async fn get_recommended_items_for_context(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<QueryParams>,
    headers: HeaderMap,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let cookie = cookie_value(&headers, &state.config.api.context_cookie);
    let response = state
        .context_api
        .recommended_items_for_context(&paging, &id, cookie, product_info)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::api::testing::{services_with, RecordingItemService};
    use crate::service::ApiKind;

    #[test]
    fn test_resolve_context_id() {
        assert_eq!(resolve_context_id("current", Some("abc123")), "abc123");
        assert_eq!(resolve_context_id("current", Some("null")), "current");
        assert_eq!(resolve_context_id("current", None), "current");
        assert_eq!(resolve_context_id("xyz789", Some("abc123")), "xyz789");
        assert_eq!(resolve_context_id("CURRENT", Some("abc123")), "CURRENT");
    }

    #[tokio::test]
    async fn test_recent_items_from_cookie() {
        let items = RecordingItemService::new();
        let controller = ContextApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        let response = controller
            .recent_items_for_context(&paging, "current", Some("abc123"), ProductInfo::Minimal)
            .await
            .unwrap();

        let calls = items.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "recently_viewed");
        assert_eq!(calls[0].id, "abc123");
        assert_eq!(response.metadata.api, ApiKind::RecentlyViewed);
        assert_eq!(response.metadata.context.id, "abc123");
    }

    #[tokio::test]
    async fn test_recommended_items_from_path() {
        let items = RecordingItemService::new();
        let controller = ContextApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        let response = controller
            .recommended_items_for_context(&paging, "xyz789", Some("abc123"), ProductInfo::Intermediate)
            .await
            .unwrap();

        let calls = items.calls();
        assert_eq!(calls[0].method, "recommended");
        assert_eq!(calls[0].id, "xyz789");
        assert_eq!(calls[0].product_info, ProductInfo::Intermediate);
        assert_eq!(response.metadata.api, ApiKind::Recommended);
    }

    #[tokio::test]
    async fn test_invalid_context_never_reaches_service() {
        let items = RecordingItemService::new();
        let controller = ContextApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        let err = controller
            .recent_items_for_context(&paging, "", None, ProductInfo::Minimal)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier { field: IdField::Context, .. }));

        // A malformed cookie is validated like a path id.
        let err = controller
            .recommended_items_for_context(&paging, "current", Some("a b"), ProductInfo::Minimal)
            .await
            .unwrap_err();
        match err {
            ApiError::InvalidIdentifier { value, .. } => assert_eq!(value, "a b"),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(items.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_requests_make_identical_calls() {
        let items = RecordingItemService::new();
        let controller = ContextApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 5);

        for _ in 0..3 {
            controller
                .recent_items_for_context(&paging, "abc123", None, ProductInfo::Minimal)
                .await
                .unwrap();
        }
        let calls = items.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| *c == calls[0]));
    }
}
