//! Most popular items, per category or across all categories.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use super::error::{ApiResult, IdField};
use super::response::ContextResponse;
use super::services::{request_options, ApiServices};
use super::validate::require_valid;
use crate::server::AppState;
use crate::service::{PagingAndSorting, ProductInfo, CATEGORY_ID_FOR_ALL};
use crate::util::QueryParams;

pub struct CategoryApiController {
    services: ApiServices,
}

impl CategoryApiController {
    pub fn new(services: ApiServices) -> Self {
        Self { services }
    }

    /// Most popular items across all categories, looked up under the `ALL`
    /// category id.
    pub async fn most_popular_for_all_categories(
        &self,
        paging: &PagingAndSorting,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        info!("Category Id = {}", CATEGORY_ID_FOR_ALL);
        self.most_popular_items(paging, CATEGORY_ID_FOR_ALL, product_info).await
    }

    pub async fn most_popular_for_category(
        &self,
        paging: &PagingAndSorting,
        category_id: &str,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        info!("Category Id = {}", category_id);
        self.most_popular_items(paging, category_id, product_info).await
    }

    async fn most_popular_items(
        &self,
        paging: &PagingAndSorting,
        category_id: &str,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        require_valid(self.services.validator.as_ref(), IdField::Category, category_id)?;

        let page = self
            .services
            .items
            .find_most_popular_items_for_category(paging, category_id, product_info)
            .await?;

        Ok(self.services.responses.most_popular(page, category_id, paging)?)
    }
}

pub async fn get_most_popular_items_for_all_categories(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let response = state
        .category_api
        .most_popular_for_all_categories(&paging, product_info)
        .await?;
    Ok(Json(response))
}

pub async fn get_most_popular_items_for_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let response = state
        .category_api
        .most_popular_for_category(&paging, &category_id, product_info)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::api::testing::{services_with, RecordingItemService};
    use crate::service::ApiKind;

    #[tokio::test]
    async fn test_all_categories_uses_sentinel() {
        let items = RecordingItemService::new();
        let controller = CategoryApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        let response = controller
            .most_popular_for_all_categories(&paging, ProductInfo::Intermediate)
            .await
            .unwrap();

        let calls = items.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "most_popular");
        assert_eq!(calls[0].id, CATEGORY_ID_FOR_ALL);
        assert_eq!(calls[0].product_info, ProductInfo::Intermediate);
        assert_eq!(response.metadata.api, ApiKind::MostPopular);
        assert_eq!(response.metadata.context.id, CATEGORY_ID_FOR_ALL);
    }

    #[tokio::test]
    async fn test_category_lookup() {
        let items = RecordingItemService::new();
        let controller = CategoryApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        let response = controller
            .most_popular_for_category(&paging, "12345", ProductInfo::Minimal)
            .await
            .unwrap();

        let calls = items.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "12345");
        assert_eq!(calls[0].product_info, ProductInfo::Minimal);
        assert_eq!(calls[0].paging, paging);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.metadata.context.context_type, "category");
    }

    #[tokio::test]
    async fn test_invalid_category_never_reaches_service() {
        let items = RecordingItemService::new();
        let controller = CategoryApiController::new(services_with(items.clone()));
        let paging = PagingAndSorting::new(1, 10);

        for bad in ["", "bad id", "../etc"] {
            let err = controller
                .most_popular_for_category(&paging, bad, ProductInfo::Minimal)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::InvalidIdentifier { field: IdField::Category, .. }));
        }
        assert!(items.calls().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let items = RecordingItemService::unavailable();
        let controller = CategoryApiController::new(services_with(items.clone()));

        let err = controller
            .most_popular_for_category(&PagingAndSorting::new(1, 10), "12345", ProductInfo::Minimal)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Service(crate::service::ServiceError::Unavailable(_))));
        assert_eq!(items.calls().len(), 1);
    }
}
