//! "Customers also viewed" and "customers also bought" for a single item.

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
use crate::service::{ApiKind, PagingAndSorting, ProductInfo};
use crate::util::QueryParams;

pub struct ItemApiController {
    services: ApiServices,
}

impl ItemApiController {
    pub fn new(services: ApiServices) -> Self {
        Self { services }
    }

    pub async fn also_viewed_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        info!("Getting item_id from URL - itemId = {}", item_id);
        require_valid(self.services.validator.as_ref(), IdField::Item, item_id)?;

        let page = self
            .services
            .items
            .find_also_viewed_items_for_item(paging, item_id, product_info, ApiKind::AlsoViewed)
            .await?;

        Ok(self
            .services
            .responses
            .for_item(page, item_id, paging, ApiKind::AlsoViewed)?)
    }

    pub async fn also_bought_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
    ) -> ApiResult<ContextResponse> {
        info!("Getting item_id from URL - itemId = {}", item_id);
        require_valid(self.services.validator.as_ref(), IdField::Item, item_id)?;

        let page = self
            .services
            .items
            .find_also_bought_items_for_item(paging, item_id, product_info, ApiKind::AlsoBought)
            .await?;

        Ok(self
            .services
            .responses
            .for_item(page, item_id, paging, ApiKind::AlsoBought)?)
    }
}

pub async fn get_also_viewed_items_for_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let response = state
        .item_api
        .also_viewed_items_for_item(&paging, &item_id, product_info)
        .await?;
    Ok(Json(response))
}

pub async fn get_also_bought_items_for_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<ContextResponse>> {
    let (paging, product_info) = request_options(&state.config.api, &params)?;
    let response = state
        .item_api
        .also_bought_items_for_item(&paging, &item_id, product_info)
        .await?;
    Ok(Json(response))
}
