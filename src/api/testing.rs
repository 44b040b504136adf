use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::response::ContextResponseBuilder;
use super::services::ApiServices;
use super::validate::RequestParamValidator;
use crate::service::*;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupCall {
    pub method: &'static str,
    pub id: String,
    pub paging: PagingAndSorting,
    pub product_info: ProductInfo,
    pub api: Option<ApiKind>,
}

/// Item service that records every call and answers with two fixed items.
#[derive(Default)]
pub struct RecordingItemService {
    calls: Mutex<Vec<LookupCall>>,
    unavailable: bool,
}

impl RecordingItemService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            unavailable: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<LookupCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        paging: &PagingAndSorting,
        id: &str,
        product_info: ProductInfo,
        api: Option<ApiKind>,
    ) -> ServiceResult<Page<Item>> {
        self.calls.lock().unwrap().push(LookupCall {
            method,
            id: id.to_string(),
            paging: paging.clone(),
            product_info,
            api,
        });
        if self.unavailable {
            return Err(ServiceError::Unavailable("lookup backend down".to_string()));
        }
        let items = vec![Item::minimal("1001", "Walnut Desk"), Item::minimal("1002", "Anvil")];
        Ok(Page::new(items, 2, paging))
    }
}

#[async_trait]
impl ItemService for RecordingItemService {
    async fn find_most_popular_items_for_category(
        &self,
        paging: &PagingAndSorting,
        category_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        self.record("most_popular", paging, category_id, product_info, None)
    }

    async fn find_recently_viewed_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        self.record("recently_viewed", paging, context_id, product_info, None)
    }

    async fn find_recommended_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        self.record("recommended", paging, context_id, product_info, None)
    }

    async fn find_also_viewed_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>> {
        self.record("also_viewed", paging, item_id, product_info, Some(api))
    }

    async fn find_also_bought_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>> {
        self.record("also_bought", paging, item_id, product_info, Some(api))
    }
}

pub fn services_with(items: Arc<RecordingItemService>) -> ApiServices {
    ApiServices::new(
        items,
        Arc::new(ContextResponseBuilder::default()),
        Arc::new(RequestParamValidator),
    )
}
