use async_trait::async_trait;

use super::model::*;

/// Item lookups behind the context API. Implementations are shared
/// between concurrent requests.
#[async_trait]
pub trait ItemService: Send + Sync {
    async fn find_most_popular_items_for_category(
        &self,
        paging: &PagingAndSorting,
        category_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>>;

    async fn find_recently_viewed_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>>;

    async fn find_recommended_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>>;

    async fn find_also_viewed_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>>;

    async fn find_also_bought_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>>;
}
