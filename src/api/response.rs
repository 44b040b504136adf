use serde::{Deserialize, Serialize};

use crate::service::{ApiKind, Item, Page, PagingAndSorting, ServiceError, ServiceResult, CATEGORY_ID_FOR_ALL};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextResponse {
    pub metadata: ResponseMetadata,
    pub results: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub api: ApiKind,
    pub context: ResponseContext,
    pub result_set: ResultSet,
    pub page: PageInfo,
    pub links: Links,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseContext {
    #[serde(rename = "type")]
    pub context_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub count: usize,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub current: u32,
    pub size: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Turns a page of lookup results into the API response. One `build` call
/// per request; the named methods fix the api kind for each endpoint.
pub trait ResponseBuilder: Send + Sync {
    fn build(
        &self,
        api: ApiKind,
        page: Page<Item>,
        id: &str,
        paging: &PagingAndSorting,
    ) -> ServiceResult<ContextResponse>;

    fn most_popular(&self, page: Page<Item>, category_id: &str, paging: &PagingAndSorting) -> ServiceResult<ContextResponse> {
        self.build(ApiKind::MostPopular, page, category_id, paging)
    }

    fn recently_viewed(&self, page: Page<Item>, context_id: &str, paging: &PagingAndSorting) -> ServiceResult<ContextResponse> {
        self.build(ApiKind::RecentlyViewed, page, context_id, paging)
    }

    fn recommended_items(&self, page: Page<Item>, context_id: &str, paging: &PagingAndSorting) -> ServiceResult<ContextResponse> {
        self.build(ApiKind::Recommended, page, context_id, paging)
    }

    fn for_item(
        &self,
        page: Page<Item>,
        item_id: &str,
        paging: &PagingAndSorting,
        api: ApiKind,
    ) -> ServiceResult<ContextResponse> {
        self.build(api, page, item_id, paging)
    }
}

/// Default builder: JSON metadata with self/next/prev links rooted at `base_url`.
#[derive(Debug, Clone, Default)]
pub struct ContextResponseBuilder {
    base_url: String,
}

impl ContextResponseBuilder {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.unwrap_or_default().trim_end_matches('/').to_string(),
        }
    }

    fn link(&self, api: ApiKind, id: &str, page: u32, paging: &PagingAndSorting) -> String {
        let mut url = format!(
            "{}{}?page={}&pageSize={}",
            self.base_url,
            api_path(api, id),
            page,
            paging.page_size
        );
        if let Some(sort_by) = paging.sort_by {
            url.push_str("&sortBy=");
            url.push_str(sort_by.as_str());
        }
        if let Some(order) = paging.sort_order {
            url.push_str("&sortOrder=");
            url.push_str(order.as_str());
        }
        url
    }
}

impl ResponseBuilder for ContextResponseBuilder {
    fn build(
        &self,
        api: ApiKind,
        page: Page<Item>,
        id: &str,
        paging: &PagingAndSorting,
    ) -> ServiceResult<ContextResponse> {
        let total_pages = page.total_pages();
        if page.total > 0 && page.number > total_pages {
            return Err(ServiceError::PageOutOfRange {
                page: page.number,
                last: total_pages,
            });
        }

        let links = Links {
            self_link: self.link(api, id, page.number, paging),
            next: page
                .has_next()
                .then(|| self.link(api, id, page.number + 1, paging)),
            prev: page
                .has_previous()
                .then(|| self.link(api, id, page.number - 1, paging)),
        };

        Ok(ContextResponse {
            metadata: ResponseMetadata {
                api,
                context: ResponseContext {
                    context_type: context_type(api).to_string(),
                    id: id.to_string(),
                },
                result_set: ResultSet {
                    count: page.items.len(),
                    total: page.total,
                },
                page: PageInfo {
                    current: page.number,
                    size: page.size,
                    total: total_pages,
                },
                links,
            },
            results: page.items,
        })
    }
}

fn context_type(api: ApiKind) -> &'static str {
    match api {
        ApiKind::MostPopular => "category",
        ApiKind::RecentlyViewed | ApiKind::Recommended => "context",
        ApiKind::AlsoViewed | ApiKind::AlsoBought => "item",
    }
}

/// Route path that serves `api` for `id`.
pub fn api_path(api: ApiKind, id: &str) -> String {
    let id = urlencoding::encode(id);
    match api {
        ApiKind::MostPopular if id == CATEGORY_ID_FOR_ALL => "/categories/items/popular".to_string(),
        ApiKind::MostPopular => format!("/category/{}/items/popular", id),
        ApiKind::RecentlyViewed => format!("/context/{}/items/viewed", id),
        ApiKind::Recommended => format!("/context/{}/items/recommended", id),
        ApiKind::AlsoViewed => format!("/item/{}/alsoviewed", id),
        ApiKind::AlsoBought => format!("/item/{}/alsobought", id),
    }
}
