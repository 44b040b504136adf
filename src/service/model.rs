use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category id that selects the most popular items across all categories.
pub const CATEGORY_ID_FOR_ALL: &str = "ALL";

/// How much product detail a lookup fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductInfo {
    #[default]
    Minimal,
    Intermediate,
}

impl ProductInfo {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductInfo::Minimal => "minimal",
            ProductInfo::Intermediate => "intermediate",
        }
    }
}

impl FromStr for ProductInfo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("minimal") {
            Ok(ProductInfo::Minimal)
        } else if s.eq_ignore_ascii_case("intermediate") {
            Ok(ProductInfo::Intermediate)
        } else {
            Err(format!("unknown productInfo value: {}", s))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKind {
    MostPopular,
    RecentlyViewed,
    Recommended,
    AlsoViewed,
    AlsoBought,
}

impl ApiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKind::MostPopular => "mostPopular",
            ApiKind::RecentlyViewed => "recentlyViewed",
            ApiKind::Recommended => "recommended",
            ApiKind::AlsoViewed => "alsoViewed",
            ApiKind::AlsoBought => "alsoBought",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Relevance,
    Name,
    Price,
    CustomerRating,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Relevance => "relevance",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::CustomerRating => "customerRating",
        }
    }

    /// Direction used when the request names a field but no order.
    pub fn default_order(&self) -> SortOrder {
        match self {
            SortField::Relevance | SortField::CustomerRating => SortOrder::Descending,
            SortField::Name | SortField::Price => SortOrder::Ascending,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" | "rank" => Ok(SortField::Relevance),
            "name" => Ok(SortField::Name),
            "price" | "saleprice" => Ok(SortField::Price),
            "customerrating" => Ok(SortField::CustomerRating),
            _ => Err(format!("unknown sortBy value: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("unknown sortOrder value: {}", s)),
        }
    }
}

/// Page number, page size and ordering requested by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingAndSorting {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl PagingAndSorting {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_by.unwrap_or_default()
    }

    pub fn effective_order(&self) -> SortOrder {
        self.sort_order
            .unwrap_or_else(|| self.sort_field().default_order())
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_review_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_review_count: Option<i64>,
}

impl Item {
    pub fn minimal(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            url: None,
            image: None,
            short_description: None,
            manufacturer: None,
            regular_price: None,
            sale_price: None,
            customer_review_average: None,
            customer_review_count: None,
        }
    }
}

/// One page of lookup results plus what is needed to page through the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of results across all pages.
    pub total: u64,
    /// 1-based page number.
    pub number: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, paging: &PagingAndSorting) -> Self {
        Self {
            items,
            total,
            number: paging.page,
            size: paging.page_size,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.size)) as u32
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Page {page} is out of range, last page is {last}")]
    PageOutOfRange { page: u32, last: u32 },
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
