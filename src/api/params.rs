use axum::http::{header, HeaderMap};

use super::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::service::{PagingAndSorting, ProductInfo, SortField, SortOrder};
use crate::util::QueryParams;

pub const PROD_INFO_PARAM: &str = "productInfo";
pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const SORT_BY_PARAM: &str = "sortBy";
pub const SORT_ORDER_PARAM: &str = "sortOrder";

/// Reads `productInfo`, defaulting to `minimal`.
pub fn product_info(params: &QueryParams) -> ApiResult<ProductInfo> {
    match params.get(PROD_INFO_PARAM) {
        None => Ok(ProductInfo::default()),
        Some(raw) => raw
            .trim()
            .parse::<ProductInfo>()
            .map_err(ApiError::InvalidParameter),
    }
}

impl PagingAndSorting {
    /// Builds the paging spec from `page`, `pageSize`, `sortBy` and `sortOrder`.
    pub fn from_query(params: &QueryParams, config: &ApiConfig) -> ApiResult<Self> {
        let page = params
            .parse::<u32>(PAGE_PARAM)
            .map_err(|raw| invalid(PAGE_PARAM, &raw))?
            .unwrap_or(1);
        if page == 0 {
            return Err(invalid(PAGE_PARAM, "0"));
        }

        let page_size = params
            .parse::<u32>(PAGE_SIZE_PARAM)
            .map_err(|raw| invalid(PAGE_SIZE_PARAM, &raw))?
            .unwrap_or(config.default_page_size);
        if page_size == 0 || page_size > config.max_page_size {
            return Err(ApiError::InvalidParameter(format!(
                "{} must be between 1 and {}, got {}",
                PAGE_SIZE_PARAM, config.max_page_size, page_size
            )));
        }

        let sort_by = params
            .parse::<SortField>(SORT_BY_PARAM)
            .map_err(|raw| invalid(SORT_BY_PARAM, &raw))?;
        let sort_order = params
            .parse::<SortOrder>(SORT_ORDER_PARAM)
            .map_err(|raw| invalid(SORT_ORDER_PARAM, &raw))?;

        Ok(Self {
            page,
            page_size,
            sort_by,
            sort_order,
        })
    }
}

fn invalid(name: &str, raw: &str) -> ApiError {
    ApiError::InvalidParameter(format!("{} = {}", name, raw))
}

/// Value of the named cookie across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> ApiConfig {
        ApiConfig::default()
    }

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_paging_defaults() {
        let paging = PagingAndSorting::from_query(&query(&[]), &config()).unwrap();
        assert_eq!(paging, PagingAndSorting::new(1, config().default_page_size));
    }

    #[test]
    fn test_paging_from_query() {
        let params = query(&[("page", "3"), ("PageSize", "25"), ("sortBy", "name"), ("sortOrder", "desc")]);
        let paging = PagingAndSorting::from_query(&params, &config()).unwrap();
        assert_eq!(paging.page, 3);
        assert_eq!(paging.page_size, 25);
        assert_eq!(paging.sort_by, Some(SortField::Name));
        assert_eq!(paging.sort_order, Some(SortOrder::Descending));
    }

    #[test]
    fn test_paging_rejects_bad_values() {
        for pairs in [
            vec![("page", "0")],
            vec![("page", "-1")],
            vec![("page", "two")],
            vec![("pageSize", "0")],
            vec![("pageSize", "101")],
            vec![("sortBy", "color")],
            vec![("sortOrder", "up")],
        ] {
            let result = PagingAndSorting::from_query(&query(&pairs), &config());
            assert!(
                matches!(result, Err(ApiError::InvalidParameter(_))),
                "{:?} should be rejected",
                pairs
            );
        }
    }

    #[test]
    fn test_product_info() {
        assert_eq!(product_info(&query(&[])).unwrap(), ProductInfo::Minimal);
        assert_eq!(
            product_info(&query(&[("productInfo", "intermediate")])).unwrap(),
            ProductInfo::Intermediate
        );
        assert!(product_info(&query(&[("productInfo", "everything")])).is_err());
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("session=xyz; context_id=abc123"));
        headers.append(header::COOKIE, HeaderValue::from_static("theme=\"dark\""));
        assert_eq!(cookie_value(&headers, "context_id"), Some("abc123"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }
}
