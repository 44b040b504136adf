use std::sync::Arc;

use super::error::ApiResult;
use super::params::product_info;
use super::response::ResponseBuilder;
use super::validate::IdentifierValidator;
use crate::config::ApiConfig;
use crate::service::{ItemService, PagingAndSorting, ProductInfo};
use crate::util::QueryParams;

/// Collaborators shared by all controllers, wired once at startup.
#[derive(Clone)]
pub struct ApiServices {
    pub items: Arc<dyn ItemService>,
    pub responses: Arc<dyn ResponseBuilder>,
    pub validator: Arc<dyn IdentifierValidator>,
}

impl ApiServices {
    pub fn new(
        items: Arc<dyn ItemService>,
        responses: Arc<dyn ResponseBuilder>,
        validator: Arc<dyn IdentifierValidator>,
    ) -> Self {
        Self {
            items,
            responses,
            validator,
        }
    }
}

/// Paging spec and verbosity common to every endpoint.
pub fn request_options(config: &ApiConfig, params: &QueryParams) -> ApiResult<(PagingAndSorting, ProductInfo)> {
    let paging = PagingAndSorting::from_query(params, config)?;
    let product_info = product_info(params)?;
    Ok((paging, product_info))
}
