use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;

const PRODUCT_COLUMNS: &str = "p.sku, p.name, p.url, p.image, p.short_description, p.manufacturer, \
     p.regular_price, p.sale_price, p.customer_review_average, p.customer_review_count";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    sku: String,
    name: String,
    url: Option<String>,
    image: Option<String>,
    short_description: Option<String>,
    manufacturer: Option<String>,
    regular_price: Option<f64>,
    sale_price: Option<f64>,
    customer_review_average: Option<f64>,
    customer_review_count: Option<i64>,
}

impl ProductRow {
    fn into_item(self, product_info: ProductInfo) -> Item {
        let mut item = Item::minimal(self.sku, self.name);
        item.url = self.url;
        if product_info == ProductInfo::Intermediate {
            item.image = self.image;
            item.short_description = self.short_description;
            item.manufacturer = self.manufacturer;
            item.regular_price = self.regular_price;
            item.sale_price = self.sale_price;
            item.customer_review_average = self.customer_review_average;
            item.customer_review_count = self.customer_review_count;
        }
        item
    }
}

/// The rows one lookup draws from: a FROM/WHERE fragment joining `products p`
/// to a source table `s`, the column that ranks by relevance, and the values
/// for the fragment's placeholders.
struct Selection<'a> {
    source: &'static str,
    relevance: &'static str,
    args: Vec<&'a str>,
}

pub struct SqliteItemService {
    pool: SqlitePool,
}

impl SqliteItemService {
    pub async fn new(db_path: &str) -> ServiceResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty database.
        let in_memory = db_path.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        let service = Self { pool };
        service.init_schema().await?;

        info!("Item database initialized at {}", db_path);

        Ok(service)
    }

    async fn init_schema(&self) -> ServiceResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::query(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn upsert_product(&self, item: &Item) -> ServiceResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO products
            (sku, name, url, image, short_description, manufacturer,
             regular_price, sale_price, customer_review_average, customer_review_count)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.sku)
        .bind(&item.name)
        .bind(&item.url)
        .bind(&item.image)
        .bind(&item.short_description)
        .bind(&item.manufacturer)
        .bind(item.regular_price)
        .bind(item.sale_price)
        .bind(item.customer_review_average)
        .bind(item.customer_review_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn record_popularity(&self, category_id: &str, sku: &str, score: f64) -> ServiceResult<()> {
        sqlx::query("INSERT OR REPLACE INTO item_popularity (category_id, sku, score) VALUES (?, ?, ?)")
            .bind(category_id)
            .bind(sku)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_view(&self, context_id: &str, sku: &str, viewed_at: DateTime<Utc>) -> ServiceResult<()> {
        sqlx::query("INSERT OR REPLACE INTO context_views (context_id, sku, viewed_at) VALUES (?, ?, ?)")
            .bind(context_id)
            .bind(sku)
            .bind(viewed_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_recommendation(&self, context_id: &str, sku: &str, score: f64) -> ServiceResult<()> {
        sqlx::query("INSERT OR REPLACE INTO context_recommendations (context_id, sku, score) VALUES (?, ?, ?)")
            .bind(context_id)
            .bind(sku)
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn record_association(&self, sku: &str, related_sku: &str, kind: ApiKind, score: f64) -> ServiceResult<()> {
        sqlx::query("INSERT OR REPLACE INTO item_associations (sku, related_sku, kind, score) VALUES (?, ?, ?, ?)")
            .bind(sku)
            .bind(related_sku)
            .bind(kind.as_str())
            .bind(score)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch_page(
        &self,
        selection: Selection<'_>,
        paging: &PagingAndSorting,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        let count_sql = format!("SELECT COUNT(*) FROM {}", selection.source);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &selection.args {
            count_query = count_query.bind(*arg);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {} FROM {} ORDER BY {}, p.sku LIMIT ? OFFSET ?",
            PRODUCT_COLUMNS,
            selection.source,
            order_clause(paging, selection.relevance)
        );
        debug!(sql = %list_sql, "item lookup");

        let mut list_query = sqlx::query_as::<_, ProductRow>(&list_sql);
        for arg in &selection.args {
            list_query = list_query.bind(*arg);
        }
        let rows = list_query
            .bind(i64::from(paging.page_size))
            .bind(paging.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let items = rows.into_iter().map(|row| row.into_item(product_info)).collect();
        Ok(Page::new(items, total.max(0) as u64, paging))
    }

    async fn find_associated_items(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>> {
        let selection = Selection {
            source: "products p JOIN item_associations s ON s.related_sku = p.sku \
                     WHERE s.sku = ? AND s.kind = ?",
            relevance: "s.score",
            args: vec![item_id, api.as_str()],
        };
        self.fetch_page(selection, paging, product_info).await
    }
}

fn order_clause(paging: &PagingAndSorting, relevance: &str) -> String {
    let column = match paging.sort_field() {
        SortField::Relevance => relevance,
        SortField::Name => "p.name COLLATE NOCASE",
        SortField::Price => "COALESCE(p.sale_price, p.regular_price)",
        SortField::CustomerRating => "p.customer_review_average",
    };
    let direction = match paging.effective_order() {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    format!("{} {}", column, direction)
}

#[async_trait]
impl ItemService for SqliteItemService {
    async fn find_most_popular_items_for_category(
        &self,
        paging: &PagingAndSorting,
        category_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        let selection = if category_id == CATEGORY_ID_FOR_ALL {
            Selection {
                source: "products p JOIN \
                         (SELECT sku, SUM(score) AS score FROM item_popularity GROUP BY sku) s \
                         ON s.sku = p.sku",
                relevance: "s.score",
                args: vec![],
            }
        } else {
            Selection {
                source: "products p JOIN item_popularity s ON s.sku = p.sku WHERE s.category_id = ?",
                relevance: "s.score",
                args: vec![category_id],
            }
        };
        self.fetch_page(selection, paging, product_info).await
    }

    async fn find_recently_viewed_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        let selection = Selection {
            source: "products p JOIN context_views s ON s.sku = p.sku WHERE s.context_id = ?",
            relevance: "s.viewed_at",
            args: vec![context_id],
        };
        self.fetch_page(selection, paging, product_info).await
    }

    async fn find_recommended_items_for_context_id(
        &self,
        paging: &PagingAndSorting,
        context_id: &str,
        product_info: ProductInfo,
    ) -> ServiceResult<Page<Item>> {
        let selection = Selection {
            source: "products p JOIN context_recommendations s ON s.sku = p.sku WHERE s.context_id = ?",
            relevance: "s.score",
            args: vec![context_id],
        };
        self.fetch_page(selection, paging, product_info).await
    }

    async fn find_also_viewed_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>> {
        self.find_associated_items(paging, item_id, product_info, api).await
    }

    async fn find_also_bought_items_for_item(
        &self,
        paging: &PagingAndSorting,
        item_id: &str,
        product_info: ProductInfo,
        api: ApiKind,
    ) -> ServiceResult<Page<Item>> {
        self.find_associated_items(paging, item_id, product_info, api).await
    }
}
