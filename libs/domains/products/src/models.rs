use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Product description
    pub description: String,
    /// Unit price, non-negative
    pub price: f64,
    /// Thumbnail image URI
    pub thumbnail: String,
    /// Unique product code
    pub code: String,
    /// Units in stock
    pub stock: i32,
    /// Category name
    pub category: String,
    /// Whether the product is available for purchase
    pub availability: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product.
///
/// The body is forwarded to the store as-is; field validation is the
/// store's responsibility, not this layer's.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewProduct {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: String,
    pub code: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_availability() -> bool {
    true
}

/// DTO for updating an existing product.
///
/// Carries exactly the six mutable fields; fields absent from the request
/// body are left untouched in the stored document.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i32>,
}

/// Raw listing query parameters as they arrive on the wire.
///
/// `limit` and `page` come in as strings and are coerced numerically:
/// absent, unparseable, or non-positive values fall back to the defaults
/// (10 and 1 respectively).
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListParams {
    /// Page size (default 10)
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// "asc" or "desc" to order by price
    pub sort: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    /// Availability filter ("true"/"false")
    pub availability: Option<String>,
    /// Free-text search, matched case-insensitively against category
    pub query: Option<String>,
}

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

impl ListParams {
    /// Effective page size
    pub fn limit(&self) -> i64 {
        coerce(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    /// Effective page number (not clamped against the total page count)
    pub fn page(&self) -> i64 {
        coerce(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        match self.sort.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("asc") => Some(SortOrder::Asc),
            Some(s) if s.eq_ignore_ascii_case("desc") => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// Build the store filter from the raw parameters.
    ///
    /// A free-text `query` replaces any exact category constraint with a
    /// case-insensitive pattern match; the availability filter stays in
    /// effect either way.
    pub fn filter(&self) -> ProductFilter {
        let category = match (&self.query, &self.category) {
            (Some(q), _) => Some(CategoryFilter::Pattern(q.clone())),
            (None, Some(c)) => Some(CategoryFilter::Exact(c.clone())),
            (None, None) => None,
        };

        ProductFilter {
            category,
            availability: self.availability.clone(),
        }
    }

    /// Full store query for the listing operation
    pub fn query(&self) -> ListQuery {
        ListQuery {
            limit: self.limit(),
            page: self.page(),
            sort: self.sort_order(),
            filter: self.filter(),
        }
    }
}

fn coerce(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Price sort direction for the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Category constraint passed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Exact match on the stored category
    Exact(String),
    /// Case-insensitive pattern match
    Pattern(String),
}

/// Per-request set of constraints for the listing operation
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<CategoryFilter>,
    pub availability: Option<String>,
}

/// Resolved store query: page window, sort, and filter
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub limit: i64,
    pub page: i64,
    pub sort: Option<SortOrder>,
    pub filter: ProductFilter,
}

/// One page of products plus the total match count, as returned by the store
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub total_documents: u64,
}

/// Listing view model: the page of products plus pagination metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_pages: i64,
    pub current_page: i64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl ProductPage {
    /// Compute pagination metadata for a page of results.
    ///
    /// `limit` must be positive, which [`ListParams::limit`] guarantees.
    /// `current_page` is taken at face value: callers asking for a page past
    /// the end simply get no-next/no-prev flags consistent with the number
    /// they supplied.
    pub fn new(products: Vec<Product>, total_documents: u64, limit: i64, current_page: i64) -> Self {
        let total_pages = total_documents.div_ceil(limit as u64) as i64;
        let has_prev_page = current_page > 1;
        let has_next_page = current_page < total_pages;
        let prev_page = has_prev_page.then(|| current_page - 1);
        let next_page = has_next_page.then(|| current_page + 1);
        let prev_link = prev_page.map(|p| page_link(limit, p));
        let next_link = next_page.map(|p| page_link(limit, p));

        Self {
            products,
            total_pages,
            current_page,
            has_prev_page,
            has_next_page,
            prev_page,
            next_page,
            prev_link,
            next_link,
        }
    }
}

fn page_link(limit: i64, page: i64) -> String {
    format!("/api/products?limit={}&page={}", limit, page)
}

impl Product {
    /// Create a new product from the creation DTO
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            price: input.price,
            thumbnail: input.thumbnail,
            code: input.code,
            stock: input.stock,
            category: input.category,
            availability: input.availability,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update DTO, touching only the fields it carries
    pub fn apply_update(&mut self, update: ProductUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        self.updated_at = Utc::now();
    }
}
