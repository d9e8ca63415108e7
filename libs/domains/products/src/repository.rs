use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{ListQuery, NewProduct, Product, ProductListing, ProductUpdate};

/// Repository trait for Product persistence
///
/// Defines the data access contract for products. Implementations can use
/// different storage backends; [`MongoProductRepository`](crate::mongodb::MongoProductRepository)
/// is the production one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one page of products matching the query, plus the total count
    /// of matching documents
    async fn list(&self, query: ListQuery) -> ProductResult<ProductListing>;

    /// Get a product by ID; `None` when no document matches
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Persist a new product
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Apply a partial update to a product; `NotFound` when no document matches
    async fn update(&self, id: Uuid, update: ProductUpdate) -> ProductResult<()>;

    /// Delete a product by ID; `false` when no document matched
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
