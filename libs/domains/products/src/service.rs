//! Product Service - request-level logic above the repository

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListParams, NewProduct, Product, ProductPage, ProductUpdate};
use crate::repository::ProductRepository;

/// Service layer between the HTTP handlers and the repository.
///
/// Holds no per-request state; each call builds its own query and pagination
/// locals and suspends on the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List one page of products and compute the pagination view model
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListParams) -> ProductResult<ProductPage> {
        let limit = params.limit();
        let page = params.page();

        let listing = self.repository.list(params.query()).await?;

        Ok(ProductPage::new(
            listing.products,
            listing.total_documents,
            limit,
            page,
        ))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product. The input is handed to the store as-is.
    #[instrument(skip(self, input), fields(product_title = %input.title))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Update the mutable fields of an existing product
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, id: Uuid, update: ProductUpdate) -> ProductResult<()> {
        self.repository.update(id, update).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
