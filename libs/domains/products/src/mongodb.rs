//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CategoryFilter, ListQuery, NewProduct, Product, ProductFilter, ProductListing, ProductUpdate,
    SortOrder,
};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the listing and lookup queries
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Unique product code
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name("idx_code_unique".to_string())
                        .build(),
                )
                .build(),
            // Category + availability for filtered listings
            IndexModel::builder()
                .keys(doc! { "category": 1, "availability": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_availability".to_string())
                        .build(),
                )
                .build(),
            // Price sort
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from a ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        match &filter.category {
            Some(CategoryFilter::Exact(category)) => {
                doc.insert("category", category);
            }
            Some(CategoryFilter::Pattern(pattern)) => {
                doc.insert("category", doc! { "$regex": pattern, "$options": "i" });
            }
            None => {}
        }

        if let Some(ref availability) = filter.availability {
            // The wire value is a string; stored documents carry a boolean
            match availability.parse::<bool>() {
                Ok(flag) => doc.insert("availability", flag),
                Err(_) => doc.insert("availability", availability.as_str()),
            };
        }

        doc
    }

    /// Sort document for the listing; unsorted queries fall back to newest-first
    fn sort_doc(sort: Option<SortOrder>) -> Document {
        match sort {
            Some(SortOrder::Asc) => doc! { "price": 1 },
            Some(SortOrder::Desc) => doc! { "price": -1 },
            None => doc! { "created_at": -1 },
        }
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Documents to skip for a 1-based page; saturates instead of wrapping on
    /// absurd page numbers
    fn skip_for(page: i64, limit: i64) -> u64 {
        page.saturating_sub(1).max(0).saturating_mul(limit) as u64
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: ListQuery) -> ProductResult<ProductListing> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&query.filter);
        let total_documents = self.collection.count_documents(mongo_filter.clone()).await?;

        let options = mongodb::options::FindOptions::builder()
            .limit(query.limit)
            .skip(Self::skip_for(query.page, query.limit))
            .sort(Self::sort_doc(query.sort))
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(ProductListing {
            products,
            total_documents,
        })
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self, input), fields(product_title = %input.title))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: ProductUpdate) -> ProductResult<()> {
        // Fetch, patch, replace: the whole document goes back through the
        // same serialization as inserts do
        let filter = Self::id_filter(id);
        let mut product = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(update);
        self.collection.replace_one(filter, &product).await?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}
