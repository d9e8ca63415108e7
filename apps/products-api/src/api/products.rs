//! Products route wiring

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductService};
use mongodb::Database;

fn repository(db: &Database) -> MongoProductRepository {
    MongoProductRepository::new(db)
}

/// Assemble the products router on top of the Mongo-backed service
pub fn router(db: &Database) -> Router {
    handlers::router(ProductService::new(repository(db)))
}

/// Ensure the products collection indexes exist
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    repository(db).init_indexes().await?;
    Ok(())
}
