//! Shared application state

use mongodb::{Client, Database};

use crate::config::Config;

/// State handed to every route: configuration plus the Mongo handles.
///
/// The `Database` is derived from the client once at construction so routes
/// never have to know the configured database name.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config,
            mongo_client,
            db,
        }
    }
}
