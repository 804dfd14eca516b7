//! Connects the four backing stores and assembles the user service.

use std::sync::Arc;

use tracing::info;

use userhub::domain::UserService;
use userhub::domain::ports::{CacheError, DocumentStoreError, PublishError, UserManagement};
use userhub::outbound::cache::RedisUserIndexCache;
use userhub::outbound::document::MongoUserDocumentStore;
use userhub::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_migrations,
};
use userhub::outbound::queue::AmqpUserEventPublisher;
use userhub::settings::AppSettings;

/// Failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    DocumentStore(#[from] DocumentStoreError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Queue(#[from] PublishError),
    #[error("failed to start HTTP server: {0}")]
    Server(#[from] std::io::Error),
}

/// Migrate the relational schema, connect every store and wire the service.
///
/// Stores are connected in propagation order so the first unreachable one
/// is the one reported.
pub async fn connect_user_service(
    settings: &AppSettings,
) -> Result<Arc<dyn UserManagement>, StartupError> {
    let database_url = settings
        .database_url()
        .map_err(|err| StartupError::Settings(err.to_string()))?;
    run_migrations(&database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await?;
    info!("relational store connected");

    let documents =
        MongoUserDocumentStore::connect(settings.mongodb_uri(), settings.mongodb_database())
            .await?;
    let cache = RedisUserIndexCache::connect(settings.redis_addr()).await?;
    let events = AmqpUserEventPublisher::connect(settings.rabbitmq_url()).await?;

    Ok(Arc::new(UserService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(documents),
        Arc::new(cache),
        Arc::new(events),
    )))
}
