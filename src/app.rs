//! Application assembly: storage backend, services and route table.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::core::{AppError, Repository, Result};
use crate::middleware::{json_config, query_config};
use crate::modules::common::MySqlRepository;
use crate::modules::contracts::{
    self, ContractRepository, ContractService, InMemoryContractRepository,
    MySqlContractRepository, PdfRenderer,
};
use crate::modules::coworkers::{self, Coworker, CoworkerService, InMemoryCoworkerRepository};
use crate::modules::health;

/// The backing store the repositories were built on
#[derive(Clone)]
pub enum Storage {
    MySql(MySqlPool),
    Memory,
}

impl Storage {
    pub fn backend(&self) -> StorageBackend {
        match self {
            Storage::MySql(_) => StorageBackend::MySql,
            Storage::Memory => StorageBackend::Memory,
        }
    }

    /// Round-trip to the backend; always succeeds for in-memory storage
    pub async fn ping(&self) -> Result<()> {
        match self {
            Storage::MySql(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Storage::Memory => Ok(()),
        }
    }
}

/// Services shared by every worker
#[derive(Clone)]
pub struct AppServices {
    pub coworkers: CoworkerService,
    pub contracts: web::Data<ContractService>,
    pub storage: Storage,
}

impl AppServices {
    /// Build services on the configured backend, running migrations when enabled
    pub async fn build(config: &DatabaseConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::Memory => Ok(Self::memory()),
            StorageBackend::MySql => {
                let pool = config.create_pool().await?;

                if config.run_migrations {
                    sqlx::migrate!("./migrations")
                        .run(&pool)
                        .await
                        .map_err(|e| AppError::Database(e.into()))?;
                    tracing::info!("Database migrations applied");
                }

                Ok(Self::mysql(pool))
            }
        }
    }

    pub fn mysql(pool: MySqlPool) -> Self {
        Self::assemble(
            Arc::new(MySqlRepository::<Coworker>::new(pool.clone())),
            Arc::new(MySqlContractRepository::new(pool.clone())),
            Storage::MySql(pool),
        )
    }

    /// Coworkers and contracts share one store so assignments stay consistent
    pub fn memory() -> Self {
        let contracts = InMemoryContractRepository::new();

        Self::assemble(
            Arc::new(InMemoryCoworkerRepository::new(contracts.clone())),
            Arc::new(contracts),
            Storage::Memory,
        )
    }

    fn assemble<C, R>(coworkers: Arc<C>, contracts: Arc<R>, storage: Storage) -> Self
    where
        C: Repository<Coworker> + 'static,
        R: ContractRepository + 'static,
    {
        Self {
            coworkers: CoworkerService::new(coworkers),
            contracts: web::Data::new(ContractService::new(contracts, Arc::new(PdfRenderer::new()))),
            storage,
        }
    }
}

/// Register app data and every route
pub fn configure(services: &AppServices, cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(web::Data::new(services.coworkers.clone()))
        .app_data(services.contracts.clone())
        .app_data(web::Data::new(services.storage.clone()))
        .route("/", web::get().to(index))
        .configure(health::configure)
        .configure(coworkers::controllers::configure)
        .configure(contracts::controllers::configure);
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "contractdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
