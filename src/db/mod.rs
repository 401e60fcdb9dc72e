use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::staff;

pub mod migrator;
pub mod repositories;

pub use repositories::auth::{Principal, ResolvedToken};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = db_url.strip_prefix("sqlite:")
            && !path_str.contains(":memory:")
        {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & staff migration applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn auth_repo(&self) -> repositories::auth::AuthRepository {
        repositories::auth::AuthRepository::new(self.conn.clone())
    }

    fn staff_repo(&self) -> repositories::staff::StaffRepository {
        repositories::staff::StaffRepository::new(self.conn.clone())
    }

    /// Resolve a bearer credential to a live token and its principal.
    pub async fn find_live_token(&self, access_token: &str) -> Result<Option<ResolvedToken>> {
        self.auth_repo().find_live_token(access_token).await
    }

    pub async fn list_staff(&self, is_active: Option<bool>) -> Result<Vec<staff::Model>> {
        self.staff_repo().list(is_active).await
    }

    pub async fn get_staff(&self, id: &str) -> Result<Option<staff::Model>> {
        self.staff_repo().get(id).await
    }

    pub async fn create_staff(&self, name: &str, schedule: Option<&str>) -> Result<staff::Model> {
        self.staff_repo().create(name, schedule).await
    }

    pub async fn update_staff(
        &self,
        id: &str,
        name: &str,
        schedule: Option<&str>,
    ) -> Result<Option<staff::Model>> {
        self.staff_repo().update(id, name, schedule).await
    }

    pub async fn deactivate_staff(&self, id: &str) -> Result<Option<staff::Model>> {
        self.staff_repo().deactivate(id).await
    }
}
