use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, staff};
use crate::ids;

/// Repository for the staff table, the only table this service writes.
pub struct StaffRepository {
    conn: DatabaseConnection,
}

impl StaffRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List staff ordered by name, optionally filtered by active flag.
    pub async fn list(&self, is_active: Option<bool>) -> Result<Vec<staff::Model>> {
        let mut query = Staff::find().order_by_asc(staff::Column::Name);

        if let Some(active) = is_active {
            query = query.filter(staff::Column::IsActive.eq(active));
        }

        query.all(&self.conn).await.context("Failed to list staff")
    }

    pub async fn get(&self, id: &str) -> Result<Option<staff::Model>> {
        Staff::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query staff member")
    }

    /// Create a staff member. An omitted or empty schedule becomes `"{}"`.
    pub async fn create(&self, name: &str, schedule: Option<&str>) -> Result<staff::Model> {
        let now = Utc::now();

        let model = staff::ActiveModel {
            id: Set(ids::staff_id()),
            name: Set(name.to_string()),
            email: Set(None),
            schedule: Set(normalize_schedule(schedule)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model
            .insert(&self.conn)
            .await
            .context("Failed to insert staff member")?;

        info!("Created staff member {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Overwrite name and schedule. An empty or omitted schedule resets the
    /// stored value to `"{}"` rather than leaving it unchanged.
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        schedule: Option<&str>,
    ) -> Result<Option<staff::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut model: staff::ActiveModel = existing.into();
        model.name = Set(name.to_string());
        model.schedule = Set(normalize_schedule(schedule));
        model.updated_at = Set(Utc::now());

        let updated = model
            .update(&self.conn)
            .await
            .context("Failed to update staff member")?;

        Ok(Some(updated))
    }

    /// Soft delete: flips `is_active` off and refreshes `updated_at`. The row
    /// stays queryable. Deactivating an already-inactive row succeeds.
    pub async fn deactivate(&self, id: &str) -> Result<Option<staff::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut model: staff::ActiveModel = existing.into();
        model.is_active = Set(false);
        model.updated_at = Set(Utc::now());

        let updated = model
            .update(&self.conn)
            .await
            .context("Failed to deactivate staff member")?;

        info!("Deactivated staff member {} ({})", updated.name, updated.id);
        Ok(Some(updated))
    }
}

fn normalize_schedule(schedule: Option<&str>) -> String {
    match schedule {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "{}".to_string(),
    }
}
