use sea_orm::entity::prelude::*;

/// Staff members with weekly work schedules. The only table this service
/// owns and writes to.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub email: Option<String>,

    /// Opaque JSON-encoded weekly schedule, `"{}"` when unset.
    pub schedule: String,

    pub is_active: bool,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
