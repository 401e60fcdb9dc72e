use sea_orm::entity::prelude::*;

/// Roles for internal users who operate the system.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

/// Internal Agent Hub users. The table is owned by the hub's auth system
/// and is read-only from this service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: Option<String>,

    #[sea_orm(unique)]
    pub phone: Option<String>,

    pub hashed_password: String,

    pub role: UserRole,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token_users::Entity")]
    TokenUsers,
}

impl Related<super::token_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenUsers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
