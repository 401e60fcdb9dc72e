use sea_orm::entity::prelude::*;

/// Authentication sessions minted by the hub. A token is linked to at most
/// one user and at most one agent through the junction tables.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub token_type: String,

    #[sea_orm(unique)]
    pub access_token: String,

    #[sea_orm(unique)]
    pub refresh_token: Option<String>,

    pub expires_at: DateTimeUtc,

    pub created_at: DateTimeUtc,

    pub is_revoked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token_users::Entity")]
    TokenUsers,
    #[sea_orm(has_many = "super::token_agents::Entity")]
    TokenAgents,
}

impl Related<super::token_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenUsers.def()
    }
}

impl Related<super::token_agents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenAgents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
