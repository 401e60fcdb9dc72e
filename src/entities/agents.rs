use sea_orm::entity::prelude::*;

/// External services or bots that act through the hub. Owned by the hub's
/// auth system, read-only here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "agent")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    pub webhook_url: Option<String>,

    pub is_fire_and_forget: bool,

    pub buffer_time_seconds: i32,

    pub history_msg_count: i32,

    pub recent_msg_window_minutes: i32,

    pub activate_for_new_conversation: bool,

    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::token_agents::Entity")]
    TokenAgents,
}

impl Related<super::token_agents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenAgents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
