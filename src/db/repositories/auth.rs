use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{agents, token_agents, token_users, tokens, users};

/// The actor behind a resolved token: an internal user or an automated agent.
#[derive(Debug, Clone)]
pub enum Principal {
    User(users::Model),
    Agent(agents::Model),
}

/// A live token together with its principal, materialized at lookup time so
/// callers never re-traverse the junction tables.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    pub token: tokens::Model,
    pub principal: Option<Principal>,
}

/// Read-only repository over the hub-owned auth tables.
pub struct AuthRepository {
    conn: DatabaseConnection,
}

impl AuthRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Look up a token by its access credential.
    ///
    /// Returns `None` for unknown, revoked, and expired credentials alike;
    /// callers must not distinguish those cases.
    pub async fn find_live_token(&self, access_token: &str) -> Result<Option<ResolvedToken>> {
        let token = tokens::Entity::find()
            .filter(tokens::Column::AccessToken.eq(access_token))
            .filter(tokens::Column::IsRevoked.eq(false))
            .filter(tokens::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.conn)
            .await
            .context("Failed to query token")?;

        let Some(token) = token else {
            return Ok(None);
        };

        let principal = self.load_principal(&token.id).await?;

        Ok(Some(ResolvedToken { token, principal }))
    }

    /// A linked user wins over a linked agent; in practice a token carries
    /// exactly one link.
    async fn load_principal(&self, token_id: &str) -> Result<Option<Principal>> {
        let user = users::Entity::find()
            .inner_join(token_users::Entity)
            .filter(token_users::Column::TokenId.eq(token_id))
            .one(&self.conn)
            .await
            .context("Failed to query token user link")?;

        if let Some(user) = user {
            return Ok(Some(Principal::User(user)));
        }

        let agent = agents::Entity::find()
            .inner_join(token_agents::Entity)
            .filter(token_agents::Column::TokenId.eq(token_id))
            .one(&self.conn)
            .await
            .context("Failed to query token agent link")?;

        Ok(agent.map(Principal::Agent))
    }
}
