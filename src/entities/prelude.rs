pub use super::agents::Entity as Agents;
pub use super::staff::Entity as Staff;
pub use super::token_agents::Entity as TokenAgents;
pub use super::token_users::Entity as TokenUsers;
pub use super::tokens::Entity as Tokens;
pub use super::users::Entity as Users;
