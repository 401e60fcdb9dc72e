pub mod prelude;

pub mod agents;
pub mod staff;
pub mod token_agents;
pub mod token_users;
pub mod tokens;
pub mod users;
