use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Schema, Set};
use tower::ServiceExt;

use staffhub::api;
use staffhub::config::Config;
use staffhub::entities::{agents, token_agents, token_users, tokens, users};
use staffhub::ids;

const USER_TOKEN: &str = "active-user-token";
const INACTIVE_USER_TOKEN: &str = "inactive-user-token";
const AGENT_TOKEN: &str = "active-agent-token";
const INACTIVE_AGENT_TOKEN: &str = "inactive-agent-token";
const ORPHAN_TOKEN: &str = "orphan-token";
const EXPIRED_TOKEN: &str = "expired-token";
const REVOKED_TOKEN: &str = "revoked-token";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.database.sqlite_path = ":memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = api::create_app_state(config)
        .await
        .expect("Failed to create app state");

    seed_auth_tables(&state.store().conn).await;

    api::router(state)
}

async fn seed_auth_tables(conn: &DatabaseConnection) {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    for stmt in [
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(agents::Entity),
        schema.create_table_from_entity(tokens::Entity),
        schema.create_table_from_entity(token_users::Entity),
        schema.create_table_from_entity(token_agents::Entity),
    ] {
        conn.execute(backend.build(&stmt))
            .await
            .expect("Failed to create auth table");
    }

    let active_user = insert_user(conn, "operator", true).await;
    let inactive_user = insert_user(conn, "retired", false).await;
    let active_agent = insert_agent(conn, "scheduler-bot", true).await;
    let inactive_agent = insert_agent(conn, "dead-bot", false).await;

    let in_an_hour = Utc::now() + Duration::hours(1);
    let an_hour_ago = Utc::now() - Duration::hours(1);

    let t = insert_token(conn, USER_TOKEN, in_an_hour, false).await;
    link_user(conn, &t, &active_user).await;

    let t = insert_token(conn, INACTIVE_USER_TOKEN, in_an_hour, false).await;
    link_user(conn, &t, &inactive_user).await;

    let t = insert_token(conn, AGENT_TOKEN, in_an_hour, false).await;
    link_agent(conn, &t, &active_agent).await;

    let t = insert_token(conn, INACTIVE_AGENT_TOKEN, in_an_hour, false).await;
    link_agent(conn, &t, &inactive_agent).await;

    insert_token(conn, ORPHAN_TOKEN, in_an_hour, false).await;

    // Expired but otherwise valid, and bound to an active user
    let t = insert_token(conn, EXPIRED_TOKEN, an_hour_ago, false).await;
    link_user(conn, &t, &active_user).await;

    // Revoked but unexpired, and bound to an active user
    let t = insert_token(conn, REVOKED_TOKEN, in_an_hour, true).await;
    link_user(conn, &t, &active_user).await;
}

async fn insert_user(conn: &DatabaseConnection, username: &str, is_active: bool) -> String {
    let id = ids::user_id();
    users::ActiveModel {
        id: Set(id.clone()),
        username: Set(username.to_string()),
        email: Set(None),
        phone: Set(None),
        hashed_password: Set("hash".to_string()),
        role: Set(users::UserRole::Member),
        is_active: Set(is_active),
    }
    .insert(conn)
    .await
    .expect("Failed to seed user");
    id
}

async fn insert_agent(conn: &DatabaseConnection, name: &str, is_active: bool) -> String {
    let id = ids::agent_id();
    agents::ActiveModel {
        id: Set(id.clone()),
        name: Set(name.to_string()),
        webhook_url: Set(None),
        is_fire_and_forget: Set(false),
        buffer_time_seconds: Set(3),
        history_msg_count: Set(40),
        recent_msg_window_minutes: Set(1440),
        activate_for_new_conversation: Set(false),
        is_active: Set(is_active),
    }
    .insert(conn)
    .await
    .expect("Failed to seed agent");
    id
}

async fn insert_token(
    conn: &DatabaseConnection,
    access_token: &str,
    expires_at: DateTime<Utc>,
    is_revoked: bool,
) -> String {
    let id = ids::token_id();
    tokens::ActiveModel {
        id: Set(id.clone()),
        token_type: Set("bearer".to_string()),
        access_token: Set(access_token.to_string()),
        refresh_token: Set(None),
        expires_at: Set(expires_at),
        created_at: Set(Utc::now()),
        is_revoked: Set(is_revoked),
    }
    .insert(conn)
    .await
    .expect("Failed to seed token");
    id
}

async fn link_user(conn: &DatabaseConnection, token_id: &str, user_id: &str) {
    token_users::ActiveModel {
        id: Set(ids::token_user_id()),
        token_id: Set(token_id.to_string()),
        user_id: Set(user_id.to_string()),
    }
    .insert(conn)
    .await
    .expect("Failed to seed token-user link");
}

async fn link_agent(conn: &DatabaseConnection, token_id: &str, agent_id: &str) {
    token_agents::ActiveModel {
        id: Set(ids::token_agent_id()),
        token_id: Set(token_id.to_string()),
        agent_id: Set(agent_id.to_string()),
    }
    .insert(conn)
    .await
    .expect("Failed to seed token-agent link");
}

async fn list_staff_with_header(app: &Router, auth: Option<&str>) -> Response {
    let mut builder = Request::builder().uri("/staff-timetable/api/staff/");
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn error_message(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn missing_or_malformed_header_is_unauthenticated() {
    let app = spawn_app().await;

    for auth in [
        None,
        Some("active-user-token"),          // no scheme
        Some("bearer active-user-token"),   // wrong case
        Some("Bearer"),                     // no credential
        Some("Basic active-user-token"),    // wrong scheme
    ] {
        let response = list_staff_with_header(&app, auth).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{auth:?}");
    }
}

#[tokio::test]
async fn dead_credentials_yield_one_generic_message() {
    let app = spawn_app().await;

    // Wrong, expired, and revoked must be indistinguishable to the caller
    let mut messages = Vec::new();
    for token in ["no-such-token", EXPIRED_TOKEN, REVOKED_TOKEN] {
        let response = list_staff_with_header(&app, Some(format!("Bearer {token}").as_str())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{token}");
        messages.push(error_message(response).await);
    }

    assert!(messages.iter().all(|m| m == "Invalid or expired token"));
}

#[tokio::test]
async fn token_without_principal_is_forbidden() {
    let app = spawn_app().await;

    let response = list_staff_with_header(&app, Some(format!("Bearer {ORPHAN_TOKEN}").as_str())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        error_message(response).await,
        "Valid user or agent authentication required"
    );
}

#[tokio::test]
async fn inactive_principals_are_forbidden() {
    let app = spawn_app().await;

    let response =
        list_staff_with_header(&app, Some(format!("Bearer {INACTIVE_USER_TOKEN}").as_str())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_message(response).await, "User account is inactive");

    let response =
        list_staff_with_header(&app, Some(format!("Bearer {INACTIVE_AGENT_TOKEN}").as_str())).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_message(response).await, "Agent is inactive");
}

#[tokio::test]
async fn active_user_and_agent_tokens_are_authorized() {
    let app = spawn_app().await;

    for token in [USER_TOKEN, AGENT_TOKEN] {
        let response = list_staff_with_header(&app, Some(format!("Bearer {token}").as_str())).await;
        assert_eq!(response.status(), StatusCode::OK, "{token}");
    }
}
