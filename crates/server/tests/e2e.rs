use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Ensure models prefer env over a config file
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create_user(app: &TestApp, name: &str) -> anyhow::Result<Value> {
    let email = format!("e2e_{}@example.com", Uuid::new_v4());
    let res = client()
        .post(format!("{}/users", app.base_url))
        .json(&json!({ "name": name, "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_user_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();

    // create: every field sent comes back unchanged plus the assigned id
    let email = format!("ivan_{}@example.com", Uuid::new_v4());
    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({ "name": "Ivan Ivanov", "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["name"], "Ivan Ivanov");
    assert_eq!(created["email"], email.as_str());

    // get returns the identical payload
    let res = c.get(format!("{}/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, created);

    // partial update changes only the supplied field
    let res = c
        .put(format!("{}/users/{}", app.base_url, id))
        .json(&json!({ "name": "Ivan Petrov" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["name"], "Ivan Petrov");
    assert_eq!(updated["email"], email.as_str());

    // listed
    let res = c.get(format!("{}/users", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let all: Value = res.json().await?;
    assert!(all.as_array().expect("array").iter().any(|u| u["id"] == id));

    // delete, then a second get is 404 with the id in the message
    let res = c.delete(format!("{}/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = c.get(format!("{}/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Value = res.json().await?;
    assert_eq!(err["status"], 404);
    assert!(err["message"].as_str().expect("message").contains(&id.to_string()));
    assert!(err["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_user_validation_aggregates_fields() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .post(format!("{}/users", app.base_url))
        .json(&json!({ "name": "A", "email": "not-an-email" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    let msg = err["message"].as_str().expect("message");
    assert!(msg.contains("Field 'name'"), "got: {msg}");
    assert!(msg.contains("Field 'email'"), "got: {msg}");
    Ok(())
}

#[tokio::test]
async fn e2e_subscription_flow() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();

    // subscribing a non-existent user is 404 with the id in the message
    let missing = 999_999_999_i64;
    let res = c
        .post(format!("{}/users/{}/subscriptions", app.base_url, missing))
        .json(&json!({ "serviceName": "Netflix", "notificationEnabled": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Value = res.json().await?;
    assert!(err["message"].as_str().expect("message").contains(&missing.to_string()));

    let owner = create_user(&app, "Owner").await?;
    let other = create_user(&app, "Other").await?;
    let owner_id = owner["id"].as_i64().expect("id");
    let other_id = other["id"].as_i64().expect("id");
    let service = format!("svc-{}", Uuid::new_v4());

    // first subscribe succeeds and echoes the request fields
    let res = c
        .post(format!("{}/users/{}/subscriptions", app.base_url, owner_id))
        .json(&json!({ "serviceName": service, "notificationEnabled": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let sub: Value = res.json().await?;
    let sub_id = sub["id"].as_i64().expect("assigned id");
    assert_eq!(sub["userId"], owner_id);
    assert_eq!(sub["serviceName"], service.as_str());
    assert_eq!(sub["notificationEnabled"], true);
    assert!(sub["createdAt"].is_string());

    // repeating the same (user, service) is a conflict
    let res = c
        .post(format!("{}/users/{}/subscriptions", app.base_url, owner_id))
        .json(&json!({ "serviceName": service, "notificationEnabled": false }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // but the same service for a different user is fine
    let res = c
        .post(format!("{}/users/{}/subscriptions", app.base_url, other_id))
        .json(&json!({ "serviceName": service, "notificationEnabled": false }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // list shows the owner's subscription
    let res = c
        .get(format!("{}/users/{}/subscriptions", app.base_url, owner_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = res.json().await?;
    assert!(listed.as_array().expect("array").iter().any(|s| s["id"] == sub_id));

    // unsubscribe: missing id is 404, someone else's id is 403
    let res = c
        .delete(format!("{}/users/{}/subscriptions/{}", app.base_url, other_id, 999_999_999))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = c
        .delete(format!("{}/users/{}/subscriptions/{}", app.base_url, other_id, sub_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // the owner can remove it
    let res = c
        .delete(format!("{}/users/{}/subscriptions/{}", app.base_url, owner_id, sub_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // cleanup cascades the remaining subscriptions
    for id in [owner_id, other_id] {
        let res = c.delete(format!("{}/users/{}", app.base_url, id)).send().await?;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
    Ok(())
}

#[tokio::test]
async fn e2e_top_subscriptions() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .get(format!("{}/subscriptions/top", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let top: Value = res.json().await?;
    let entries = top.as_array().expect("array");
    assert!(entries.len() <= 3);
    // descending by count
    let counts: Vec<i64> = entries.iter().map(|e| e["count"].as_i64().expect("count")).collect();
    let mut sorted = counts.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted);
    Ok(())
}
