#[macro_use]
extern crate rocket;

mod api;
mod config;
mod db;
mod error;
mod middleware;
mod model;
mod util;

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{Json, Value};
use rocket::{Build, Rocket, State};
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::Level;

use api::wrapper::{self, RefreshGate};
use config::AppConfig;
use middleware::catcher::{internal_server_error, not_found};

#[get("/")]
async fn index(
    pool: &State<Pool<Sqlite>>,
    cfg: &State<AppConfig>,
    gate: &State<RefreshGate>,
) -> status::Custom<Json<Value>> {
    let r = wrapper::get_snapshot(pool, cfg, gate).await;
    status::Custom(Status::from_code(r.status_code).unwrap(), Json(r.body))
}

#[get("/test")]
async fn test_cards(cfg: &State<AppConfig>) -> status::Custom<Json<Value>> {
    let r = wrapper::probe_cards(cfg).await;
    status::Custom(Status::from_code(r.status_code).unwrap(), Json(r.body))
}

fn rocket(cfg: AppConfig, pool: Pool<Sqlite>) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![index, test_cards])
        .register("/", catchers![not_found, internal_server_error])
        .manage(pool)
        .manage(cfg)
        .manage(RefreshGate::new())
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Setting default subscriber failed");

    let cfg = AppConfig::from_env()?;
    let pool = SqlitePool::connect(&cfg.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let _rocket = rocket(cfg, pool).launch().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::model::deck::PlayerRecord;
    use rocket::local::asynchronous::Client;
    use sqlx::sqlite::SqlitePoolOptions;

    fn test_config() -> AppConfig {
        AppConfig {
            token: "test-token".to_string(),
            database_url: "sqlite::memory:".to_string(),
            // nothing listens on the discard port: any upstream call
            // surfaces as a transport error instead of silently passing
            base_url: "http://127.0.0.1:9".to_string(),
            refresh_interval: 60,
            ranking_depth: 15,
        }
    }

    async fn test_pool() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::migrate!().run(&pool).await.expect("migrations");
        pool
    }

    fn seed_record() -> PlayerRecord {
        PlayerRecord {
            tag: "#2PP".to_string(),
            name: "Mugi".to_string(),
            rank: 1,
            current_trophies: 7801,
            deck: vec!["Knight".to_string(), "Hog Rider".to_string()],
        }
    }

    #[rocket::async_test]
    async fn fresh_snapshot_is_served_without_upstream_calls() {
        let pool = test_pool().await;
        db::deck::replace_snapshot(&pool, &[seed_record()], Utc::now().timestamp())
            .await
            .expect("seed snapshot");

        let client = Client::tracked(rocket(test_config(), pool))
            .await
            .expect("rocket instance");
        let resp = client.get("/").dispatch().await;

        assert_eq!(resp.status(), Status::Ok);
        let body = resp.into_json::<Value>().await.expect("json body");
        assert_eq!(body["data"][0]["tag"], "#2PP");
        assert_eq!(body["data"][0]["deck"][1], "Hog Rider");
        assert!(body["timestamp"].as_i64().is_some());
    }

    #[rocket::async_test]
    async fn stale_snapshot_with_unreachable_upstream_is_503() {
        let pool = test_pool().await;
        // stale: timestamp far in the past
        db::deck::replace_snapshot(&pool, &[seed_record()], 1_000_000)
            .await
            .expect("seed snapshot");

        let client = Client::tracked(rocket(test_config(), pool))
            .await
            .expect("rocket instance");
        let resp = client.get("/").dispatch().await;

        assert_eq!(resp.status(), Status::ServiceUnavailable);
    }

    #[rocket::async_test]
    async fn first_call_with_unreachable_upstream_is_503() {
        let client = Client::tracked(rocket(test_config(), test_pool().await))
            .await
            .expect("rocket instance");
        let resp = client.get("/").dispatch().await;

        assert_eq!(resp.status(), Status::ServiceUnavailable);
        let body = resp.into_json::<Value>().await.expect("json body");
        assert!(body["message"].as_str().is_some());
    }

    #[rocket::async_test]
    async fn card_probe_with_unreachable_upstream_is_503() {
        let client = Client::tracked(rocket(test_config(), test_pool().await))
            .await
            .expect("rocket instance");
        let resp = client.get("/test").dispatch().await;

        assert_eq!(resp.status(), Status::ServiceUnavailable);
    }

    #[rocket::async_test]
    async fn unknown_route_is_404_with_message_body() {
        let client = Client::tracked(rocket(test_config(), test_pool().await))
            .await
            .expect("rocket instance");
        let resp = client.get("/nope").dispatch().await;

        assert_eq!(resp.status(), Status::NotFound);
        let body = resp.into_json::<Value>().await.expect("json body");
        assert_eq!(body["message"], "Error: 404 not found");
    }
}
