use chrono::Utc;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::{Pool, Sqlite};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::royale;
use crate::config::AppConfig;
use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::model::deck::{PlayerRecord, SnapshotResponse};
use crate::model::response::{ApiStatus, ResponseWithStatus};
use crate::util::message;

/// Serializes refreshes. Concurrent requests that both observe a stale
/// snapshot queue up here; the loser re-checks staleness after acquiring
/// and skips the redundant upstream round-trip.
pub struct RefreshGate(Mutex<()>);

impl RefreshGate {
    pub fn new() -> Self {
        RefreshGate(Mutex::new(()))
    }
}

/// Stale iff the stored time is more than `interval` seconds away from
/// now, in either direction. A stored clock running ahead of us by more
/// than the interval also triggers a refresh.
fn outdated(now: i64, stored: i64, interval: i64) -> bool {
    (now - stored).abs() > interval
}

/// Tags of the first `depth` ranking entries, upstream order preserved
/// verbatim. The cutoff applies before the tag check, so a tagless entry
/// inside the top `depth` shrinks the set rather than pulling in entry
/// `depth + 1`.
fn top_tags(items: &[Value], depth: usize) -> Vec<&str> {
    items
        .iter()
        .take(depth)
        .filter_map(|entry| {
            let tag = entry.get("tag").and_then(Value::as_str);
            if tag.is_none() {
                warn!("skipped ranking entry without tag");
            }
            tag
        })
        .collect()
}

pub async fn is_stale(pool: &Pool<Sqlite>, cfg: &AppConfig) -> ApiResult<bool> {
    let stale = match db::deck::get_timestamp(pool).await? {
        Some(stored) => outdated(Utc::now().timestamp(), stored, cfg.refresh_interval),
        None => true,
    };
    Ok(stale)
}

/// Pull the top `ranking_depth` players and replace the snapshot.
///
/// A non-success ranking response means there is no usable ranking list:
/// the previous snapshot stays untouched. Individual players that cannot
/// be fetched or flattened are skipped; only transport failures abort.
pub async fn refresh(pool: &Pool<Sqlite>, cfg: &AppConfig) -> ApiResult<()> {
    let Some(rankings) = royale::get_rankings(cfg).await? else {
        warn!("no usable ranking list, keeping previous snapshot");
        return Ok(());
    };
    let Some(items) = rankings.get("items").and_then(Value::as_array) else {
        warn!("ranking response carried no items, keeping previous snapshot");
        return Ok(());
    };

    let mut records = Vec::new();
    for tag in top_tags(items, cfg.ranking_depth) {
        let Some(player) = royale::get_player(cfg, tag).await? else {
            warn!("skipped player {}", tag);
            continue;
        };
        match PlayerRecord::from_player(&player) {
            Some(record) => records.push(record),
            None => warn!("skipped player {}", tag),
        }
    }

    db::deck::replace_snapshot(pool, &records, Utc::now().timestamp()).await?;
    info!("stored {} decks", records.len());
    Ok(())
}

async fn serve_snapshot(
    pool: &Pool<Sqlite>,
    cfg: &AppConfig,
    gate: &RefreshGate,
) -> ApiResult<SnapshotResponse> {
    if is_stale(pool, cfg).await? {
        info!("refreshing data");
        let _guard = gate.0.lock().await;
        // a request that held the gate before us may have refreshed already
        if is_stale(pool, cfg).await? {
            refresh(pool, cfg).await?;
        }
    } else {
        info!("data is still relevant");
    }

    let data = db::deck::get_decks(pool).await?;
    let timestamp = db::deck::get_timestamp(pool)
        .await?
        .ok_or(ApiError::NoSnapshot)?;
    Ok(SnapshotResponse { data, timestamp })
}

pub async fn get_snapshot(
    pool: &Pool<Sqlite>,
    cfg: &AppConfig,
    gate: &RefreshGate,
) -> ResponseWithStatus {
    match serve_snapshot(pool, cfg, gate).await {
        Ok(snapshot) => ResponseWithStatus::ok(json!(snapshot)),
        Err(err) => {
            warn!("snapshot request failed: {}", err);
            ResponseWithStatus::message(err.status(), err.message())
        }
    }
}

/// Diagnostic pass-through of the upstream card catalog. Not part of the
/// cached-snapshot contract.
pub async fn probe_cards(cfg: &AppConfig) -> ResponseWithStatus {
    match royale::get_cards(cfg).await {
        Ok((StatusCode::OK, body)) => ResponseWithStatus::ok(body),
        Ok((StatusCode::FORBIDDEN, _)) => ResponseWithStatus::message(
            ApiStatus::Forbidden,
            &format!("{}{}", message::MESSAGE_NOT_AUTHORIZED, cfg.token),
        ),
        Ok((StatusCode::NOT_FOUND, _)) => {
            ResponseWithStatus::message(ApiStatus::NotFound, message::MESSAGE_NOT_FOUND)
        }
        Ok((status, _)) => {
            warn!("card probe returned {}", status);
            ResponseWithStatus::message(
                ApiStatus::InternalServerError,
                message::MESSAGE_UNKNOWN_ERROR,
            )
        }
        Err(err) => {
            warn!("card probe failed: {}", err);
            ResponseWithStatus::message(err.status(), err.message())
        }
    }
}
