use reqwest::StatusCode;
use serde_json::Value;
use tracing::warn;

use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::util;

pub static RANKINGS_PATH: &str = "/locations/global/rankings/players";
pub static PLAYERS_PATH: &str = "/players";
pub static CARDS_PATH: &str = "/cards";

/// Fetch the global player ranking. `Ok(None)` when upstream answers with
/// a non-success status; the caller keeps whatever snapshot it has.
pub async fn get_rankings(cfg: &AppConfig) -> ApiResult<Option<Value>> {
    let url = format!("{}{}", cfg.base_url, RANKINGS_PATH);
    let resp = reqwest::Client::new()
        .get(&url)
        .headers(util::header::get_common_header(&cfg.token))
        .send()
        .await?;

    if resp.status() != StatusCode::OK {
        warn!("ranking fetch returned {}", resp.status());
        return Ok(None);
    }
    Ok(Some(resp.json::<Value>().await?))
}

/// Fetch full detail for one player. `Ok(None)` when upstream answers
/// with a non-success status for that tag.
pub async fn get_player(cfg: &AppConfig, tag: &str) -> ApiResult<Option<Value>> {
    // tags look like "#2PP"; the hash must be percent-encoded in the path
    let url = format!(
        "{}{}/{}",
        cfg.base_url,
        PLAYERS_PATH,
        tag.replace('#', "%23")
    );
    let resp = reqwest::Client::new()
        .get(&url)
        .headers(util::header::get_common_header(&cfg.token))
        .send()
        .await?;

    if resp.status() != StatusCode::OK {
        warn!("player fetch for {} returned {}", tag, resp.status());
        return Ok(None);
    }
    Ok(Some(resp.json::<Value>().await?))
}

/// Raw card-catalog fetch backing the diagnostic endpoint. Returns the
/// upstream status together with the parsed body.
pub async fn get_cards(cfg: &AppConfig) -> ApiResult<(StatusCode, Value)> {
    let url = format!("{}{}", cfg.base_url, CARDS_PATH);
    let resp = reqwest::Client::new()
        .get(&url)
        .headers(util::header::get_common_header(&cfg.token))
        .send()
        .await?;

    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}
