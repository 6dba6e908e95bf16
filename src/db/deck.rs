use super::DBResult;
use futures::stream::TryStreamExt;
use sqlx::{Pool, Sqlite};

use crate::model::deck::PlayerRecord;

#[derive(sqlx::FromRow)]
struct DeckRow {
    tag: String,
    name: String,
    rank: i64,
    current_trophies: i64,
    deck: String,
}

impl TryFrom<DeckRow> for PlayerRecord {
    type Error = sqlx::Error;

    fn try_from(row: DeckRow) -> Result<Self, sqlx::Error> {
        let deck = serde_json::from_str(&row.deck).map_err(|e| sqlx::Error::ColumnDecode {
            index: "deck".to_string(),
            source: Box::new(e),
        })?;
        Ok(PlayerRecord {
            tag: row.tag,
            name: row.name,
            rank: row.rank,
            current_trophies: row.current_trophies,
            deck,
        })
    }
}

pub async fn get_decks(pool: &Pool<Sqlite>) -> DBResult<Vec<PlayerRecord>> {
    let mut connection = pool.acquire().await?;
    let decks = sqlx::query_as::<_, DeckRow>(
        r#"
        SELECT tag, name, rank, current_trophies, deck FROM decks;
        "#,
    )
    .fetch(&mut *connection)
    .and_then(|row| async move { PlayerRecord::try_from(row) })
    .try_collect::<Vec<_>>()
    .await?;

    Ok(decks)
}

pub async fn get_timestamp(pool: &Pool<Sqlite>) -> DBResult<Option<i64>> {
    let mut connection = pool.acquire().await?;
    let timestamp = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT timestamp FROM update_time LIMIT 1;
        "#,
    )
    .fetch_optional(&mut *connection)
    .await?;

    Ok(timestamp)
}

/// Swap in a new snapshot generation. The deletes and inserts run in one
/// transaction so readers never observe a half-replaced snapshot.
pub async fn replace_snapshot(
    pool: &Pool<Sqlite>,
    records: &[PlayerRecord],
    timestamp: i64,
) -> DBResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM decks;").execute(&mut *tx).await?;
    for record in records {
        let deck = serde_json::to_string(&record.deck)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        sqlx::query(
            r#"
            INSERT INTO decks (tag, name, rank, current_trophies, deck) VALUES ($1, $2, $3, $4, $5);
            "#,
        )
        .bind(&record.tag)
        .bind(&record.name)
        .bind(record.rank)
        .bind(record.current_trophies)
        .bind(deck)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("DELETE FROM update_time;").execute(&mut *tx).await?;
    sqlx::query("INSERT INTO update_time (timestamp) VALUES ($1);")
        .bind(timestamp)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
