use rocket::serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached player: identity, current-season standing, and the card
/// names of the deck they are running right now.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(crate = "rocket::serde")]
pub struct PlayerRecord {
    pub tag: String,
    pub name: String,
    pub rank: i64,
    pub current_trophies: i64,
    pub deck: Vec<String>,
}

/// Body of `GET /`: every cached record plus the time they were fetched.
#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SnapshotResponse {
    pub data: Vec<PlayerRecord>,
    pub timestamp: i64,
}

impl PlayerRecord {
    /// Flatten a full player payload into a record. Returns `None` when
    /// the payload has no `tag` or no current-season league statistics,
    /// in which case the caller skips the player.
    pub fn from_player(player: &Value) -> Option<Self> {
        let tag = player.get("tag")?.as_str()?.to_string();
        let name = player.get("name")?.as_str()?.to_string();
        let season = player.get("leagueStatistics")?.get("currentSeason")?;
        let rank = season.get("rank")?.as_i64()?;
        let current_trophies = season.get("trophies")?.as_i64()?;
        let deck = make_deck_array(player.get("currentDeck")?);

        Some(Self {
            tag,
            name,
            rank,
            current_trophies,
            deck,
        })
    }
}

/// Card names only, in deck order. Every other card attribute is dropped.
fn make_deck_array(cards: &Value) -> Vec<String> {
    cards
        .as_array()
        .map(|cards| {
            cards
                .iter()
                .filter_map(|card| card.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_player() -> Value {
        json!({
            "tag": "#2PP",
            "name": "Mugi",
            "expLevel": 14,
            "leagueStatistics": {
                "currentSeason": { "rank": 1, "trophies": 7801 },
                "previousSeason": { "rank": 4, "trophies": 7430 }
            },
            "currentDeck": [
                { "name": "Knight", "id": 26000000, "level": 14 },
                { "name": "Archers", "id": 26000001, "level": 13 },
                { "name": "Fireball", "id": 28000000, "level": 14 },
                { "name": "Zap", "id": 28000004, "level": 14 },
                { "name": "Hog Rider", "id": 26000021, "level": 14 },
                { "name": "Cannon", "id": 27000000, "level": 13 },
                { "name": "Ice Spirit", "id": 26000030, "level": 13 },
                { "name": "Skeletons", "id": 26000010, "level": 14 }
            ]
        })
    }

    #[test]
    fn flattens_full_payload() {
        let record = PlayerRecord::from_player(&sample_player()).expect("record");
        assert_eq!(record.tag, "#2PP");
        assert_eq!(record.name, "Mugi");
        assert_eq!(record.rank, 1);
        assert_eq!(record.current_trophies, 7801);
        assert_eq!(record.deck.len(), 8);
    }

    #[test]
    fn deck_keeps_card_names_only_in_order() {
        let record = PlayerRecord::from_player(&sample_player()).expect("record");
        assert_eq!(record.deck[0], "Knight");
        assert_eq!(record.deck[4], "Hog Rider");
        assert_eq!(record.deck[7], "Skeletons");
    }

    #[test]
    fn missing_tag_yields_no_record() {
        let mut player = sample_player();
        player.as_object_mut().unwrap().remove("tag");
        assert!(PlayerRecord::from_player(&player).is_none());
    }

    #[test]
    fn missing_league_statistics_yields_no_record() {
        let mut player = sample_player();
        player.as_object_mut().unwrap().remove("leagueStatistics");
        assert!(PlayerRecord::from_player(&player).is_none());
    }

    #[test]
    fn cards_without_a_name_are_dropped() {
        let mut player = sample_player();
        player["currentDeck"][2] = json!({ "id": 28000000 });
        let record = PlayerRecord::from_player(&player).expect("record");
        assert_eq!(record.deck.len(), 7);
        assert!(!record.deck.contains(&"Fireball".to_string()));
    }
}
