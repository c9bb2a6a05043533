//! Leaderboard rows from the `rankings` endpoints.
//!
//! Every row is stamped with the region code that produced it.

use std::fmt;

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::brawlstars::club::Club;
use crate::brawlstars::mapper::{FromPayload, contract, items};
use crate::brawlstars::player::PlayerRef;
use crate::brawlstars::requester::Requester;
use crate::error::ApiResult;

/// Region code of the worldwide leaderboards.
pub const GLOBAL_REGION: &str = "global";

/// A row of a club leaderboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankedClub {
    /// Club tag
    pub tag: String,
    /// Club name
    pub name: String,
    /// Badge icon id
    pub badge_id: u32,
    /// Club trophies
    pub trophies: u32,
    /// Position in the leaderboard, from 1
    pub rank: u32,
    /// Number of members
    pub member_count: u32,
    /// Upper-cased region code of the leaderboard
    pub region: String,
}

/// A row of a player or brawler leaderboard.
///
/// Only the club name is kept, a ranked player cannot navigate to its club.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankedPlayer {
    /// Player tag
    pub tag: String,
    /// In-game name
    pub name: String,
    /// Name color as `0xAARRGGBB`
    pub name_color: String,
    /// Profile icon id
    pub icon: u32,
    /// Trophies, of the brawler on a brawler leaderboard
    pub trophies: u32,
    /// Position in the leaderboard, from 1
    pub rank: u32,
    /// Name of the player club, empty without one
    pub club_name: String,
    /// Upper-cased region code of the leaderboard
    pub region: String,
}

impl FromPayload for RankedClub {}

impl FromPayload for RankedPlayer {
    fn reshape(mut payload: Map<String, Value>) -> ApiResult<Map<String, Value>> {
        contract(&mut payload, "club", "name", "club_name")?;
        contract(&mut payload, "icon", "id", "icon")?;
        Ok(payload)
    }
}

/// Upper-cases a region code for paths and rows.
pub fn region_code(region: &str) -> String {
    region.to_uppercase()
}

/// Requests one leaderboard page at `path` and maps its rows.
pub(crate) async fn fetch_rows<T, R>(requester: &R, path: &str, region: &str) -> ApiResult<Vec<T>>
where
    T: FromPayload,
    R: Requester,
{
    info!("request leaderboard {}", path);
    let payload = requester.get_json(path).await?;

    items(payload)?
        .into_iter()
        .map(|mut row| {
            if let Value::Object(map) = &mut row {
                map.insert("region".to_string(), Value::String(region.to_string()));
            }
            T::from_payload(row)
        })
        .collect()
}

impl RankedClub {
    /// Requests the full club of this row.
    pub async fn get_club<R: Requester>(&self, requester: &R) -> ApiResult<Club> {
        Club::fetch(requester, &self.tag).await
    }
}

impl PlayerRef for RankedPlayer {
    fn player_tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for RankedClub {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, rank={}", self.name, self.rank)
    }
}

impl fmt::Display for RankedPlayer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, rank={}", self.name, self.rank)
    }
}
