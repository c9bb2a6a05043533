//! Battle log entries and battle participants.
//!
//! The API nests a battle in two groups, `event` (where it was played) and
//! `battle` (how it went). [`Battle`] merges both into one flat record, `event`
//! first, so `battle` wins when both carry the same key. Participants stay raw
//! until [`Battle::get_battlers`] is called.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::brawlstars::brawler::Brawler;
use crate::brawlstars::mapper::{FromPayload, flatten_prefixed, from_items, merge_groups};
use crate::brawlstars::player::{Player, PlayerRef};
use crate::brawlstars::requester::{Requester, encode_tag};
use crate::brawlstars::timestamp::deserialize_battle_time;
use crate::error::{ApiError, ApiResult};

/// One entry of a player battle log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Battle {
    /// When the battle ended
    #[serde(deserialize_with = "deserialize_battle_time")]
    pub battle_time: Option<DateTime<Utc>>,
    /// Event id
    pub id: u32,
    /// Game mode, e.g. `gemGrab`
    pub mode: String,
    /// Map name
    pub map: String,
    /// e.g. `ranked`, `soloRanked`, `friendly`
    #[serde(rename = "type")]
    pub kind: String,
    /// Missing for showdown battles, which have a `rank` instead
    pub result: Option<BattleResult>,
    /// Duration in seconds
    pub duration: u32,
    /// Trophies won or lost by the requested player
    pub trophy_change: i32,
    /// Final position in showdown modes
    pub rank: Option<u32>,
    star_player: Option<Value>,
    players: Option<Vec<Value>>,
    teams: Option<Vec<Vec<Value>>>,
}

/// Outcome of a team battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleResult {
    Victory,
    Defeat,
    Draw,
    #[serde(other)]
    Unknown,
}

/// A battle participant.
///
/// The `brawler` sub-object of the payload is flattened into `brawler_*` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Battler {
    /// Player tag
    pub tag: String,
    /// In-game name
    pub name: String,
    /// Id of the brawler played
    pub brawler_id: u32,
    /// Name of the brawler played
    pub brawler_name: String,
    /// Power level of the brawler
    pub brawler_power: u32,
    /// Trophies of the brawler before the battle
    pub brawler_trophies: u32,
    /// Trophies won or lost, only set in solo modes
    pub brawler_trophy_change: i32,
}

/// Participants of a battle, grouped by team when the mode has teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Battlers {
    Solo(Vec<Battler>),
    Teams(Vec<Vec<Battler>>),
}

impl FromPayload for Battle {
    fn reshape(mut payload: Map<String, Value>) -> ApiResult<Map<String, Value>> {
        merge_groups(&mut payload, &["event", "battle"])?;
        Ok(payload)
    }
}

impl FromPayload for Battler {
    fn reshape(mut payload: Map<String, Value>) -> ApiResult<Map<String, Value>> {
        flatten_prefixed(&mut payload, "brawler", "brawler_")?;
        Ok(payload)
    }
}

impl Battle {
    /// Requests `players/{tag}/battlelog`, the last 25 battles of a player.
    pub async fn fetch_log<R: Requester>(requester: &R, tag: &str) -> ApiResult<Vec<Battle>> {
        info!("request battle log of player {}", tag);
        let payload = requester
            .get_json(&format!("players/{}/battlelog", encode_tag(tag)))
            .await?;

        let battles: Vec<Battle> = from_items(payload)?;
        debug!("mapped {} battles of player {}", battles.len(), tag);

        Ok(battles)
    }

    /// Materializes the participants.
    ///
    /// `players` is used when present, otherwise `teams` keeps the team grouping.
    /// A battle with neither gives an empty [`Battlers::Solo`].
    pub fn get_battlers(&self) -> ApiResult<Battlers> {
        if let Some(players) = &self.players {
            return Ok(Battlers::Solo(to_battlers(players)?));
        }

        if let Some(teams) = &self.teams {
            let teams = teams
                .iter()
                .map(|team| to_battlers(team))
                .collect::<ApiResult<Vec<_>>>()?;
            return Ok(Battlers::Teams(teams));
        }

        Ok(Battlers::Solo(vec![]))
    }

    /// Tag of the star player, when the battle has one.
    pub fn star_player_tag(&self) -> Option<&str> {
        self.star_player
            .as_ref()
            .and_then(|star| star.get("tag"))
            .and_then(Value::as_str)
    }

    /// The star player as a participant, when the battle has one.
    pub fn star_player(&self) -> ApiResult<Option<Battler>> {
        self.star_player
            .clone()
            .map(Battler::from_payload)
            .transpose()
    }

    /// Requests the full profile of the star player.
    ///
    /// Returns `Ok(None)` without any request when the battle has no star player.
    pub async fn get_star_player<R: Requester>(&self, requester: &R) -> ApiResult<Option<Player>> {
        match self.star_player_tag() {
            Some(tag) => Ok(Some(Player::fetch(requester, tag).await?)),
            None => Ok(None),
        }
    }
}

fn to_battlers(raw: &[Value]) -> ApiResult<Vec<Battler>> {
    raw.iter().cloned().map(Battler::from_payload).collect()
}

impl Battlers {
    /// Every participant, team after team.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Battler> + '_> {
        match self {
            Battlers::Solo(battlers) => Box::new(battlers.iter()),
            Battlers::Teams(teams) => Box::new(teams.iter().flatten()),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerRef for Battler {
    fn player_tag(&self) -> &str {
        &self.tag
    }
}

impl Battler {
    /// Requests the participant's profile and picks the brawler played.
    ///
    /// Fails with [`ApiError::NotFoundLocal`] when the profile no longer lists it.
    pub async fn get_brawler<R: Requester>(&self, requester: &R) -> ApiResult<Brawler> {
        let player = self.get_player(requester).await?;

        player
            .brawlers
            .into_iter()
            .find(|brawler| brawler.id == self.brawler_id)
            .ok_or_else(|| {
                warn!("player {} has no brawler {}", self.tag, self.brawler_id);
                ApiError::NotFoundLocal(format!(
                    "Brawler {} was not found for player {}",
                    self.brawler_id, self.tag
                ))
            })
    }
}

impl fmt::Display for Battle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mode={}, result={:?}", self.mode, self.result)
    }
}

impl fmt::Display for Battler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, brawler_name={}", self.name, self.brawler_name)
    }
}
