//! Player profiles and the navigation they offer.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Deserializer};
use tokio::fs;

use crate::brawlstars::battle::Battle;
use crate::brawlstars::brawler::Brawler;
use crate::brawlstars::club::Club;
use crate::brawlstars::mapper::FromPayload;
use crate::brawlstars::requester::{Requester, encode_tag};
use crate::error::ApiResult;
use crate::utils::png_path;

/// Host of the profile icon images.
pub const ICON_URL: &str = "https://cdn.brawlify.com/profile-icons/regular";

/// A player profile from `players/{tag}`.
///
/// The club and the icon are only kept as references. [`Player::get_club`] and
/// [`Player::get_bytes_icon_image`] resolve them with a new request each time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Player {
    /// Unique player tag, e.g. `#8VJVG4PVC`
    pub tag: String,
    /// In-game name
    pub name: String,
    /// Name color as `0xAARRGGBB`
    pub name_color: String,
    /// Current trophy count
    pub trophies: u32,
    /// Best trophy count ever reached
    pub highest_trophies: u32,
    /// Experience level
    pub exp_level: u32,
    /// Experience points
    pub exp_points: u32,
    /// Whether the player qualified through the championship challenge
    pub is_qualified_from_championship_challenge: bool,
    /// Solo showdown wins
    pub solo_victories: u32,
    /// Duo showdown wins
    pub duo_victories: u32,
    /// Best Robo Rumble level reached
    pub best_robo_rumble_time: u32,
    /// Best survival time as the Big Brawler, in seconds
    pub best_time_as_big_brawler: u32,
    #[serde(rename = "3vs3_victories")]
    victories_3vs3: u32,
    #[serde(deserialize_with = "deserialize_club_ref")]
    club: Option<ClubRef>,
    icon: IconRef,
    /// Every brawler unlocked by the player
    pub brawlers: Vec<Brawler>,
}

/// Tag and name of the club a player belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct ClubRef {
    tag: String,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct IconRef {
    id: u32,
}

/// Clubless players come with `"club": {}`, which is read as no club.
fn deserialize_club_ref<'de, D>(deserializer: D) -> Result<Option<ClubRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let club: Option<ClubRef> = Option::deserialize(deserializer)?;
    Ok(club.filter(|club| !club.tag.is_empty()))
}

impl FromPayload for Player {}

impl Player {
    /// Requests `players/{tag}`.
    ///
    /// # Arguments
    ///
    /// * `requester` - The transport used for the request.
    /// * `tag` - The player tag, with or without the leading `#`.
    pub async fn fetch<R: Requester>(requester: &R, tag: &str) -> ApiResult<Player> {
        info!("request player {}", tag);
        let payload = requester
            .get_json(&format!("players/{}", encode_tag(tag)))
            .await?;

        let player = Player::from_payload(payload)?;
        debug!("mapped player {}", player);

        Ok(player)
    }

    /// Victories in 3vs3 modes, read from the `3vs3Victories` key.
    pub fn victories_3vs3(&self) -> u32 {
        self.victories_3vs3
    }

    /// Tag of the player's club, `None` when the player has no club.
    pub fn club_tag(&self) -> Option<&str> {
        self.club.as_ref().map(|club| club.tag.as_str())
    }

    /// Name of the player's club, `None` when the player has no club.
    pub fn club_name(&self) -> Option<&str> {
        self.club.as_ref().map(|club| club.name.as_str())
    }

    pub fn icon_id(&self) -> u32 {
        self.icon.id
    }

    /// URL of the player's profile icon image.
    pub fn icon_url(&self) -> String {
        format!("{}/{}.png", ICON_URL, self.icon.id)
    }

    /// Requests the player's club.
    ///
    /// Returns `Ok(None)` without any request when the player has no club.
    pub async fn get_club<R: Requester>(&self, requester: &R) -> ApiResult<Option<Club>> {
        match self.club_tag() {
            Some(tag) => Ok(Some(Club::fetch(requester, tag).await?)),
            None => {
                debug!("player {} has no club", self.tag);
                Ok(None)
            }
        }
    }

    /// Requests the last 25 battles of the player.
    pub async fn get_battlelog<R: Requester>(&self, requester: &R) -> ApiResult<Vec<Battle>> {
        Battle::fetch_log(requester, &self.tag).await
    }

    /// Requests the bytes of the player's profile icon.
    pub async fn get_bytes_icon_image<R: Requester>(&self, requester: &R) -> ApiResult<Vec<u8>> {
        info!("request icon {} of player {}", self.icon.id, self.tag);
        requester.get_bytes(&self.icon_url()).await
    }

    /// Downloads the player's profile icon to `{path}.png`.
    ///
    /// An existing file is overwritten; missing directories are not created.
    pub async fn download_icon_image<R: Requester>(
        &self,
        requester: &R,
        path: &str,
    ) -> ApiResult<()> {
        let bytes = self.get_bytes_icon_image(requester).await?;
        let path = png_path(path);
        fs::write(&path, bytes).await?;
        info!("saved icon of player {} to {}", self.tag, path.display());

        Ok(())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, tag={}", self.name, self.tag)
    }
}

/// Entities that point at a player profile by tag.
///
/// Club members, battle participants and leaderboard rows all carry a player
/// tag and can resolve it to the full [`Player`].
#[allow(async_fn_in_trait)]
pub trait PlayerRef {
    /// Tag of the referenced player.
    fn player_tag(&self) -> &str;

    /// Requests the full profile of the referenced player.
    async fn get_player<R: Requester>(&self, requester: &R) -> ApiResult<Player> {
        Player::fetch(requester, self.player_tag()).await
    }
}
