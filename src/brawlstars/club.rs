//! Clubs and their members.

use std::fmt;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::brawlstars::mapper::FromPayload;
use crate::brawlstars::player::{Player, PlayerRef};
use crate::brawlstars::requester::{Requester, encode_tag};
use crate::error::{ApiError, ApiResult};

/// A club from `clubs/{tag}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Club {
    /// Unique club tag
    pub tag: String,
    /// Club name
    pub name: String,
    /// Free text shown on the club page
    pub description: String,
    /// Membership policy
    #[serde(rename = "type")]
    pub kind: ClubType,
    /// Badge icon id
    pub badge_id: u32,
    /// Trophies needed to join
    pub required_trophies: u32,
    /// Sum of the member trophies
    pub trophies: u32,
    /// Members in payload order
    pub members: Vec<Member>,
}

/// Membership policy of a club.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClubType {
    Open,
    Closed,
    InviteOnly,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An entry of a club roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Member {
    /// Player tag of the member
    pub tag: String,
    /// In-game name
    pub name: String,
    /// Name color as `0xAARRGGBB`
    pub name_color: String,
    /// Role inside the club
    pub role: Role,
    /// Current trophy count
    pub trophies: u32,
}

/// Role of a member inside its club.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    #[default]
    Member,
    Senior,
    VicePresident,
    President,
    #[serde(other)]
    Unknown,
}

impl FromPayload for Club {}

impl FromPayload for Member {}

impl Club {
    /// Requests `clubs/{tag}`.
    ///
    /// # Arguments
    ///
    /// * `requester` - The transport used for the request.
    /// * `tag` - The club tag, with or without the leading `#`.
    pub async fn fetch<R: Requester>(requester: &R, tag: &str) -> ApiResult<Club> {
        info!("request club {}", tag);
        let payload = requester
            .get_json(&format!("clubs/{}", encode_tag(tag)))
            .await?;

        let club = Club::from_payload(payload)?;
        debug!("mapped club {} with {} members", club, club.members.len());

        Ok(club)
    }

    /// Finds the first member matching `query`, in roster order.
    ///
    /// A query starting with `#` is searched in member tags, any other query in
    /// member names. Both searches are case sensitive substring matches.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bs_api::{Club, Member};
    /// let club = Club {
    ///     members: vec![Member { tag: "#8VLVG8PCJ".to_string(), name: "[XYZ] Roky".to_string(), ..Default::default() }],
    ///     ..Default::default()
    /// };
    /// assert!(club.find_member("Roky").is_some());
    /// assert!(club.find_member("#8VLV").is_some());
    /// assert!(club.find_member("roky").is_none());
    /// ```
    pub fn find_member(&self, query: &str) -> Option<&Member> {
        self.members.iter().find(|member| {
            if query.starts_with('#') {
                member.tag.contains(query)
            } else {
                member.name.contains(query)
            }
        })
    }

    /// Finds a member with [`Club::find_member`] and requests its full profile.
    ///
    /// Fails with [`ApiError::NotFoundLocal`] when no member matches.
    pub async fn get_player_by_search<R: Requester>(
        &self,
        requester: &R,
        query: &str,
    ) -> ApiResult<Player> {
        match self.find_member(query) {
            Some(member) => member.get_player(requester).await,
            None => {
                warn!("no member of club {} matches {}", self.tag, query);
                Err(member_not_found(query))
            }
        }
    }
}

pub(crate) fn member_not_found(query: &str) -> ApiError {
    ApiError::NotFoundLocal(format!("Member was not found: {}", query))
}

impl PlayerRef for Member {
    fn player_tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, tag={}", self.name, self.tag)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, role={:?}", self.name, self.role)
    }
}
