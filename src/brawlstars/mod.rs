//! Brawl Stars API integration.
//!
//! This module maps the API's JSON onto typed entities and lets every entity
//! request the entities it refers to.
//!
//! # Modules
//!
//! - `requester` - HTTP transport, bearer authentication and status classification
//! - `mapper` - Key normalization and the reshape rules applied before deserialization
//! - `timestamp` - Parser for the compact battle timestamps
//! - `player`, `brawler`, `club`, `battle`, `ranking` - Entities and their navigation methods
//! - `client` - The [`BrawlClient`] facade
//!
//! # Data flow
//!
//! ```text
//! BrawlClient ─► Requester (GET) ─► raw JSON ─► FromPayload ─► entity
//!                     ▲                                           │
//!                     └────────── navigation methods ◄────────────┘
//! ```

mod battle;
mod brawler;
mod client;
mod club;
mod mapper;
mod player;
mod ranking;
mod requester;
mod timestamp;

pub use crate::brawlstars::battle::{Battle, BattleResult, Battler, Battlers};
pub use crate::brawlstars::brawler::{Accessory, Brawler, BrawlerInfo};
pub use crate::brawlstars::client::BrawlClient;
pub use crate::brawlstars::club::{Club, ClubType, Member, Role};
pub use crate::brawlstars::mapper::{FromPayload, normalize_key, normalize_keys};
pub use crate::brawlstars::player::{ICON_URL, Player, PlayerRef};
pub use crate::brawlstars::ranking::{GLOBAL_REGION, RankedClub, RankedPlayer, region_code};
// the mock is public so that downstream crates, the `bs-api` binary included,
// can test their own code against `Requester`
pub use crate::brawlstars::requester::{
    API_URL, BsRequester, MockRequester, Requester, encode_tag,
};
pub use crate::brawlstars::timestamp::parse_battle_time;
