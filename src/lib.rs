//! bs_api - An async client for the Brawl Stars statistics API.
//!
//! The client issues authenticated GET requests, maps the JSON answers onto typed
//! entities and lets each entity fetch the entities it points to: a player's
//! club, a club member's profile, a battle's participants, a leaderboard row's
//! club.
//!
//! # Overview
//!
//! - [`BrawlClient`] is the entry point: players, battle logs, clubs, leaderboards
//!   and the brawler catalog.
//! - Entities ([`Player`], [`Club`], [`Member`], [`Battle`], [`Battler`],
//!   [`RankedClub`], [`RankedPlayer`]) are plain values. Their navigation
//!   methods take any [`Requester`], the client included, and always perform a
//!   new request.
//! - Errors are reported with [`ApiError`], one variant per API status plus
//!   local parsing and search failures.
//!
//! # Examples
//!
//! ```no_run
//! use bs_api::BrawlClient;
//!
//! # async fn example() -> Result<(), bs_api::ApiError> {
//! let client = BrawlClient::new("your_api_token");
//!
//! let player = client.get_player("#8VJVG4PVC").await?;
//! println!("{} has {} trophies", player.name, player.trophies);
//!
//! for battle in player.get_battlelog(&client).await? {
//!     println!("{}", battle);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate logs through the `log` facade: one `info` line per request,
//! request URLs and decoded payloads at `debug`. The API token is never logged.

pub mod brawlstars;
pub mod error;
pub mod utils;

pub use crate::brawlstars::*;
pub use crate::error::{ApiError, ApiResult};
