//! Entry point of the library.
//!
//! [`BrawlClient`] exposes the public operations of the API. It also implements
//! [`Requester`], so it can be handed to any navigation method of an entity.

use log::{debug, info, warn};
use serde_json::Value;

use crate::brawlstars::battle::Battle;
use crate::brawlstars::brawler::BrawlerInfo;
use crate::brawlstars::club::{Club, Member, member_not_found};
use crate::brawlstars::mapper::from_items;
use crate::brawlstars::player::Player;
use crate::brawlstars::ranking::{RankedClub, RankedPlayer, fetch_rows, region_code};
use crate::brawlstars::requester::{BsRequester, Requester};
use crate::error::ApiResult;
use crate::utils::capitalize;

/// Client of the Brawl Stars API.
///
/// Every call performs its own request; nothing is cached and nothing is
/// retried.
///
/// # Examples
///
/// ```no_run
/// use bs_api::{BrawlClient, GLOBAL_REGION};
///
/// # async fn example() -> Result<(), bs_api::ApiError> {
/// let client = BrawlClient::new("your_api_token");
///
/// let player = client.get_player("#8VJVG4PVC").await?;
/// if let Some(club) = player.get_club(&client).await? {
///     println!("{} plays in {}", player.name, club.name);
/// }
///
/// let top = client.get_ranking_players(GLOBAL_REGION).await?;
/// println!("{} players ranked", top.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BrawlClient<R = BsRequester> {
    requester: R,
}

impl BrawlClient<BsRequester> {
    /// Create a new [BrawlClient] against the official API.
    ///
    /// # Arguments
    ///
    /// * `token` - The API token of the developer account.
    pub fn new(token: &str) -> Self {
        Self::with_requester(BsRequester::new(token))
    }
}

impl<R: Requester> BrawlClient<R> {
    /// Create a new [BrawlClient] on top of any [Requester].
    pub fn with_requester(requester: R) -> Self {
        BrawlClient { requester }
    }

    /// Requests a player profile by tag.
    pub async fn get_player(&self, tag: &str) -> ApiResult<Player> {
        Player::fetch(&self.requester, tag).await
    }

    /// Requests the last 25 battles of a player.
    ///
    /// A new battle can take up to 30 minutes to show up.
    pub async fn get_player_battlelog(&self, tag: &str) -> ApiResult<Vec<Battle>> {
        Battle::fetch_log(&self.requester, tag).await
    }

    /// Requests a club by tag.
    pub async fn get_club(&self, tag: &str) -> ApiResult<Club> {
        Club::fetch(&self.requester, tag).await
    }

    /// Requests a club and returns its roster.
    pub async fn get_club_members(&self, tag: &str) -> ApiResult<Vec<Member>> {
        Ok(self.get_club(tag).await?.members)
    }

    /// Requests a club, finds a member by name or tag, then requests that
    /// member's profile.
    ///
    /// See [`Club::find_member`] for the query rules. Fails with
    /// [`crate::ApiError::NotFoundLocal`] when no member matches.
    pub async fn get_player_by_club(&self, club_tag: &str, query: &str) -> ApiResult<Player> {
        let club = self.get_club(club_tag).await?;

        match club.find_member(query) {
            Some(member) => {
                debug!("{} matches member {} of club {}", query, member.tag, club.tag);
                self.get_player(&member.tag).await
            }
            None => {
                warn!("no member of club {} matches {}", club.tag, query);
                Err(member_not_found(query))
            }
        }
    }

    /// Requests the club leaderboard of a region (`global` or a country code).
    pub async fn get_ranking_clubs(&self, region: &str) -> ApiResult<Vec<RankedClub>> {
        let region = region_code(region);
        fetch_rows(&self.requester, &format!("rankings/{}/clubs", region), &region).await
    }

    /// Requests the player leaderboard of a region (`global` or a country code).
    pub async fn get_ranking_players(&self, region: &str) -> ApiResult<Vec<RankedPlayer>> {
        let region = region_code(region);
        fetch_rows(&self.requester, &format!("rankings/{}/players", region), &region).await
    }

    /// Requests the leaderboard of one brawler in a region.
    ///
    /// Brawler ids can be resolved with [`BrawlClient::get_brawler_id_by_name`].
    pub async fn get_ranking_by_brawler_id(
        &self,
        brawler_id: u32,
        region: &str,
    ) -> ApiResult<Vec<RankedPlayer>> {
        let region = region_code(region);
        let path = format!("rankings/{}/brawlers/{}", region, brawler_id);
        fetch_rows(&self.requester, &path, &region).await
    }

    /// Requests the catalog of every brawler in the game.
    pub async fn get_brawlers(&self) -> ApiResult<Vec<BrawlerInfo>> {
        info!("request brawler catalog");
        let payload = self.requester.get_json("brawlers").await?;
        from_items(payload)
    }

    /// Finds the id of the first catalog brawler whose name contains `name`,
    /// ignoring case. `Ok(None)` when nothing matches.
    pub async fn get_brawler_id_by_name(&self, name: &str) -> ApiResult<Option<u32>> {
        let name = name.to_lowercase();
        let id = self
            .get_brawlers()
            .await?
            .into_iter()
            .find(|brawler| brawler.name.to_lowercase().contains(&name))
            .map(|brawler| brawler.id);

        if id.is_none() {
            warn!("no brawler matches {}", name);
        }
        Ok(id)
    }

    /// Finds the capitalised name of a catalog brawler. `Ok(None)` when the id
    /// is unknown.
    pub async fn get_name_by_brawler_id(&self, brawler_id: u32) -> ApiResult<Option<String>> {
        let name = self
            .get_brawlers()
            .await?
            .into_iter()
            .find(|brawler| brawler.id == brawler_id)
            .map(|brawler| capitalize(&brawler.name));

        if name.is_none() {
            warn!("no brawler has id {}", brawler_id);
        }
        Ok(name)
    }
}

impl<R: Requester> Requester for BrawlClient<R> {
    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        self.requester.get_json(path).await
    }

    async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        self.requester.get_bytes(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brawlstars::requester::MockRequester;
    use crate::error::ApiError;
    use mockall::predicate::eq;
    use serde_json::json;

    fn club_payload() -> Value {
        json!({
            "tag": "#2PP",
            "name": "The Club",
            "members": [
                {"tag": "#AAA", "name": "Alice", "role": "president"},
                {"tag": "#8VLVG8PCJ", "name": "[XYZ] Roky", "role": "member"},
                {"tag": "#BBB", "name": "Bob", "role": "senior"}
            ]
        })
    }

    fn catalog_payload() -> Value {
        json!({"items": [
            {"id": 16000000, "name": "SHELLY"},
            {"id": 16000001, "name": "COLT"},
            {"id": 16000010, "name": "EL PRIMO"}
        ]})
    }

    #[tokio::test]
    async fn test_get_player_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/players/%23X")
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"tag":"#X","name":"N"}"##)
            .create_async()
            .await;

        let client = BrawlClient::with_requester(BsRequester::with_url(&server.url(), "token"));
        let player = client.get_player("#X").await.unwrap();

        assert_eq!(player.tag, "#X");
        assert_eq!(player.name, "N");
        assert_eq!(player.trophies, 0);
    }

    #[tokio::test]
    async fn test_get_player_not_found_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/players/%23X")
            .with_status(404)
            .create_async()
            .await;

        let client = BrawlClient::with_requester(BsRequester::with_url(&server.url(), "token"));
        let result = client.get_player("#X").await;

        assert!(matches!(result, Err(ApiError::ResourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_player_rate_limited_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/players/%23X")
            .with_status(429)
            .create_async()
            .await;

        let client = BrawlClient::with_requester(BsRequester::with_url(&server.url(), "token"));
        let result = client.get_player("X").await;

        assert!(matches!(result, Err(ApiError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_get_player_battlelog() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("players/%23AAA/battlelog"))
            .times(1)
            .returning(|_| {
                Ok(json!({"items": [{
                    "battleTime": "20230115T142233.000Z",
                    "event": {"mode": "heist"},
                    "battle": {"result": "defeat"}
                }]}))
            });

        let client = BrawlClient::with_requester(requester);
        let battles = client.get_player_battlelog("#AAA").await.unwrap();

        assert_eq!(battles.len(), 1);
        assert_eq!(battles[0].mode, "heist");
    }

    #[tokio::test]
    async fn test_get_club_members() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("clubs/%232PP"))
            .times(1)
            .returning(|_| Ok(club_payload()));

        let client = BrawlClient::with_requester(requester);
        let members = client.get_club_members("#2PP").await.unwrap();

        let tags: Vec<&str> = members.iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, vec!["#AAA", "#8VLVG8PCJ", "#BBB"]);
    }

    #[tokio::test]
    async fn test_get_player_by_club() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("clubs/%232PP"))
            .times(1)
            .returning(|_| Ok(club_payload()));
        requester
            .expect_get_json()
            .with(eq("players/%238VLVG8PCJ"))
            .times(1)
            .returning(|_| {
                Ok(json!({"tag": "#8VLVG8PCJ", "name": "[XYZ] Roky", "trophies": 41000}))
            });

        let client = BrawlClient::with_requester(requester);
        let player = client.get_player_by_club("#2PP", "Roky").await.unwrap();

        assert_eq!(player.name, "[XYZ] Roky");
        assert_eq!(player.tag, "#8VLVG8PCJ");
        assert_eq!(player.trophies, 41000);
    }

    #[tokio::test]
    async fn test_get_player_by_club_by_tag() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("clubs/%232PP"))
            .times(1)
            .returning(|_| Ok(club_payload()));
        requester
            .expect_get_json()
            .with(eq("players/%23BBB"))
            .times(1)
            .returning(|_| Ok(json!({"tag": "#BBB", "name": "Bob"})));

        let client = BrawlClient::with_requester(requester);
        let player = client.get_player_by_club("#2PP", "#BBB").await.unwrap();

        assert_eq!(player.name, "Bob");
    }

    #[tokio::test]
    async fn test_get_player_by_club_no_match() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("clubs/%232PP"))
            .times(1)
            .returning(|_| Ok(club_payload()));

        let client = BrawlClient::with_requester(requester);
        let result = client.get_player_by_club("#2PP", "Nobody").await;

        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::NotFoundLocal(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_ranking_clubs() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("rankings/FR/clubs"))
            .times(1)
            .returning(|_| Ok(json!({"items": [{"tag": "#C1", "rank": 1, "memberCount": 30}]})));

        let client = BrawlClient::with_requester(requester);
        let rows = client.get_ranking_clubs("fr").await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region, "FR");
        assert_eq!(rows[0].member_count, 30);
    }

    #[tokio::test]
    async fn test_get_ranking_players() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("rankings/GLOBAL/players"))
            .times(1)
            .returning(|_| {
                Ok(json!({"items": [
                    {"tag": "#P1", "rank": 1, "club": {"name": "Top"}},
                    {"tag": "#P2", "rank": 2}
                ]}))
            });

        let client = BrawlClient::with_requester(requester);
        let rows = client.get_ranking_players(crate::GLOBAL_REGION).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].club_name, "Top");
        assert!(rows.iter().all(|row| row.region == "GLOBAL"));
    }

    #[tokio::test]
    async fn test_get_ranking_by_brawler_id() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("rankings/US/brawlers/16000000"))
            .times(1)
            .returning(|_| Ok(json!({"items": [{"tag": "#P1", "trophies": 1250, "rank": 1}]})));

        let client = BrawlClient::with_requester(requester);
        let rows = client.get_ranking_by_brawler_id(16000000, "us").await.unwrap();

        assert_eq!(rows[0].trophies, 1250);
        assert_eq!(rows[0].region, "US");
    }

    #[tokio::test]
    async fn test_get_brawler_id_by_name() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("brawlers"))
            .times(3)
            .returning(|_| Ok(catalog_payload()));

        let client = BrawlClient::with_requester(requester);

        assert_eq!(client.get_brawler_id_by_name("ShElLy").await.unwrap(), Some(16000000));
        assert_eq!(client.get_brawler_id_by_name("primo").await.unwrap(), Some(16000010));
        assert_eq!(client.get_brawler_id_by_name("leon").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_name_by_brawler_id() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("brawlers"))
            .times(2)
            .returning(|_| Ok(catalog_payload()));

        let client = BrawlClient::with_requester(requester);

        assert_eq!(
            client.get_name_by_brawler_id(16000010).await.unwrap(),
            Some("El primo".to_string())
        );
        assert_eq!(client.get_name_by_brawler_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_catalog_error_is_propagated() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .returning(|_| Err(ApiError::service_unavailable()));

        let client = BrawlClient::with_requester(requester);
        let result = client.get_brawler_id_by_name("shelly").await;

        assert!(matches!(result, Err(ApiError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_client_as_requester_for_navigation() {
        let mut requester = MockRequester::new();
        requester
            .expect_get_json()
            .with(eq("players/%23AAA"))
            .times(1)
            .returning(|_| Ok(json!({"tag": "#AAA", "club": {"tag": "#2PP", "name": "The Club"}})));
        requester
            .expect_get_json()
            .with(eq("clubs/%232PP"))
            .times(1)
            .returning(|_| Ok(club_payload()));

        let client = BrawlClient::with_requester(requester);
        let player = client.get_player("#AAA").await.unwrap();
        let club = player.get_club(&client).await.unwrap().unwrap();

        assert_eq!(club.members.len(), 3);
    }
}
