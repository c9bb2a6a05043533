//! Brawler statistics and the static brawler catalog.

use std::fmt;

use serde::Deserialize;

use crate::brawlstars::mapper::FromPayload;

/// One brawler as owned by a player profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Brawler {
    /// Stable brawler id, e.g. `16000000`
    pub id: u32,
    /// Upper-case name, e.g. `SHELLY`
    pub name: String,
    /// Power level, 1 to 11
    pub power: u32,
    /// Rank reached with the brawler
    pub rank: u32,
    /// Current trophy count
    pub trophies: u32,
    /// Best trophy count ever reached
    pub highest_trophies: u32,
    /// Equipped gears
    pub gears: Vec<Accessory>,
    /// Unlocked star powers
    pub star_powers: Vec<Accessory>,
    /// Unlocked gadgets
    pub gadgets: Vec<Accessory>,
}

impl FromPayload for Brawler {}

impl fmt::Display for Brawler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name={}, trophies={}", self.name, self.trophies)
    }
}

/// A gear, star power or gadget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Accessory {
    /// Accessory id
    pub id: u32,
    /// Upper-case name
    pub name: String,
    /// Only gears have a level.
    pub level: Option<u32>,
}

/// An entry of the `brawlers` catalog.
///
/// Lists what a brawler can unlock, independently of any player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrawlerInfo {
    /// Stable brawler id
    pub id: u32,
    /// Upper-case name
    pub name: String,
    /// Star powers the brawler can unlock
    pub star_powers: Vec<Accessory>,
    /// Gadgets the brawler can unlock
    pub gadgets: Vec<Accessory>,
}

impl FromPayload for BrawlerInfo {}

impl fmt::Display for BrawlerInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id={}, name={}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brawler_from_payload() {
        let brawler = Brawler::from_payload(json!({
            "id": 16000000,
            "name": "SHELLY",
            "power": 11,
            "rank": 25,
            "trophies": 750,
            "highestTrophies": 812,
            "gears": [{"id": 62000000, "name": "SPEED", "level": 3}],
            "starPowers": [{"id": 23000076, "name": "SHELL SHOCK"}],
            "gadgets": []
        }))
        .unwrap();

        assert_eq!(brawler.id, 16000000);
        assert_eq!(brawler.name, "SHELLY");
        assert_eq!(brawler.highest_trophies, 812);
        assert_eq!(brawler.gears[0].level, Some(3));
        assert_eq!(brawler.star_powers[0].name, "SHELL SHOCK");
        assert_eq!(brawler.star_powers[0].level, None);
        assert!(brawler.gadgets.is_empty());
    }

    #[test]
    fn test_brawler_defaults() {
        let brawler = Brawler::from_payload(json!({"id": 16000001})).unwrap();

        assert_eq!(brawler.id, 16000001);
        assert_eq!(brawler.name, "");
        assert_eq!(brawler.power, 0);
        assert_eq!(brawler.trophies, 0);
        assert!(brawler.gears.is_empty());
        assert!(brawler.star_powers.is_empty());
    }

    #[test]
    fn test_brawler_info_defaults() {
        let info = BrawlerInfo::from_payload(json!({"name": "BULL"})).unwrap();

        assert_eq!(info.id, 0);
        assert_eq!(info.name, "BULL");
        assert!(info.star_powers.is_empty());
        assert!(info.gadgets.is_empty());
    }

    #[test]
    fn test_brawler_display() {
        let brawler = Brawler {
            name: "COLT".to_string(),
            trophies: 500,
            ..Default::default()
        };
        assert_eq!(format!("{}", brawler), "name=COLT, trophies=500");
    }

    #[test]
    fn test_brawler_info_from_payload() {
        let info = BrawlerInfo::from_payload(json!({
            "id": 16000002,
            "name": "BULL",
            "starPowers": [{"id": 1, "name": "BERSERKER"}],
            "gadgets": [{"id": 2, "name": "T-BONE INJECTOR"}]
        }))
        .unwrap();

        assert_eq!(info.id, 16000002);
        assert_eq!(info.star_powers.len(), 1);
        assert_eq!(info.gadgets[0].name, "T-BONE INJECTOR");
        assert_eq!(format!("{}", info), "id=16000002, name=BULL");
    }
}
