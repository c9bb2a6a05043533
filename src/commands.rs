//! Sub-commands of the `bs-api` command line tool.
//!
//! Each command is a thin composition of [`BrawlClient`] operations and entity
//! navigation methods. Results are printed on stdout, diagnostics go to the log.

use anyhow::anyhow;
use bs_api::{BrawlClient, GLOBAL_REGION, PlayerRef, Requester};
use chrono::{TimeDelta, Utc};
use clap::Subcommand;
use futures::future::join_all;
use log::{error, info};

/// Available sub-commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a player profile summary
    Player {
        /// Player tag, e.g. #8VJVG4PVC
        tag: String,
    },
    /// Show how long ago a player last played
    LastBattle { tag: String },
    /// Compare showdown and 3vs3 victories of a player
    Wins { tag: String },
    /// Download the profile icon of a player
    Icon {
        tag: String,
        /// Output path, `.png` is appended
        #[arg(short, long, default_value = "output")]
        output: String,
    },
    /// Find a player in a club by name or by tag
    Find {
        club_tag: String,
        /// A name fragment, or a tag fragment starting with #
        query: String,
    },
    /// List the members of a club with their full profiles
    Members { club_tag: String },
    /// Show the player leaderboard of a region
    TopPlayers {
        #[arg(short, long, default_value = GLOBAL_REGION)]
        region: String,
    },
    /// Show the club leaderboard of a region
    TopClubs {
        #[arg(short, long, default_value = GLOBAL_REGION)]
        region: String,
    },
    /// Show the leaderboard of a brawler
    TopBrawler {
        /// Brawler name or part of it, case insensitive
        name: String,
        #[arg(short, long, default_value = GLOBAL_REGION)]
        region: String,
    },
}

/// Runs `command` against `client`.
pub async fn run<R: Requester>(client: &BrawlClient<R>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Player { tag } => {
            let player = client.get_player(&tag).await?;
            println!("{} ({})", player.name, player.tag);
            println!("trophies: {} (highest {})", player.trophies, player.highest_trophies);
            println!("club: {}", player.club_name().unwrap_or("-"));
        }
        Command::LastBattle { tag } => {
            let player = client.get_player(&tag).await?;
            let battles = player.get_battlelog(client).await?;
            let last = battles
                .first()
                .and_then(|battle| battle.battle_time)
                .ok_or_else(|| anyhow!("no battle found for {}", player.tag))?;

            println!(
                "{} last battle was {} ago",
                player.name,
                format_elapsed(Utc::now() - last)
            );
        }
        Command::Wins { tag } => {
            let player = client.get_player(&tag).await?;
            let showdown = player.solo_victories + player.duo_victories;
            println!("{}", compare_wins(showdown, player.victories_3vs3()));
        }
        Command::Icon { tag, output } => {
            let player = client.get_player(&tag).await?;
            player.download_icon_image(client, &output).await?;
            println!("saved icon of {} to {}.png", player.name, output);
        }
        Command::Find { club_tag, query } => {
            let player = client.get_player_by_club(&club_tag, &query).await?;
            println!("{} ({}) - {} trophies", player.name, player.tag, player.trophies);
        }
        Command::Members { club_tag } => {
            let club = client.get_club(&club_tag).await?;
            info!("resolve {} members of {}", club.members.len(), club.name);

            // one request per member, all in flight together
            let players =
                join_all(club.members.iter().map(|member| member.get_player(client))).await;

            for (member, player) in club.members.iter().zip(players) {
                match player {
                    Ok(player) => println!(
                        "{:<20} {:<14} {:?} - {} trophies, {} brawlers",
                        member.name,
                        member.tag,
                        member.role,
                        player.trophies,
                        player.brawlers.len()
                    ),
                    Err(e) => error!("failed to resolve member {}: {}", member.tag, e),
                }
            }
        }
        Command::TopPlayers { region } => {
            for row in client.get_ranking_players(&region).await? {
                println!("{:>3}. {:<20} {:>7} {}", row.rank, row.name, row.trophies, row.club_name);
            }
        }
        Command::TopClubs { region } => {
            for row in client.get_ranking_clubs(&region).await? {
                println!(
                    "{:>3}. {:<20} {:>8} ({} members)",
                    row.rank, row.name, row.trophies, row.member_count
                );
            }
        }
        Command::TopBrawler { name, region } => {
            let id = client
                .get_brawler_id_by_name(&name)
                .await?
                .ok_or_else(|| anyhow!("no brawler matches {}", name))?;
            let brawler_name = client.get_name_by_brawler_id(id).await?.unwrap_or(name);

            println!("{} leaderboard", brawler_name);
            for row in client.get_ranking_by_brawler_id(id, &region).await? {
                println!("{:>3}. {:<20} {:>5}", row.rank, row.name, row.trophies);
            }
        }
    }

    Ok(())
}

/// Formats an elapsed duration as days, hours and minutes.
fn format_elapsed(elapsed: TimeDelta) -> String {
    let minutes = elapsed.num_minutes().max(0);
    let (days, hours, minutes) = (minutes / 1440, minutes / 60 % 24, minutes % 60);

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Tells which of showdown and 3vs3 has more victories, and by how much.
fn compare_wins(showdown: u32, victories_3vs3: u32) -> String {
    if showdown == 0 && victories_3vs3 == 0 {
        return "No victories yet".to_string();
    }

    if showdown >= victories_3vs3 {
        let percent = 100.0 - f64::from(victories_3vs3) / f64::from(showdown) * 100.0;
        format!("More wins in showdown than in 3vs3 on {:.1}%", percent)
    } else {
        let percent = 100.0 - f64::from(showdown) / f64::from(victories_3vs3) * 100.0;
        format!("More wins in 3vs3 than in showdown on {:.1}%", percent)
    }
}
