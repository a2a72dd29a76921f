//! Seeds a league database from a directory of CSV files.
//!
//! Every file is optional. Clubs and stadiums are referred to by name in the other files,
//! matches carry their own id so that statistics can point at them.

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::sqlite::SqliteConnection;
use failure::{self, ResultExt};

use crate::models::{ClubForm, MatchFields, NewPlayer, Position, StadiumForm, Statistic};
use crate::store::{clubs, matches, players, seasons, stadiums, statistics};

const KICKOFF_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Default, PartialEq)]
pub struct ImportSummary {
    pub seasons: usize,
    pub stadiums: usize,
    pub clubs: usize,
    pub players: usize,
    pub matches: usize,
    pub statistics: usize,
}

#[derive(Deserialize, Debug)]
struct SeasonRow {
    year: i32,
}

#[derive(Deserialize, Debug)]
struct StadiumRow {
    name: String,
    city: String,
    capacity: Option<i32>,
}

#[derive(Deserialize, Debug)]
struct ClubRow {
    name: String,
    city: String,
    state: String,
    founded_year: Option<i32>,
    coach: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PlayerRow {
    player_id: String,
    name: String,
    position: Position,
    birth_date: NaiveDate,
    nationality: String,
    club: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MatchRow {
    match_id: i32,
    kickoff: String,
    home_club: String,
    away_club: String,
    stadium: String,
    season: i32,
    round_number: i32,
    home_goals: i32,
    away_goals: i32,
    finalized: bool,
}

/// Imports whatever CSV files are present in `data_dir`, in dependency order.
pub fn import_all(
    conn: &mut SqliteConnection,
    data_dir: &Path,
) -> Result<ImportSummary, failure::Error> {
    let mut summary = ImportSummary::default();

    for row in read_rows::<SeasonRow>(data_dir, "seasons.csv")? {
        seasons::create(conn, row.year).context(format!("season {}", row.year))?;
        summary.seasons += 1;
    }

    let mut stadium_ids = HashMap::new();
    for stadium in stadiums::list(conn)? {
        stadium_ids.insert(stadium.name, stadium.stadium_id);
    }
    for row in read_rows::<StadiumRow>(data_dir, "stadiums.csv")? {
        let stadium = stadiums::create(
            conn,
            &StadiumForm {
                name: row.name,
                city: row.city,
                capacity: row.capacity,
            },
        )?;
        debug!("{:?}", stadium);
        stadium_ids.insert(stadium.name, stadium.stadium_id);
        summary.stadiums += 1;
    }

    let mut club_ids = HashMap::new();
    for club in clubs::list(conn)? {
        club_ids.insert(club.name, club.club_id);
    }
    for row in read_rows::<ClubRow>(data_dir, "clubs.csv")? {
        let club = clubs::create(
            conn,
            &ClubForm {
                name: row.name,
                city: row.city,
                state: row.state,
                founded_year: row.founded_year,
                coach: row.coach.filter(|coach| !coach.trim().is_empty()),
            },
        )?;
        debug!("{:?}", club);
        club_ids.insert(club.name, club.club_id);
        summary.clubs += 1;
    }

    for row in read_rows::<PlayerRow>(data_dir, "players.csv")? {
        let club_id = match row.club.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(lookup(&club_ids, name, "club")?),
            _ => None,
        };
        let player = players::create(
            conn,
            &NewPlayer {
                player_id: row.player_id,
                name: row.name,
                position: row.position,
                birth_date: row.birth_date,
                nationality: row.nationality,
                club_id,
            },
        )?;
        debug!("{:?}", player);
        summary.players += 1;
    }

    for row in read_rows::<MatchRow>(data_dir, "matches.csv")? {
        let kickoff = NaiveDateTime::parse_from_str(&row.kickoff, KICKOFF_FORMAT)
            .context(format!("kickoff of match {}", row.match_id))?;
        let fields = MatchFields {
            kickoff,
            home_club_id: lookup(&club_ids, &row.home_club, "club")?,
            away_club_id: lookup(&club_ids, &row.away_club, "club")?,
            stadium_id: lookup(&stadium_ids, &row.stadium, "stadium")?,
            season: row.season,
            round_number: row.round_number,
            home_goals: row.home_goals,
            away_goals: row.away_goals,
            finalized: row.finalized,
        };
        let game = matches::create(conn, Some(row.match_id), &fields)
            .context(format!("match {}", row.match_id))?;
        debug!("{:?}", game);
        summary.matches += 1;
    }

    for row in read_rows::<Statistic>(data_dir, "statistics.csv")? {
        let what = format!("statistic of {} in match {}", row.player_id, row.match_id);
        statistics::upsert(conn, &row).context(what)?;
        summary.statistics += 1;
    }

    info!("Imported {:?} from {}", summary, data_dir.display());
    Ok(summary)
}

fn read_rows<T>(data_dir: &Path, file_name: &str) -> Result<Vec<T>, failure::Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let path = data_dir.join(file_name);
    if !path.exists() {
        info!("Skipping {}, file not found", path.display());
        return Ok(Vec::new());
    }

    let mut rdr = csv::Reader::from_path(&path)?;
    let mut rows = Vec::new();
    for row in rdr.deserialize::<T>() {
        rows.push(row.context(format!("reading {}", path.display()))?);
    }
    Ok(rows)
}

fn lookup(ids: &HashMap<String, i32>, name: &str, kind: &str) -> Result<i32, failure::Error> {
    ids.get(name)
        .cloned()
        .ok_or_else(|| format_err!("unknown {} {:?}", kind, name))
}
