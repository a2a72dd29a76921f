//! Match writes. A match always belongs to a round, and the round is created on demand
//! in the same transaction as the match row.

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::{Match, MatchFields, Player};
use crate::schema::{matches, players, statistics};
use crate::store::{clubs, seasons, stadiums};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MatchFilter {
    pub finalized: Option<bool>,
    pub season: Option<i32>,
}

pub fn list(conn: &mut SqliteConnection, filter: MatchFilter) -> Result<Vec<Match>, LeagueError> {
    let mut query = matches::table.into_boxed();
    if let Some(finalized) = filter.finalized {
        query = query.filter(matches::finalized.eq(finalized));
    }
    if let Some(season) = filter.season {
        query = query.filter(matches::season.eq(season));
    }

    Ok(query
        .order((matches::kickoff.desc(), matches::match_id.desc()))
        .load(conn)?)
}

pub fn find(conn: &mut SqliteConnection, match_id: i32) -> Result<Match, LeagueError> {
    matches::table
        .find(match_id)
        .first(conn)
        .map_err(|error| LeagueError::on_read(error, &format!("match {}", match_id)))
}

/// Inserts a match, creating its round first when needed.
///
/// Either both the round and the match are committed or neither is. `match_id` lets a
/// caller pick the identifier; an identifier that is already taken is a conflict.
pub fn create(
    conn: &mut SqliteConnection,
    match_id: Option<i32>,
    fields: &MatchFields,
) -> Result<Match, LeagueError> {
    fields.validate()?;

    conn.immediate_transaction(|conn| {
        prepare_round(conn, fields)?;

        let inserted = match match_id {
            Some(match_id) => {
                if diesel::select(exists(matches::table.find(match_id))).get_result::<bool>(conn)? {
                    return Err(LeagueError::Conflict(format!(
                        "match {} already exists",
                        match_id
                    )));
                }
                diesel::insert_into(matches::table)
                    .values((matches::match_id.eq(match_id), fields))
                    .get_result::<Match>(conn)
            }
            None => diesel::insert_into(matches::table)
                .values(fields)
                .get_result::<Match>(conn),
        }
        .map_err(|error| LeagueError::on_write(error, "match"))?;

        info!(
            "Created match {} ({} v {}) in round {} of season {}",
            inserted.match_id,
            inserted.home_club_id,
            inserted.away_club_id,
            inserted.round_number,
            inserted.season
        );
        Ok(inserted)
    })
}

/// Rewrites every field of a match, creating the round it moves to when needed.
pub fn update(
    conn: &mut SqliteConnection,
    match_id: i32,
    fields: &MatchFields,
) -> Result<Match, LeagueError> {
    fields.validate()?;

    conn.immediate_transaction(|conn| {
        prepare_round(conn, fields)?;

        let updated = diesel::update(matches::table.find(match_id))
            .set(fields)
            .get_result::<Match>(conn)
            .map_err(|error| LeagueError::on_write(error, &format!("match {}", match_id)))?;

        info!("Updated match {}", updated.match_id);
        Ok(updated)
    })
}

/// Removes a match together with its statistics.
pub fn delete(conn: &mut SqliteConnection, match_id: i32) -> Result<(), LeagueError> {
    let what = format!("match {}", match_id);

    conn.immediate_transaction(|conn| {
        diesel::delete(statistics::table.filter(statistics::match_id.eq(match_id)))
            .execute(conn)?;
        let deleted = diesel::delete(matches::table.find(match_id))
            .execute(conn)
            .map_err(|error| LeagueError::on_delete(error, &what))?;

        if deleted == 0 {
            Err(LeagueError::NotFound(what.clone()))
        } else {
            Ok(())
        }
    })
}

/// The players of both clubs of a match, i.e. everyone a statistic can be recorded for.
pub fn eligible_players(
    conn: &mut SqliteConnection,
    match_id: i32,
) -> Result<Vec<Player>, LeagueError> {
    let game = find(conn, match_id)?;

    Ok(players::table
        .filter(players::club_id.eq_any(vec![game.home_club_id, game.away_club_id]))
        .order((players::name.asc(), players::player_id.asc()))
        .load(conn)?)
}

/// Runs inside the write transaction: the round goes in first, then every other
/// reference of the match is checked. A failure at any point rolls the round back too.
fn prepare_round(conn: &mut SqliteConnection, fields: &MatchFields) -> Result<(), LeagueError> {
    if !seasons::exists_by_year(conn, fields.season)? {
        return Err(LeagueError::ConstraintViolation(format!(
            "season {} does not exist",
            fields.season
        )));
    }

    seasons::ensure_round(conn, fields.season, fields.round_number)?;

    if !stadiums::exists_by_id(conn, fields.stadium_id)? {
        return Err(LeagueError::ConstraintViolation(format!(
            "stadium {} does not exist",
            fields.stadium_id
        )));
    }
    for &club_id in &[fields.home_club_id, fields.away_club_id] {
        if !clubs::exists(conn, club_id)? {
            return Err(LeagueError::ConstraintViolation(format!(
                "club {} does not exist",
                club_id
            )));
        }
    }

    Ok(())
}
