use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::Statistic;
use crate::schema::{matches, players, statistics};

pub fn for_match(conn: &mut SqliteConnection, match_id: i32) -> Result<Vec<Statistic>, LeagueError> {
    Ok(statistics::table
        .filter(statistics::match_id.eq(match_id))
        .order(statistics::player_id.asc())
        .load(conn)?)
}

/// Records the statistic of a player in a match. A second write for the same pair
/// replaces the counters of the first one.
pub fn upsert(conn: &mut SqliteConnection, stat: &Statistic) -> Result<Statistic, LeagueError> {
    stat.validate()?;

    conn.immediate_transaction(|conn| {
        if !diesel::select(exists(matches::table.find(stat.match_id))).get_result::<bool>(conn)? {
            return Err(LeagueError::ConstraintViolation(format!(
                "match {} does not exist",
                stat.match_id
            )));
        }
        if !diesel::select(exists(players::table.find(&stat.player_id))).get_result::<bool>(conn)? {
            return Err(LeagueError::ConstraintViolation(format!(
                "player {} does not exist",
                stat.player_id
            )));
        }

        diesel::insert_into(statistics::table)
            .values(stat)
            .on_conflict((statistics::match_id, statistics::player_id))
            .do_update()
            .set(stat)
            .execute(conn)
            .map_err(|error| LeagueError::on_write(error, "statistic"))?;

        Ok(statistics::table
            .find((stat.match_id, &stat.player_id))
            .first(conn)?)
    })
}
