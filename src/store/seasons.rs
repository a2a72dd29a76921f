use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::{Round, Season};
use crate::schema::{matches, rounds, seasons};

const FIRST_YEAR: i32 = 1850;
const LAST_YEAR: i32 = 9999;

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Season>, LeagueError> {
    Ok(seasons::table.order(seasons::year.desc()).load(conn)?)
}

pub fn exists_by_year(conn: &mut SqliteConnection, year: i32) -> Result<bool, LeagueError> {
    Ok(diesel::select(exists(seasons::table.find(year))).get_result(conn)?)
}

pub fn create(conn: &mut SqliteConnection, year: i32) -> Result<Season, LeagueError> {
    if year < FIRST_YEAR || year > LAST_YEAR {
        return Err(LeagueError::Validation(format!(
            "year must be between {} and {}",
            FIRST_YEAR, LAST_YEAR
        )));
    }

    conn.immediate_transaction(|conn| {
        if exists_by_year(conn, year)? {
            return Err(LeagueError::Conflict(format!(
                "season {} already exists",
                year
            )));
        }

        diesel::insert_into(seasons::table)
            .values(seasons::year.eq(year))
            .get_result(conn)
            .map_err(|error| LeagueError::on_write(error, &format!("season {}", year)))
    })
}

/// Removes a season that has neither rounds nor matches.
pub fn delete(conn: &mut SqliteConnection, year: i32) -> Result<(), LeagueError> {
    let what = format!("season {}", year);

    conn.immediate_transaction(|conn| {
        let has_rounds =
            diesel::select(exists(rounds::table.filter(rounds::season.eq(year))))
                .get_result::<bool>(conn)?;
        let has_matches =
            diesel::select(exists(matches::table.filter(matches::season.eq(year))))
                .get_result::<bool>(conn)?;
        if has_rounds || has_matches {
            return Err(LeagueError::ReferentialConflict(format!(
                "{} is still used by rounds or matches",
                what
            )));
        }

        let deleted = diesel::delete(seasons::table.find(year))
            .execute(conn)
            .map_err(|error| LeagueError::on_delete(error, &what))?;
        if deleted == 0 {
            Err(LeagueError::NotFound(what.clone()))
        } else {
            Ok(())
        }
    })
}

pub fn rounds(conn: &mut SqliteConnection, year: i32) -> Result<Vec<Round>, LeagueError> {
    Ok(rounds::table
        .filter(rounds::season.eq(year))
        .order(rounds::round_number.asc())
        .load(conn)?)
}

/// Makes sure round `round_number` of `season` exists, inserting it when missing.
///
/// Calling it for an existing round changes nothing. Returns whether a row was inserted.
/// The season itself must already exist.
pub fn ensure_round(
    conn: &mut SqliteConnection,
    season: i32,
    round_number: i32,
) -> Result<bool, LeagueError> {
    let present = diesel::select(exists(rounds::table.find((season, round_number))))
        .get_result::<bool>(conn)?;
    if present {
        return Ok(false);
    }

    diesel::insert_into(rounds::table)
        .values((
            rounds::season.eq(season),
            rounds::round_number.eq(round_number),
        ))
        .execute(conn)
        .map_err(|error| {
            LeagueError::on_write(error, &format!("round {} of season {}", round_number, season))
        })?;
    debug!("Created round {} of season {}", round_number, season);

    Ok(true)
}
