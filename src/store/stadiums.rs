use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::{Stadium, StadiumForm};
use crate::schema::{matches, stadiums};

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Stadium>, LeagueError> {
    Ok(stadiums::table
        .order((stadiums::name.asc(), stadiums::stadium_id.asc()))
        .load(conn)?)
}

pub fn find(conn: &mut SqliteConnection, stadium_id: i32) -> Result<Stadium, LeagueError> {
    stadiums::table
        .find(stadium_id)
        .first(conn)
        .map_err(|error| LeagueError::on_read(error, &format!("stadium {}", stadium_id)))
}

pub fn exists_by_id(conn: &mut SqliteConnection, stadium_id: i32) -> Result<bool, LeagueError> {
    Ok(diesel::select(exists(stadiums::table.find(stadium_id))).get_result(conn)?)
}

pub fn create(conn: &mut SqliteConnection, form: &StadiumForm) -> Result<Stadium, LeagueError> {
    form.validate()?;

    diesel::insert_into(stadiums::table)
        .values(form)
        .get_result(conn)
        .map_err(|error| LeagueError::on_write(error, "stadium"))
}

pub fn update(
    conn: &mut SqliteConnection,
    stadium_id: i32,
    form: &StadiumForm,
) -> Result<Stadium, LeagueError> {
    form.validate()?;

    diesel::update(stadiums::table.find(stadium_id))
        .set(form)
        .get_result(conn)
        .map_err(|error| LeagueError::on_write(error, &format!("stadium {}", stadium_id)))
}

/// Removes a stadium nobody plays in.
pub fn delete(conn: &mut SqliteConnection, stadium_id: i32) -> Result<(), LeagueError> {
    let what = format!("stadium {}", stadium_id);

    conn.immediate_transaction(|conn| {
        let in_use = diesel::select(exists(
            matches::table.filter(matches::stadium_id.eq(stadium_id)),
        ))
        .get_result::<bool>(conn)?;
        if in_use {
            return Err(LeagueError::ReferentialConflict(format!(
                "{} is still used by a match",
                what
            )));
        }

        let deleted = diesel::delete(stadiums::table.find(stadium_id))
            .execute(conn)
            .map_err(|error| LeagueError::on_delete(error, &what))?;
        if deleted == 0 {
            Err(LeagueError::NotFound(what.clone()))
        } else {
            Ok(())
        }
    })
}
