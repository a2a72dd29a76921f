use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::{Club, ClubForm};
use crate::schema::clubs;

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Club>, LeagueError> {
    Ok(clubs::table
        .order((clubs::name.asc(), clubs::club_id.asc()))
        .load(conn)?)
}

pub fn find(conn: &mut SqliteConnection, club_id: i32) -> Result<Club, LeagueError> {
    clubs::table
        .find(club_id)
        .first(conn)
        .map_err(|error| LeagueError::on_read(error, &format!("club {}", club_id)))
}

pub fn exists(conn: &mut SqliteConnection, club_id: i32) -> Result<bool, LeagueError> {
    use diesel::dsl::exists;

    Ok(diesel::select(exists(clubs::table.find(club_id))).get_result(conn)?)
}

pub fn create(conn: &mut SqliteConnection, form: &ClubForm) -> Result<Club, LeagueError> {
    form.validate()?;

    diesel::insert_into(clubs::table)
        .values(form)
        .get_result(conn)
        .map_err(|error| LeagueError::on_write(error, "club"))
}

pub fn update(
    conn: &mut SqliteConnection,
    club_id: i32,
    form: &ClubForm,
) -> Result<Club, LeagueError> {
    form.validate()?;

    diesel::update(clubs::table.find(club_id))
        .set(form)
        .get_result(conn)
        .map_err(|error| LeagueError::on_write(error, &format!("club {}", club_id)))
}

/// Removes a club. Its players become free agents; a club that played matches stays.
pub fn delete(conn: &mut SqliteConnection, club_id: i32) -> Result<(), LeagueError> {
    use crate::schema::matches;
    use diesel::dsl::exists;

    let what = format!("club {}", club_id);

    conn.immediate_transaction(|conn| {
        let has_played = diesel::select(exists(matches::table.filter(
            matches::home_club_id
                .eq(club_id)
                .or(matches::away_club_id.eq(club_id)),
        )))
        .get_result::<bool>(conn)?;
        if has_played {
            return Err(LeagueError::ReferentialConflict(format!(
                "{} still has matches",
                what
            )));
        }

        let deleted = diesel::delete(clubs::table.find(club_id))
            .execute(conn)
            .map_err(|error| LeagueError::on_delete(error, &what))?;
        if deleted == 0 {
            Err(LeagueError::NotFound(what.clone()))
        } else {
            Ok(())
        }
    })
}
