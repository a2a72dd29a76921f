use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::{NewPlayer, Player, PlayerChanges};
use crate::schema::players;
use crate::store::clubs;

pub fn list(conn: &mut SqliteConnection) -> Result<Vec<Player>, LeagueError> {
    Ok(players::table
        .order((players::name.asc(), players::player_id.asc()))
        .load(conn)?)
}

/// Players without a club.
pub fn free_agents(conn: &mut SqliteConnection) -> Result<Vec<Player>, LeagueError> {
    Ok(players::table
        .filter(players::club_id.is_null())
        .order((players::name.asc(), players::player_id.asc()))
        .load(conn)?)
}

pub fn roster(conn: &mut SqliteConnection, club_id: i32) -> Result<Vec<Player>, LeagueError> {
    Ok(players::table
        .filter(players::club_id.eq(club_id))
        .order((players::name.asc(), players::player_id.asc()))
        .load(conn)?)
}

pub fn find(conn: &mut SqliteConnection, player_id: &str) -> Result<Player, LeagueError> {
    players::table
        .find(player_id)
        .first(conn)
        .map_err(|error| LeagueError::on_read(error, &format!("player {}", player_id)))
}

pub fn create(conn: &mut SqliteConnection, player: &NewPlayer) -> Result<Player, LeagueError> {
    player.validate()?;

    conn.immediate_transaction(|conn| {
        if let Some(club_id) = player.club_id {
            require_club(conn, club_id)?;
        }
        let taken = diesel::select(diesel::dsl::exists(players::table.find(&player.player_id)))
            .get_result::<bool>(conn)?;
        if taken {
            return Err(LeagueError::Conflict(format!(
                "player {} already exists",
                player.player_id
            )));
        }

        diesel::insert_into(players::table)
            .values(player)
            .get_result(conn)
            .map_err(|error| LeagueError::on_write(error, &format!("player {}", player.player_id)))
    })
}

pub fn update(
    conn: &mut SqliteConnection,
    player_id: &str,
    changes: &PlayerChanges,
) -> Result<Player, LeagueError> {
    changes.validate()?;

    conn.immediate_transaction(|conn| {
        if let Some(club_id) = changes.club_id {
            require_club(conn, club_id)?;
        }

        diesel::update(players::table.find(player_id))
            .set(changes)
            .get_result(conn)
            .map_err(|error| LeagueError::on_write(error, &format!("player {}", player_id)))
    })
}

/// Removes a player. Players with recorded statistics are kept for the season tables.
pub fn delete(conn: &mut SqliteConnection, player_id: &str) -> Result<(), LeagueError> {
    use crate::schema::statistics;
    use diesel::dsl::exists;

    let what = format!("player {}", player_id);

    conn.immediate_transaction(|conn| {
        let has_statistics = diesel::select(exists(
            statistics::table.filter(statistics::player_id.eq(player_id)),
        ))
        .get_result::<bool>(conn)?;
        if has_statistics {
            return Err(LeagueError::ReferentialConflict(format!(
                "{} has recorded statistics",
                what
            )));
        }

        let deleted = diesel::delete(players::table.find(player_id))
            .execute(conn)
            .map_err(|error| LeagueError::on_delete(error, &what))?;
        if deleted == 0 {
            Err(LeagueError::NotFound(what.clone()))
        } else {
            Ok(())
        }
    })
}

fn require_club(conn: &mut SqliteConnection, club_id: i32) -> Result<(), LeagueError> {
    if clubs::exists(conn, club_id)? {
        Ok(())
    } else {
        Err(LeagueError::ConstraintViolation(format!(
            "club {} does not exist",
            club_id
        )))
    }
}
