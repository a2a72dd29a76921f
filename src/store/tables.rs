//! Loads what the standings engine needs for one season and runs it.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::models::Position;
use crate::schema::{clubs, matches, players, statistics};
use crate::standings::{
    compute_scorers, compute_standings, MatchResult, PlayerInfo, ScorerRow, StandingsRow,
    StatLine,
};

pub fn standings(conn: &mut SqliteConnection, season: i32) -> Result<Vec<StandingsRow>, LeagueError> {
    let results = matches::table
        .filter(matches::season.eq(season))
        .filter(matches::finalized.eq(true))
        .select((
            matches::match_id,
            matches::home_club_id,
            matches::away_club_id,
            matches::home_goals,
            matches::away_goals,
            matches::finalized,
        ))
        .load::<(i32, i32, i32, i32, i32, bool)>(conn)?
        .into_iter()
        .map(
            |(match_id, home_club_id, away_club_id, home_goals, away_goals, finalized)| MatchResult {
                match_id,
                home_club_id,
                away_club_id,
                home_goals,
                away_goals,
                finalized,
            },
        )
        .collect::<Vec<_>>();

    let club_names = clubs::table
        .select((clubs::club_id, clubs::name))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();

    let stats = stat_lines(conn, season)?;

    Ok(compute_standings(season, &club_names, &results, &stats))
}

pub fn scorers(conn: &mut SqliteConnection, season: i32) -> Result<Vec<ScorerRow>, LeagueError> {
    let stats = stat_lines(conn, season)?;

    let players = players::table
        .left_join(clubs::table)
        .select((
            players::player_id,
            players::name,
            players::position,
            clubs::name.nullable(),
        ))
        .load::<(String, String, Position, Option<String>)>(conn)?
        .into_iter()
        .map(|(player_id, name, position, club_name)| {
            (
                player_id,
                PlayerInfo {
                    name,
                    position,
                    club_name,
                },
            )
        })
        .collect::<HashMap<_, _>>();

    Ok(compute_scorers(season, &players, &stats))
}

/// Every statistic of the season, finalized or not, with the player's current club.
fn stat_lines(conn: &mut SqliteConnection, season: i32) -> Result<Vec<StatLine>, LeagueError> {
    Ok(statistics::table
        .inner_join(matches::table)
        .inner_join(players::table)
        .filter(matches::season.eq(season))
        .select((
            statistics::match_id,
            statistics::player_id,
            players::club_id,
            statistics::goals,
            statistics::assists,
            statistics::yellow_cards,
            statistics::red_cards,
        ))
        .load::<(i32, String, Option<i32>, i32, i32, i32, i32)>(conn)?
        .into_iter()
        .map(
            |(match_id, player_id, club_id, goals, assists, yellow_cards, red_cards)| StatLine {
                match_id,
                player_id,
                club_id,
                goals,
                assists,
                yellow_cards,
                red_cards,
            },
        )
        .collect())
}
