extern crate chrono;
extern crate diesel;
extern crate league_manager;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::sqlite::SqliteConnection;

use league_manager::errors::LeagueError;
use league_manager::models::{ClubForm, MatchFields, NewPlayer, Position, StadiumForm, Statistic};
use league_manager::store::{self, clubs, matches, players, seasons, stadiums, statistics, tables};

struct League {
    conn: SqliteConnection,
    stadium_id: i32,
    club_a: i32,
    club_b: i32,
    club_c: i32,
}

fn kickoff(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(16, 0, 0)
        .unwrap()
}

fn club(name: &str) -> ClubForm {
    ClubForm {
        name: name.to_owned(),
        city: "Porto Alegre".to_owned(),
        state: "RS".to_owned(),
        founded_year: Some(1903),
        coach: None,
    }
}

fn player(player_id: &str, name: &str, club_id: Option<i32>) -> NewPlayer {
    NewPlayer {
        player_id: player_id.to_owned(),
        name: name.to_owned(),
        position: Position::Forward,
        birth_date: NaiveDate::from_ymd_opt(1998, 5, 17).unwrap(),
        nationality: "Brazil".to_owned(),
        club_id,
    }
}

fn game(league: &League, home: i32, away: i32, round_number: i32) -> MatchFields {
    MatchFields {
        kickoff: kickoff(round_number as u32),
        home_club_id: home,
        away_club_id: away,
        stadium_id: league.stadium_id,
        season: 2025,
        round_number,
        home_goals: 0,
        away_goals: 0,
        finalized: false,
    }
}

fn stat(match_id: i32, player_id: &str, goals: i32) -> Statistic {
    Statistic {
        match_id,
        player_id: player_id.to_owned(),
        goals,
        assists: 0,
        yellow_cards: 0,
        red_cards: 0,
    }
}

fn league() -> League {
    let mut conn = store::establish_connection(":memory:").unwrap();
    seasons::create(&mut conn, 2025).unwrap();
    let stadium_id = stadiums::create(
        &mut conn,
        &StadiumForm {
            name: "Beira-Rio".to_owned(),
            city: "Porto Alegre".to_owned(),
            capacity: Some(50_128),
        },
    )
    .unwrap()
    .stadium_id;
    let club_a = clubs::create(&mut conn, &club("ClubA")).unwrap().club_id;
    let club_b = clubs::create(&mut conn, &club("ClubB")).unwrap().club_id;
    let club_c = clubs::create(&mut conn, &club("ClubC")).unwrap().club_id;

    League {
        conn,
        stadium_id,
        club_a,
        club_b,
        club_c,
    }
}

fn round_numbers(conn: &mut SqliteConnection) -> Vec<i32> {
    seasons::rounds(conn, 2025)
        .unwrap()
        .into_iter()
        .map(|round| round.round_number)
        .collect()
}

#[test]
fn creating_a_match_creates_its_round() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 1);

    let created = matches::create(&mut league.conn, None, &fields).unwrap();

    assert_eq!(created.round_number, 1);
    assert_eq!(round_numbers(&mut league.conn), vec![1]);
    assert_eq!(matches::find(&mut league.conn, created.match_id).unwrap(), created);
}

#[test]
fn second_match_in_a_round_reuses_it() {
    let mut league = league();
    let first = game(&league, league.club_a, league.club_b, 1);
    let second = game(&league, league.club_b, league.club_c, 1);

    matches::create(&mut league.conn, None, &first).unwrap();
    matches::create(&mut league.conn, None, &second).unwrap();

    assert_eq!(round_numbers(&mut league.conn), vec![1]);
}

#[test]
fn ensure_round_is_idempotent() {
    let mut league = league();

    assert!(seasons::ensure_round(&mut league.conn, 2025, 4).unwrap());
    assert!(!seasons::ensure_round(&mut league.conn, 2025, 4).unwrap());
    assert_eq!(round_numbers(&mut league.conn), vec![4]);
}

#[test]
fn duplicate_match_id_rolls_back_the_new_round() {
    let mut league = league();
    let first = game(&league, league.club_a, league.club_b, 1);
    matches::create(&mut league.conn, Some(10), &first).unwrap();

    let clash = game(&league, league.club_b, league.club_c, 2);
    match matches::create(&mut league.conn, Some(10), &clash) {
        Err(LeagueError::Conflict(_)) => {}
        other => panic!("expected a conflict, got {:?}", other),
    }

    assert_eq!(round_numbers(&mut league.conn), vec![1]);
}

#[test]
fn missing_club_rolls_back_the_new_round() {
    let mut league = league();
    let fields = game(&league, league.club_a, 999, 3);

    match matches::create(&mut league.conn, None, &fields) {
        Err(LeagueError::ConstraintViolation(_)) => {}
        other => panic!("expected a constraint violation, got {:?}", other),
    }

    assert!(round_numbers(&mut league.conn).is_empty());
    assert!(matches::list(&mut league.conn, Default::default())
        .unwrap()
        .is_empty());
}

#[test]
fn updating_a_missing_match_leaves_no_round_behind() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 7);

    match matches::update(&mut league.conn, 42, &fields) {
        Err(LeagueError::NotFound(_)) => {}
        other => panic!("expected not found, got {:?}", other),
    }

    assert!(round_numbers(&mut league.conn).is_empty());
}

#[test]
fn match_in_a_missing_season_is_rejected() {
    let mut league = league();
    let mut fields = game(&league, league.club_a, league.club_b, 1);
    fields.season = 1999;

    match matches::create(&mut league.conn, None, &fields) {
        Err(LeagueError::ConstraintViolation(_)) => {}
        other => panic!("expected a constraint violation, got {:?}", other),
    }
}

#[test]
fn club_cannot_play_itself() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_a, 1);

    match matches::create(&mut league.conn, None, &fields) {
        Err(LeagueError::Validation(_)) => {}
        other => panic!("expected a validation error, got {:?}", other),
    }
    assert!(round_numbers(&mut league.conn).is_empty());
}

#[test]
fn match_list_filters_on_finalized() {
    let mut league = league();
    let mut done = game(&league, league.club_a, league.club_b, 1);
    done.finalized = true;
    let pending = game(&league, league.club_b, league.club_c, 2);
    matches::create(&mut league.conn, None, &done).unwrap();
    matches::create(&mut league.conn, None, &pending).unwrap();

    let filter = matches::MatchFilter {
        finalized: Some(true),
        season: None,
    };
    let listed = matches::list(&mut league.conn, filter).unwrap();

    assert_eq!(listed.len(), 1);
    assert!(listed[0].finalized);
}

#[test]
fn statistic_upsert_keeps_one_row_with_the_latest_values() {
    let mut league = league();
    let game_fields = game(&league, league.club_a, league.club_b, 1);
    let created = matches::create(&mut league.conn, None, &game_fields).unwrap();
    players::create(&mut league.conn, &player("p1", "Ana", Some(league.club_a))).unwrap();

    statistics::upsert(&mut league.conn, &stat(created.match_id, "p1", 1)).unwrap();
    let mut second = stat(created.match_id, "p1", 2);
    second.yellow_cards = 1;
    let stored = statistics::upsert(&mut league.conn, &second).unwrap();

    assert_eq!(stored, second);
    assert_eq!(
        statistics::for_match(&mut league.conn, created.match_id).unwrap(),
        vec![second]
    );
}

#[test]
fn statistic_for_unknown_player_is_rejected() {
    let mut league = league();
    let game_fields = game(&league, league.club_a, league.club_b, 1);
    let created = matches::create(&mut league.conn, None, &game_fields).unwrap();

    match statistics::upsert(&mut league.conn, &stat(created.match_id, "ghost", 1)) {
        Err(LeagueError::ConstraintViolation(_)) => {}
        other => panic!("expected a constraint violation, got {:?}", other),
    }
}

#[test]
fn season_in_use_cannot_be_deleted() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 1);
    matches::create(&mut league.conn, None, &fields).unwrap();

    match seasons::delete(&mut league.conn, 2025) {
        Err(LeagueError::ReferentialConflict(_)) => {}
        other => panic!("expected a referential conflict, got {:?}", other),
    }
    assert!(seasons::exists_by_year(&mut league.conn, 2025).unwrap());
}

#[test]
fn unused_season_can_be_deleted() {
    let mut league = league();
    seasons::create(&mut league.conn, 2026).unwrap();

    seasons::delete(&mut league.conn, 2026).unwrap();

    assert!(!seasons::exists_by_year(&mut league.conn, 2026).unwrap());
    match seasons::delete(&mut league.conn, 2026) {
        Err(LeagueError::NotFound(_)) => {}
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn duplicate_season_is_a_conflict() {
    let mut league = league();

    match seasons::create(&mut league.conn, 2025) {
        Err(LeagueError::Conflict(_)) => {}
        other => panic!("expected a conflict, got {:?}", other),
    }
}

#[test]
fn stadium_with_matches_cannot_be_deleted() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 1);
    matches::create(&mut league.conn, None, &fields).unwrap();

    match stadiums::delete(&mut league.conn, league.stadium_id) {
        Err(LeagueError::ReferentialConflict(_)) => {}
        other => panic!("expected a referential conflict, got {:?}", other),
    }
}

#[test]
fn deleting_a_club_releases_its_players() {
    let mut league = league();
    players::create(&mut league.conn, &player("p1", "Ana", Some(league.club_c))).unwrap();

    clubs::delete(&mut league.conn, league.club_c).unwrap();

    assert_eq!(players::find(&mut league.conn, "p1").unwrap().club_id, None);
    assert_eq!(players::free_agents(&mut league.conn).unwrap().len(), 1);
}

#[test]
fn player_for_unknown_club_is_rejected() {
    let mut league = league();

    match players::create(&mut league.conn, &player("p1", "Ana", Some(999))) {
        Err(LeagueError::ConstraintViolation(_)) => {}
        other => panic!("expected a constraint violation, got {:?}", other),
    }
}

#[test]
fn deleting_a_match_removes_its_statistics() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 1);
    let created = matches::create(&mut league.conn, None, &fields).unwrap();
    players::create(&mut league.conn, &player("p1", "Ana", Some(league.club_a))).unwrap();
    statistics::upsert(&mut league.conn, &stat(created.match_id, "p1", 1)).unwrap();

    matches::delete(&mut league.conn, created.match_id).unwrap();

    assert!(statistics::for_match(&mut league.conn, created.match_id)
        .unwrap()
        .is_empty());
    // the player has no statistics left, so it can go too
    players::delete(&mut league.conn, "p1").unwrap();
}

#[test]
fn eligible_players_come_from_both_clubs() {
    let mut league = league();
    let fields = game(&league, league.club_a, league.club_b, 1);
    let created = matches::create(&mut league.conn, None, &fields).unwrap();
    players::create(&mut league.conn, &player("p1", "Ana", Some(league.club_a))).unwrap();
    players::create(&mut league.conn, &player("p2", "Bia", Some(league.club_b))).unwrap();
    players::create(&mut league.conn, &player("p3", "Caio", Some(league.club_c))).unwrap();
    players::create(&mut league.conn, &player("p4", "Duda", None)).unwrap();

    let eligible = matches::eligible_players(&mut league.conn, created.match_id)
        .unwrap()
        .into_iter()
        .map(|player| player.player_id)
        .collect::<Vec<_>>();

    assert_eq!(eligible, vec!["p1".to_owned(), "p2".to_owned()]);
}

#[test]
fn season_tables_from_the_database() {
    let mut league = league();
    let mut first = game(&league, league.club_a, league.club_b, 1);
    first.home_goals = 2;
    first.away_goals = 1;
    first.finalized = true;
    let mut second = game(&league, league.club_b, league.club_c, 2);
    second.finalized = true;
    let mut provisional = game(&league, league.club_c, league.club_a, 3);
    provisional.home_goals = 4;
    let first = matches::create(&mut league.conn, None, &first).unwrap();
    matches::create(&mut league.conn, None, &second).unwrap();
    let provisional = matches::create(&mut league.conn, None, &provisional).unwrap();

    players::create(&mut league.conn, &player("p1", "Ana", Some(league.club_a))).unwrap();
    players::create(&mut league.conn, &player("p2", "Bia", Some(league.club_c))).unwrap();
    statistics::upsert(&mut league.conn, &stat(first.match_id, "p1", 2)).unwrap();
    statistics::upsert(&mut league.conn, &stat(provisional.match_id, "p2", 4)).unwrap();

    let table = tables::standings(&mut league.conn, 2025).unwrap();
    let order = table
        .iter()
        .map(|row| row.club_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["ClubA", "ClubC", "ClubB"]);
    assert_eq!((table[0].points, table[0].goal_difference), (3, 1));
    assert_eq!((table[1].points, table[1].games), (1, 1));
    assert_eq!((table[2].points, table[2].goal_difference), (1, -1));

    // scorers also count matches that are not finalized yet
    let scorers = tables::scorers(&mut league.conn, 2025).unwrap();
    let ranked = scorers
        .iter()
        .map(|row| (row.player_name.as_str(), row.total_goals, row.position))
        .collect::<Vec<_>>();
    assert_eq!(ranked, vec![("Bia", 4, 1), ("Ana", 2, 2)]);
    assert_eq!(scorers[0].club_name.as_deref(), Some("ClubC"));
}

#[test]
fn tables_of_an_unknown_season_are_empty() {
    let mut league = league();

    assert!(tables::standings(&mut league.conn, 1990).unwrap().is_empty());
    assert!(tables::scorers(&mut league.conn, 1990).unwrap().is_empty());
}
