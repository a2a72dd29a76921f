//! Season tables derived from match results and player statistics.
//!
//! Everything in here is a pure function over data the caller already loaded, so the
//! same input always produces the same table.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Position;

pub const POINTS_FOR_WIN: i32 = 3;
pub const POINTS_FOR_DRAW: i32 = 1;

/// The part of a match the standings care about.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub match_id: i32,
    pub home_club_id: i32,
    pub away_club_id: i32,
    pub home_goals: i32,
    pub away_goals: i32,
    pub finalized: bool,
}

/// A statistic row joined with the current club of its player.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub match_id: i32,
    pub player_id: String,
    pub club_id: Option<i32>,
    pub goals: i32,
    pub assists: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub name: String,
    pub position: Position,
    pub club_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub position: usize,
    pub season: i32,
    pub club_id: i32,
    pub club_name: String,
    pub points: i32,
    pub games: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerRow {
    pub position: usize,
    pub season: i32,
    pub player_id: String,
    pub player_name: String,
    pub player_position: Position,
    pub club_name: Option<String>,
    pub total_goals: i32,
    pub matches_with_goal: i32,
}

#[derive(Default)]
struct ClubRecord {
    games: i32,
    wins: i32,
    draws: i32,
    losses: i32,
    goals_for: i32,
    goals_against: i32,
    yellow_cards: i32,
    red_cards: i32,
}

impl ClubRecord {
    fn record(&mut self, scored: i32, conceded: i32) {
        self.games += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.draws += 1,
            Ordering::Less => self.losses += 1,
        }
    }

    fn points(&self) -> i32 {
        POINTS_FOR_WIN * self.wins + POINTS_FOR_DRAW * self.draws
    }
}

/// Builds the ranked table of `season` from its matches.
///
/// Matches that are not finalized are skipped, as are the statistics belonging to them.
/// Cards count towards a club when the player's club is one of the two clubs of that
/// match. Clubs are ranked by points, goal difference, goals scored, then name and id so
/// that no two rows ever share a position.
pub fn compute_standings(
    season: i32,
    club_names: &HashMap<i32, String>,
    matches: &[MatchResult],
    stats: &[StatLine],
) -> Vec<StandingsRow> {
    // BTreeMap keeps the accumulation order independent of hashing.
    let mut records: BTreeMap<i32, ClubRecord> = BTreeMap::new();
    let mut counted = HashMap::new();

    for game in matches.iter().filter(|game| game.finalized) {
        if counted.insert(game.match_id, game).is_some() {
            continue;
        }
        records
            .entry(game.home_club_id)
            .or_default()
            .record(game.home_goals, game.away_goals);
        records
            .entry(game.away_club_id)
            .or_default()
            .record(game.away_goals, game.home_goals);
    }

    for line in stats {
        let (game, club_id) = match (counted.get(&line.match_id), line.club_id) {
            (Some(game), Some(club_id)) => (game, club_id),
            _ => continue,
        };
        if club_id != game.home_club_id && club_id != game.away_club_id {
            continue;
        }
        if let Some(record) = records.get_mut(&club_id) {
            record.yellow_cards += line.yellow_cards;
            record.red_cards += line.red_cards;
        }
    }

    let mut rows = records
        .into_iter()
        .map(|(club_id, record)| StandingsRow {
            position: 0,
            season,
            club_id,
            club_name: club_names.get(&club_id).cloned().unwrap_or_default(),
            points: record.points(),
            games: record.games,
            wins: record.wins,
            draws: record.draws,
            losses: record.losses,
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            goal_difference: record.goals_for - record.goals_against,
            yellow_cards: record.yellow_cards,
            red_cards: record.red_cards,
        })
        .collect::<Vec<_>>();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
            .then_with(|| b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.club_name.cmp(&b.club_name))
            .then_with(|| a.club_id.cmp(&b.club_id))
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index + 1;
    }

    rows
}

/// Builds the top-scorer ranking of `season` from every statistic of its matches.
///
/// Unlike the standings this does not look at whether a match is finalized. Players who
/// did not score at all are left out. The club shown is the player's current club, not
/// the one they played for when the goals were scored.
pub fn compute_scorers(
    season: i32,
    players: &HashMap<String, PlayerInfo>,
    stats: &[StatLine],
) -> Vec<ScorerRow> {
    let mut goals_by_player: BTreeMap<&str, (i32, HashSet<i32>)> = BTreeMap::new();

    for line in stats {
        let entry = goals_by_player.entry(line.player_id.as_str()).or_default();
        entry.0 += line.goals;
        if line.goals > 0 {
            entry.1.insert(line.match_id);
        }
    }

    let mut rows = goals_by_player
        .into_iter()
        .filter(|(_, (total_goals, _))| *total_goals > 0)
        .filter_map(|(player_id, (total_goals, scored_in))| {
            // A statistic always points at an existing player; skip rather than guess.
            let info = players.get(player_id)?;
            Some(ScorerRow {
                position: 0,
                season,
                player_id: player_id.to_owned(),
                player_name: info.name.clone(),
                player_position: info.position,
                club_name: info.club_name.clone(),
                total_goals,
                matches_with_goal: scored_in.len() as i32,
            })
        })
        .collect::<Vec<_>>();

    rows.sort_by(|a, b| {
        b.total_goals
            .cmp(&a.total_goals)
            .then_with(|| b.matches_with_goal.cmp(&a.matches_with_goal))
            .then_with(|| a.player_name.cmp(&b.player_name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUB_A: i32 = 1;
    const CLUB_B: i32 = 2;
    const CLUB_C: i32 = 3;

    fn names() -> HashMap<i32, String> {
        vec![(CLUB_A, "ClubA"), (CLUB_B, "ClubB"), (CLUB_C, "ClubC")]
            .into_iter()
            .map(|(id, name)| (id, name.to_owned()))
            .collect()
    }

    fn result(match_id: i32, home: i32, away: i32, home_goals: i32, away_goals: i32) -> MatchResult {
        MatchResult {
            match_id,
            home_club_id: home,
            away_club_id: away,
            home_goals,
            away_goals,
            finalized: true,
        }
    }

    fn line(match_id: i32, player_id: &str, club_id: Option<i32>, goals: i32) -> StatLine {
        StatLine {
            match_id,
            player_id: player_id.to_owned(),
            club_id,
            goals,
            assists: 0,
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    fn player(name: &str, club_name: Option<&str>) -> PlayerInfo {
        PlayerInfo {
            name: name.to_owned(),
            position: Position::Forward,
            club_name: club_name.map(str::to_owned),
        }
    }

    #[test]
    fn two_match_season_ranks_by_goal_difference_on_equal_points() {
        let matches = vec![result(1, CLUB_A, CLUB_B, 2, 1), result(2, CLUB_B, CLUB_C, 0, 0)];

        let table = compute_standings(2025, &names(), &matches, &[]);

        let order = table.iter().map(|row| row.club_name.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["ClubA", "ClubC", "ClubB"]);

        let a = &table[0];
        assert_eq!((a.position, a.games, a.wins, a.points, a.goal_difference), (1, 1, 1, 3, 1));

        let c = &table[1];
        assert_eq!((c.position, c.games, c.draws, c.points, c.goal_difference), (2, 1, 1, 1, 0));

        let b = &table[2];
        assert_eq!(
            (b.position, b.games, b.losses, b.draws, b.points, b.goal_difference),
            (3, 2, 1, 1, 1, -1)
        );
        assert_eq!((b.goals_for, b.goals_against), (1, 2));
    }

    #[test]
    fn provisional_matches_do_not_count() {
        let mut pending = result(1, CLUB_A, CLUB_B, 4, 0);
        pending.finalized = false;

        let table = compute_standings(2025, &names(), &[pending, result(2, CLUB_B, CLUB_C, 1, 2)], &[]);

        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|row| row.club_id != CLUB_A));
        assert_eq!(table[0].club_id, CLUB_C);
    }

    #[test]
    fn empty_season_gives_empty_tables() {
        assert!(compute_standings(2025, &names(), &[], &[]).is_empty());
        assert!(compute_scorers(2025, &HashMap::new(), &[]).is_empty());
    }

    #[test]
    fn cards_are_attributed_through_the_players_club() {
        let matches = vec![result(1, CLUB_A, CLUB_B, 1, 1)];
        let mut home_booking = line(1, "p1", Some(CLUB_A), 0);
        home_booking.yellow_cards = 2;
        home_booking.red_cards = 1;
        let mut away_booking = line(1, "p2", Some(CLUB_B), 0);
        away_booking.yellow_cards = 1;
        // Transferred to a club that did not play this match: counted for nobody.
        let mut elsewhere = line(1, "p3", Some(CLUB_C), 0);
        elsewhere.yellow_cards = 5;
        let mut free_agent = line(1, "p4", None, 0);
        free_agent.red_cards = 1;

        let table = compute_standings(
            2025,
            &names(),
            &matches,
            &[home_booking, away_booking, elsewhere, free_agent],
        );

        let a = table.iter().find(|row| row.club_id == CLUB_A).unwrap();
        let b = table.iter().find(|row| row.club_id == CLUB_B).unwrap();
        assert_eq!((a.yellow_cards, a.red_cards), (2, 1));
        assert_eq!((b.yellow_cards, b.red_cards), (1, 0));
        assert!(table.iter().all(|row| row.club_id != CLUB_C));
    }

    #[test]
    fn cards_from_provisional_matches_are_ignored() {
        let mut pending = result(2, CLUB_A, CLUB_B, 0, 0);
        pending.finalized = false;
        let mut booking = line(2, "p1", Some(CLUB_A), 0);
        booking.yellow_cards = 1;

        let table = compute_standings(
            2025,
            &names(),
            &[result(1, CLUB_A, CLUB_B, 0, 0), pending],
            &[booking],
        );

        assert!(table.iter().all(|row| row.yellow_cards == 0));
    }

    #[test]
    fn full_tie_falls_back_to_club_name() {
        let table = compute_standings(2025, &names(), &[result(1, CLUB_B, CLUB_A, 1, 1)], &[]);

        assert_eq!(table[0].club_name, "ClubA");
        assert_eq!(table[1].club_name, "ClubB");
        assert_eq!((table[0].position, table[1].position), (1, 2));
    }

    #[test]
    fn goals_scored_break_ties_before_names() {
        let matches = vec![result(1, CLUB_A, CLUB_B, 3, 3), result(2, CLUB_C, CLUB_A, 0, 0)];

        let table = compute_standings(2025, &names(), &matches, &[]);

        // B and C level on points and goal difference, B scored more.
        assert_eq!(table[0].club_id, CLUB_A);
        assert_eq!(table[1].club_id, CLUB_B);
        assert_eq!(table[2].club_id, CLUB_C);
    }

    #[test]
    fn scorers_count_goals_and_scoring_matches() {
        let players = vec![
            ("p1".to_owned(), player("Ana", Some("ClubA"))),
            ("p2".to_owned(), player("Bia", Some("ClubB"))),
            ("p3".to_owned(), player("Caio", None)),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>();
        let stats = vec![
            line(1, "p1", Some(CLUB_A), 2),
            line(2, "p1", Some(CLUB_A), 0),
            line(3, "p1", Some(CLUB_A), 1),
            line(1, "p2", Some(CLUB_B), 3),
            line(2, "p3", None, 0),
        ];

        let scorers = compute_scorers(2025, &players, &stats);

        assert_eq!(scorers.len(), 2);
        assert_eq!(scorers[0].player_id, "p1");
        assert_eq!((scorers[0].total_goals, scorers[0].matches_with_goal), (3, 2));
        assert_eq!(scorers[1].player_id, "p2");
        assert_eq!((scorers[1].total_goals, scorers[1].matches_with_goal), (3, 1));
        assert_eq!(scorers[1].club_name.as_deref(), Some("ClubB"));
        assert!(scorers.iter().all(|row| row.player_id != "p3"));
    }

    #[test]
    fn scorer_ties_fall_back_to_player_name() {
        let players = vec![
            ("x".to_owned(), player("Zeca", None)),
            ("y".to_owned(), player("Alex", None)),
        ]
        .into_iter()
        .collect::<HashMap<_, _>>();
        let stats = vec![line(1, "x", None, 1), line(1, "y", None, 1)];

        let scorers = compute_scorers(2025, &players, &stats);

        assert_eq!(scorers[0].player_name, "Alex");
        assert_eq!(scorers[1].player_name, "Zeca");
        assert_eq!((scorers[0].position, scorers[1].position), (1, 2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn matches_strategy() -> impl Strategy<Value = Vec<MatchResult>> {
            prop::collection::vec(
                (1..7i32, 1..7i32, 0..6i32, 0..6i32, any::<bool>()),
                0..25,
            )
            .prop_map(|raw| {
                raw.into_iter()
                    .enumerate()
                    .filter(|(_, (home, away, ..))| home != away)
                    .map(|(index, (home, away, home_goals, away_goals, finalized))| {
                        MatchResult {
                            match_id: index as i32 + 1,
                            home_club_id: home,
                            away_club_id: away,
                            home_goals,
                            away_goals,
                            finalized,
                        }
                    })
                    .collect()
            })
        }

        fn club_names() -> HashMap<i32, String> {
            (1..7).map(|id| (id, format!("Club {}", id % 3))).collect()
        }

        proptest! {
            /// Property: the same matches always give the same table
            #[test]
            fn prop_standings_idempotent(matches in matches_strategy()) {
                let first = compute_standings(2025, &club_names(), &matches, &[]);
                let second = compute_standings(2025, &club_names(), &matches, &[]);
                prop_assert_eq!(first, second);
            }

            /// Property: exactly the clubs with a finalized match appear, each once
            #[test]
            fn prop_standings_complete_and_exclusive(matches in matches_strategy()) {
                let table = compute_standings(2025, &club_names(), &matches, &[]);
                let expected = matches
                    .iter()
                    .filter(|game| game.finalized)
                    .flat_map(|game| vec![game.home_club_id, game.away_club_id])
                    .collect::<HashSet<_>>();
                let listed = table.iter().map(|row| row.club_id).collect::<Vec<_>>();
                prop_assert_eq!(listed.len(), expected.len());
                prop_assert_eq!(listed.into_iter().collect::<HashSet<_>>(), expected);
            }

            /// Property: points and goal difference follow from the counters
            #[test]
            fn prop_standings_laws(matches in matches_strategy()) {
                for row in compute_standings(2025, &club_names(), &matches, &[]) {
                    prop_assert_eq!(row.points, 3 * row.wins + row.draws);
                    prop_assert_eq!(row.goal_difference, row.goals_for - row.goals_against);
                    prop_assert_eq!(row.games, row.wins + row.draws + row.losses);
                }
            }

            /// Property: positions are 1..=n with no shared rank
            #[test]
            fn prop_standings_total_order(matches in matches_strategy()) {
                let table = compute_standings(2025, &club_names(), &matches, &[]);
                let positions = table.iter().map(|row| row.position).collect::<Vec<_>>();
                prop_assert_eq!(positions, (1..=table.len()).collect::<Vec<_>>());
            }

            /// Property: nobody without a goal makes the scorer table
            #[test]
            fn prop_scorers_exclude_goalless_players(
                goals in prop::collection::vec((0..4usize, 1..10i32, 0..3i32), 0..30)
            ) {
                let players = (0..4)
                    .map(|id| (format!("p{}", id), player(&format!("Player {}", id), None)))
                    .collect::<HashMap<_, _>>();
                let stats = goals
                    .iter()
                    .map(|(player_index, match_id, scored)| {
                        line(*match_id, &format!("p{}", player_index), None, *scored)
                    })
                    .collect::<Vec<_>>();

                let scorers = compute_scorers(2025, &players, &stats);

                for row in &scorers {
                    prop_assert!(row.total_goals > 0);
                    prop_assert!(row.matches_with_goal > 0);
                }
                for player_id in players.keys() {
                    let total: i32 = stats
                        .iter()
                        .filter(|line| &line.player_id == player_id)
                        .map(|line| line.goals)
                        .sum();
                    let listed = scorers.iter().any(|row| &row.player_id == player_id);
                    prop_assert_eq!(listed, total > 0);
                }
            }
        }
    }
}
