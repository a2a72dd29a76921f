table! {
    clubs (club_id) {
        club_id -> Integer,
        name -> Text,
        city -> Text,
        state -> Text,
        founded_year -> Nullable<Integer>,
        coach -> Nullable<Text>,
    }
}

table! {
    use diesel::sql_types::{Date, Integer, Nullable, Text};
    use crate::models::PositionMapping;

    players (player_id) {
        player_id -> Text,
        name -> Text,
        position -> PositionMapping,
        birth_date -> Date,
        nationality -> Text,
        club_id -> Nullable<Integer>,
    }
}

table! {
    stadiums (stadium_id) {
        stadium_id -> Integer,
        name -> Text,
        city -> Text,
        capacity -> Nullable<Integer>,
    }
}

table! {
    seasons (year) {
        year -> Integer,
        created_at -> Timestamp,
    }
}

table! {
    rounds (season, round_number) {
        season -> Integer,
        round_number -> Integer,
        starts_on -> Nullable<Date>,
        ends_on -> Nullable<Date>,
    }
}

table! {
    matches (match_id) {
        match_id -> Integer,
        kickoff -> Timestamp,
        home_club_id -> Integer,
        away_club_id -> Integer,
        stadium_id -> Integer,
        season -> Integer,
        round_number -> Integer,
        home_goals -> Integer,
        away_goals -> Integer,
        finalized -> Bool,
    }
}

table! {
    statistics (match_id, player_id) {
        match_id -> Integer,
        player_id -> Text,
        goals -> Integer,
        assists -> Integer,
        yellow_cards -> Integer,
        red_cards -> Integer,
    }
}

joinable!(players -> clubs (club_id));
joinable!(rounds -> seasons (season));
joinable!(matches -> seasons (season));
joinable!(matches -> stadiums (stadium_id));
joinable!(statistics -> matches (match_id));
joinable!(statistics -> players (player_id));

allow_tables_to_appear_in_same_query!(
    clubs,
    players,
    stadiums,
    seasons,
    rounds,
    matches,
    statistics,
);
