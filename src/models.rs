use super::schema::*;
use chrono::prelude::*;
use diesel::prelude::*;
use crate::errors::LeagueError;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = clubs, primary_key(club_id))]
pub struct Club {
    pub club_id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub founded_year: Option<i32>,
    pub coach: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug, Clone, Deserialize)]
#[diesel(table_name = clubs, treat_none_as_null = true)]
pub struct ClubForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub founded_year: Option<i32>,
    pub coach: Option<String>,
}

impl ClubForm {
    pub fn validate(&self) -> Result<(), LeagueError> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        require("state", &self.state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DbEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Fullback,
    DefensiveMidfielder,
    Midfielder,
    Forward,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = players, primary_key(player_id))]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub position: Position,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub club_id: Option<i32>,
}

#[derive(Insertable, Debug, Clone, Deserialize)]
#[diesel(table_name = players)]
pub struct NewPlayer {
    pub player_id: String,
    pub name: String,
    pub position: Position,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub club_id: Option<i32>,
}

impl NewPlayer {
    pub fn validate(&self) -> Result<(), LeagueError> {
        require("player_id", &self.player_id)?;
        require("name", &self.name)?;
        require("nationality", &self.nationality)
    }
}

/// Every field of a player except its natural key, which never changes.
#[derive(AsChangeset, Debug, Clone, Deserialize)]
#[diesel(table_name = players, treat_none_as_null = true)]
pub struct PlayerChanges {
    pub name: String,
    pub position: Position,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub club_id: Option<i32>,
}

impl PlayerChanges {
    pub fn validate(&self) -> Result<(), LeagueError> {
        require("name", &self.name)?;
        require("nationality", &self.nationality)
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = stadiums, primary_key(stadium_id))]
pub struct Stadium {
    pub stadium_id: i32,
    pub name: String,
    pub city: String,
    pub capacity: Option<i32>,
}

#[derive(Insertable, AsChangeset, Debug, Clone, Deserialize)]
#[diesel(table_name = stadiums, treat_none_as_null = true)]
pub struct StadiumForm {
    pub name: String,
    pub city: String,
    pub capacity: Option<i32>,
}

impl StadiumForm {
    pub fn validate(&self) -> Result<(), LeagueError> {
        require("name", &self.name)?;
        require("city", &self.city)?;
        match self.capacity {
            Some(capacity) if capacity < 0 => Err(LeagueError::Validation(
                "capacity must not be negative".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = seasons, primary_key(year))]
pub struct Season {
    pub year: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = rounds)]
pub struct Round {
    pub season: i32,
    pub round_number: i32,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = matches, primary_key(match_id))]
pub struct Match {
    pub match_id: i32,
    pub kickoff: NaiveDateTime,
    pub home_club_id: i32,
    pub away_club_id: i32,
    pub stadium_id: i32,
    pub season: i32,
    pub round_number: i32,
    pub home_goals: i32,
    pub away_goals: i32,
    pub finalized: bool,
}

/// The writable columns of a match. Goals stay provisional until `finalized` is set.
#[derive(Insertable, AsChangeset, Debug, Clone, Deserialize)]
#[diesel(table_name = matches)]
pub struct MatchFields {
    pub kickoff: NaiveDateTime,
    pub home_club_id: i32,
    pub away_club_id: i32,
    pub stadium_id: i32,
    pub season: i32,
    pub round_number: i32,
    #[serde(default)]
    pub home_goals: i32,
    #[serde(default)]
    pub away_goals: i32,
    #[serde(default)]
    pub finalized: bool,
}

impl MatchFields {
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.home_club_id == self.away_club_id {
            return Err(LeagueError::Validation(
                "a club cannot play against itself".to_owned(),
            ));
        }
        if self.home_goals < 0 || self.away_goals < 0 {
            return Err(LeagueError::Validation(
                "goal counts must not be negative".to_owned(),
            ));
        }
        if self.round_number < 1 {
            return Err(LeagueError::Validation(
                "round_number must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq, Serialize,
         Deserialize)]
#[diesel(table_name = statistics, primary_key(match_id, player_id))]
pub struct Statistic {
    pub match_id: i32,
    pub player_id: String,
    #[serde(default)]
    pub goals: i32,
    #[serde(default)]
    pub assists: i32,
    #[serde(default)]
    pub yellow_cards: i32,
    #[serde(default)]
    pub red_cards: i32,
}

impl Statistic {
    pub fn validate(&self) -> Result<(), LeagueError> {
        require("player_id", &self.player_id)?;
        if self.goals < 0 || self.assists < 0 || self.yellow_cards < 0 || self.red_cards < 0 {
            return Err(LeagueError::Validation(
                "statistic counters must not be negative".to_owned(),
            ));
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), LeagueError> {
    if value.trim().is_empty() {
        Err(LeagueError::Validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}
