use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::{Round, Season};
use crate::store::seasons;
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::{notice, parse_year};

/// Accepts the year both as a JSON number and as a numeric string.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum YearField {
    Number(i64),
    Text(String),
}

impl YearField {
    fn parse(&self) -> Result<i32, LeagueError> {
        match self {
            YearField::Number(year) if *year >= i64::from(i32::MIN) && *year <= i64::from(i32::MAX) => {
                Ok(*year as i32)
            }
            YearField::Number(year) => Err(LeagueError::Validation(format!(
                "year {} is out of range",
                year
            ))),
            YearField::Text(raw) => parse_year(Some(raw)),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SeasonForm {
    year: YearField,
}

struct ListSeasons;

impl Message for ListSeasons {
    type Result = Result<Vec<Season>, LeagueError>;
}

impl Handler<ListSeasons> for DbExecutor {
    type Result = Result<Vec<Season>, LeagueError>;

    fn handle(&mut self, _msg: ListSeasons, _: &mut Self::Context) -> Self::Result {
        seasons::list(&mut self.connection)
    }
}

struct CreateSeason {
    year: i32,
}

impl Message for CreateSeason {
    type Result = Result<Season, LeagueError>;
}

impl Handler<CreateSeason> for DbExecutor {
    type Result = Result<Season, LeagueError>;

    fn handle(&mut self, msg: CreateSeason, _: &mut Self::Context) -> Self::Result {
        seasons::create(&mut self.connection, msg.year)
    }
}

struct DeleteSeason {
    year: i32,
}

impl Message for DeleteSeason {
    type Result = Result<(), LeagueError>;
}

impl Handler<DeleteSeason> for DbExecutor {
    type Result = Result<(), LeagueError>;

    fn handle(&mut self, msg: DeleteSeason, _: &mut Self::Context) -> Self::Result {
        seasons::delete(&mut self.connection, msg.year)
    }
}

struct ListRounds {
    year: i32,
}

impl Message for ListRounds {
    type Result = Result<Vec<Round>, LeagueError>;
}

impl Handler<ListRounds> for DbExecutor {
    type Result = Result<Vec<Round>, LeagueError>;

    fn handle(&mut self, msg: ListRounds, _: &mut Self::Context) -> Self::Result {
        seasons::rounds(&mut self.connection, msg.year)
    }
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, LeagueError> {
    let seasons = state.db.send(ListSeasons).await??;
    Ok(HttpResponse::Ok().json(seasons))
}

pub async fn create(
    form: web::Json<SeasonForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let year = form.year.parse()?;
    let season = state.db.send(CreateSeason { year }).await??;
    Ok(HttpResponse::Created().json(season))
}

pub async fn delete(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    state.db.send(DeleteSeason { year: path.0 }).await??;
    Ok(notice(format!("Season {} deleted", path.0)))
}

pub async fn rounds(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let rounds = state.db.send(ListRounds { year: path.0 }).await??;
    Ok(HttpResponse::Ok().json(rounds))
}
