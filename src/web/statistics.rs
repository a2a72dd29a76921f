use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::Statistic;
use crate::store::statistics;
use crate::web::app_state::{AppState, DbExecutor};

#[derive(Deserialize, Debug)]
pub struct StatisticQuery {
    match_id: Option<i32>,
}

struct FetchStatistics {
    match_id: i32,
}

impl Message for FetchStatistics {
    type Result = Result<Vec<Statistic>, LeagueError>;
}

impl Handler<FetchStatistics> for DbExecutor {
    type Result = Result<Vec<Statistic>, LeagueError>;

    fn handle(&mut self, msg: FetchStatistics, _: &mut Self::Context) -> Self::Result {
        statistics::for_match(&mut self.connection, msg.match_id)
    }
}

struct SaveStatistic {
    statistic: Statistic,
}

impl Message for SaveStatistic {
    type Result = Result<Statistic, LeagueError>;
}

impl Handler<SaveStatistic> for DbExecutor {
    type Result = Result<Statistic, LeagueError>;

    fn handle(&mut self, msg: SaveStatistic, _: &mut Self::Context) -> Self::Result {
        statistics::upsert(&mut self.connection, &msg.statistic)
    }
}

pub async fn index(
    query: web::Query<StatisticQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let match_id = query
        .match_id
        .ok_or_else(|| LeagueError::Validation("query parameter match_id is required".to_owned()))?;
    let statistics = state.db.send(FetchStatistics { match_id }).await??;
    Ok(HttpResponse::Ok().json(statistics))
}

pub async fn upsert(
    statistic: web::Json<Statistic>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let statistic = state
        .db
        .send(SaveStatistic {
            statistic: statistic.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Created().json(statistic))
}
