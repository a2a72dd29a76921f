use actix::prelude::*;
use actix_web::{web, HttpResponse};
use futures::future;

use crate::errors::LeagueError;
use crate::standings::{ScorerRow, StandingsRow};
use crate::store::tables;
use crate::templates::{Context, TEMPLATE_SERVICE};
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::parse_year;

#[derive(Deserialize, Debug)]
pub struct SeasonQuery {
    season: Option<String>,
}

struct FetchStandings {
    season: i32,
}

impl Message for FetchStandings {
    type Result = Result<Vec<StandingsRow>, LeagueError>;
}

impl Handler<FetchStandings> for DbExecutor {
    type Result = Result<Vec<StandingsRow>, LeagueError>;

    fn handle(&mut self, msg: FetchStandings, _: &mut Self::Context) -> Self::Result {
        tables::standings(&mut self.connection, msg.season)
    }
}

struct FetchScorers {
    season: i32,
}

impl Message for FetchScorers {
    type Result = Result<Vec<ScorerRow>, LeagueError>;
}

impl Handler<FetchScorers> for DbExecutor {
    type Result = Result<Vec<ScorerRow>, LeagueError>;

    fn handle(&mut self, msg: FetchScorers, _: &mut Self::Context) -> Self::Result {
        tables::scorers(&mut self.connection, msg.season)
    }
}

pub async fn standings(
    query: web::Query<SeasonQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let season = parse_year(query.season.as_deref())?;
    let table = state.db.send(FetchStandings { season }).await??;
    Ok(HttpResponse::Ok().json(table))
}

pub async fn scorers(
    query: web::Query<SeasonQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let season = parse_year(query.season.as_deref())?;
    let scorers = state.db.send(FetchScorers { season }).await??;
    Ok(HttpResponse::Ok().json(scorers))
}

pub async fn show(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let season = path.0;
    let (standings, scorers) = future::try_join(
        state.db.send(FetchStandings { season }),
        state.db.send(FetchScorers { season }),
    )
    .await?;

    let mut context = Context::new();
    context.insert("season", &season);
    context.insert("standings", &standings?);
    context.insert("scorers", &scorers?);

    match TEMPLATE_SERVICE.render("standings/show.html", &context) {
        Ok(body) => Ok(HttpResponse::Ok().content_type("text/html").body(body)),
        Err(error) => {
            error!("{:?}", error);
            Ok(HttpResponse::InternalServerError()
                .content_type("text/html")
                .body("Something went wrong"))
        }
    }
}
