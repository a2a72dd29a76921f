use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::{Match, MatchFields, Player};
use crate::store::matches::{self, MatchFilter};
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::notice;

#[derive(Deserialize, Debug)]
pub struct NewMatchForm {
    match_id: Option<i32>,
    #[serde(flatten)]
    fields: MatchFields,
}

struct ListMatches {
    filter: MatchFilter,
}

impl Message for ListMatches {
    type Result = Result<Vec<Match>, LeagueError>;
}

impl Handler<ListMatches> for DbExecutor {
    type Result = Result<Vec<Match>, LeagueError>;

    fn handle(&mut self, msg: ListMatches, _: &mut Self::Context) -> Self::Result {
        matches::list(&mut self.connection, msg.filter)
    }
}

struct FetchMatch {
    match_id: i32,
}

impl Message for FetchMatch {
    type Result = Result<Match, LeagueError>;
}

impl Handler<FetchMatch> for DbExecutor {
    type Result = Result<Match, LeagueError>;

    fn handle(&mut self, msg: FetchMatch, _: &mut Self::Context) -> Self::Result {
        matches::find(&mut self.connection, msg.match_id)
    }
}

struct CreateMatch {
    form: NewMatchForm,
}

impl Message for CreateMatch {
    type Result = Result<Match, LeagueError>;
}

impl Handler<CreateMatch> for DbExecutor {
    type Result = Result<Match, LeagueError>;

    fn handle(&mut self, msg: CreateMatch, _: &mut Self::Context) -> Self::Result {
        matches::create(&mut self.connection, msg.form.match_id, &msg.form.fields)
    }
}

struct UpdateMatch {
    match_id: i32,
    fields: MatchFields,
}

impl Message for UpdateMatch {
    type Result = Result<Match, LeagueError>;
}

impl Handler<UpdateMatch> for DbExecutor {
    type Result = Result<Match, LeagueError>;

    fn handle(&mut self, msg: UpdateMatch, _: &mut Self::Context) -> Self::Result {
        matches::update(&mut self.connection, msg.match_id, &msg.fields)
    }
}

struct DeleteMatch {
    match_id: i32,
}

impl Message for DeleteMatch {
    type Result = Result<(), LeagueError>;
}

impl Handler<DeleteMatch> for DbExecutor {
    type Result = Result<(), LeagueError>;

    fn handle(&mut self, msg: DeleteMatch, _: &mut Self::Context) -> Self::Result {
        matches::delete(&mut self.connection, msg.match_id)
    }
}

struct FetchEligiblePlayers {
    match_id: i32,
}

impl Message for FetchEligiblePlayers {
    type Result = Result<Vec<Player>, LeagueError>;
}

impl Handler<FetchEligiblePlayers> for DbExecutor {
    type Result = Result<Vec<Player>, LeagueError>;

    fn handle(&mut self, msg: FetchEligiblePlayers, _: &mut Self::Context) -> Self::Result {
        matches::eligible_players(&mut self.connection, msg.match_id)
    }
}

pub async fn index(
    filter: web::Query<MatchFilter>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let matches = state
        .db
        .send(ListMatches {
            filter: filter.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Ok().json(matches))
}

pub async fn show(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let game = state.db.send(FetchMatch { match_id: path.0 }).await??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn create(
    form: web::Json<NewMatchForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let game = state
        .db
        .send(CreateMatch {
            form: form.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Created().json(game))
}

pub async fn update(
    path: web::Path<(i32,)>,
    fields: web::Json<MatchFields>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let game = state
        .db
        .send(UpdateMatch {
            match_id: path.0,
            fields: fields.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Ok().json(game))
}

pub async fn delete(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    state.db.send(DeleteMatch { match_id: path.0 }).await??;
    Ok(notice(format!(
        "Match {} and its statistics deleted",
        path.0
    )))
}

pub async fn players(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let players = state
        .db
        .send(FetchEligiblePlayers { match_id: path.0 })
        .await??;
    Ok(HttpResponse::Ok().json(players))
}
