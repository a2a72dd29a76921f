use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::{NewPlayer, Player, PlayerChanges};
use crate::store::players;
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::notice;

#[derive(Deserialize, Debug, Default)]
pub struct PlayerQuery {
    club_id: Option<i32>,
    #[serde(default)]
    free_agents: bool,
}

impl Message for PlayerQuery {
    type Result = Result<Vec<Player>, LeagueError>;
}

impl Handler<PlayerQuery> for DbExecutor {
    type Result = Result<Vec<Player>, LeagueError>;

    fn handle(&mut self, msg: PlayerQuery, _: &mut Self::Context) -> Self::Result {
        match (msg.club_id, msg.free_agents) {
            (Some(club_id), _) => players::roster(&mut self.connection, club_id),
            (None, true) => players::free_agents(&mut self.connection),
            (None, false) => players::list(&mut self.connection),
        }
    }
}

struct FetchPlayer {
    player_id: String,
}

impl Message for FetchPlayer {
    type Result = Result<Player, LeagueError>;
}

impl Handler<FetchPlayer> for DbExecutor {
    type Result = Result<Player, LeagueError>;

    fn handle(&mut self, msg: FetchPlayer, _: &mut Self::Context) -> Self::Result {
        players::find(&mut self.connection, &msg.player_id)
    }
}

struct CreatePlayer {
    player: NewPlayer,
}

impl Message for CreatePlayer {
    type Result = Result<Player, LeagueError>;
}

impl Handler<CreatePlayer> for DbExecutor {
    type Result = Result<Player, LeagueError>;

    fn handle(&mut self, msg: CreatePlayer, _: &mut Self::Context) -> Self::Result {
        players::create(&mut self.connection, &msg.player)
    }
}

struct UpdatePlayer {
    player_id: String,
    changes: PlayerChanges,
}

impl Message for UpdatePlayer {
    type Result = Result<Player, LeagueError>;
}

impl Handler<UpdatePlayer> for DbExecutor {
    type Result = Result<Player, LeagueError>;

    fn handle(&mut self, msg: UpdatePlayer, _: &mut Self::Context) -> Self::Result {
        players::update(&mut self.connection, &msg.player_id, &msg.changes)
    }
}

struct DeletePlayer {
    player_id: String,
}

impl Message for DeletePlayer {
    type Result = Result<(), LeagueError>;
}

impl Handler<DeletePlayer> for DbExecutor {
    type Result = Result<(), LeagueError>;

    fn handle(&mut self, msg: DeletePlayer, _: &mut Self::Context) -> Self::Result {
        players::delete(&mut self.connection, &msg.player_id)
    }
}

pub async fn index(
    query: web::Query<PlayerQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let players = state.db.send(query.into_inner()).await??;
    Ok(HttpResponse::Ok().json(players))
}

pub async fn show(
    path: web::Path<(String,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let player = state
        .db
        .send(FetchPlayer {
            player_id: path.into_inner().0,
        })
        .await??;
    Ok(HttpResponse::Ok().json(player))
}

pub async fn create(
    player: web::Json<NewPlayer>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let player = state
        .db
        .send(CreatePlayer {
            player: player.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Created().json(player))
}

pub async fn update(
    path: web::Path<(String,)>,
    changes: web::Json<PlayerChanges>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let player = state
        .db
        .send(UpdatePlayer {
            player_id: path.into_inner().0,
            changes: changes.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Ok().json(player))
}

pub async fn delete(
    path: web::Path<(String,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let player_id = path.into_inner().0;
    state
        .db
        .send(DeletePlayer {
            player_id: player_id.clone(),
        })
        .await??;
    Ok(notice(format!("Player {} deleted", player_id)))
}
