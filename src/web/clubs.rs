use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::{Club, ClubForm};
use crate::store::clubs;
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::notice;

struct ListClubs;

impl Message for ListClubs {
    type Result = Result<Vec<Club>, LeagueError>;
}

impl Handler<ListClubs> for DbExecutor {
    type Result = Result<Vec<Club>, LeagueError>;

    fn handle(&mut self, _msg: ListClubs, _: &mut Self::Context) -> Self::Result {
        clubs::list(&mut self.connection)
    }
}

struct FetchClub {
    club_id: i32,
}

impl Message for FetchClub {
    type Result = Result<Club, LeagueError>;
}

impl Handler<FetchClub> for DbExecutor {
    type Result = Result<Club, LeagueError>;

    fn handle(&mut self, msg: FetchClub, _: &mut Self::Context) -> Self::Result {
        clubs::find(&mut self.connection, msg.club_id)
    }
}

struct SaveClub {
    club_id: Option<i32>,
    form: ClubForm,
}

impl Message for SaveClub {
    type Result = Result<Club, LeagueError>;
}

impl Handler<SaveClub> for DbExecutor {
    type Result = Result<Club, LeagueError>;

    fn handle(&mut self, msg: SaveClub, _: &mut Self::Context) -> Self::Result {
        match msg.club_id {
            Some(club_id) => clubs::update(&mut self.connection, club_id, &msg.form),
            None => clubs::create(&mut self.connection, &msg.form),
        }
    }
}

struct DeleteClub {
    club_id: i32,
}

impl Message for DeleteClub {
    type Result = Result<(), LeagueError>;
}

impl Handler<DeleteClub> for DbExecutor {
    type Result = Result<(), LeagueError>;

    fn handle(&mut self, msg: DeleteClub, _: &mut Self::Context) -> Self::Result {
        clubs::delete(&mut self.connection, msg.club_id)
    }
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, LeagueError> {
    let clubs = state.db.send(ListClubs).await??;
    Ok(HttpResponse::Ok().json(clubs))
}

pub async fn show(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let club = state.db.send(FetchClub { club_id: path.0 }).await??;
    Ok(HttpResponse::Ok().json(club))
}

pub async fn create(
    form: web::Json<ClubForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let club = state
        .db
        .send(SaveClub {
            club_id: None,
            form: form.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Created().json(club))
}

pub async fn update(
    path: web::Path<(i32,)>,
    form: web::Json<ClubForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let club = state
        .db
        .send(SaveClub {
            club_id: Some(path.0),
            form: form.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Ok().json(club))
}

pub async fn delete(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    state.db.send(DeleteClub { club_id: path.0 }).await??;
    Ok(notice(format!("Club {} deleted", path.0)))
}
