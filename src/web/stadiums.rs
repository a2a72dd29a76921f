use actix::prelude::*;
use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;
use crate::models::{Stadium, StadiumForm};
use crate::store::stadiums;
use crate::web::app_state::{AppState, DbExecutor};
use crate::web::notice;

struct ListStadiums;

impl Message for ListStadiums {
    type Result = Result<Vec<Stadium>, LeagueError>;
}

impl Handler<ListStadiums> for DbExecutor {
    type Result = Result<Vec<Stadium>, LeagueError>;

    fn handle(&mut self, _msg: ListStadiums, _: &mut Self::Context) -> Self::Result {
        stadiums::list(&mut self.connection)
    }
}

struct FetchStadium {
    stadium_id: i32,
}

impl Message for FetchStadium {
    type Result = Result<Stadium, LeagueError>;
}

impl Handler<FetchStadium> for DbExecutor {
    type Result = Result<Stadium, LeagueError>;

    fn handle(&mut self, msg: FetchStadium, _: &mut Self::Context) -> Self::Result {
        stadiums::find(&mut self.connection, msg.stadium_id)
    }
}

struct SaveStadium {
    stadium_id: Option<i32>,
    form: StadiumForm,
}

impl Message for SaveStadium {
    type Result = Result<Stadium, LeagueError>;
}

impl Handler<SaveStadium> for DbExecutor {
    type Result = Result<Stadium, LeagueError>;

    fn handle(&mut self, msg: SaveStadium, _: &mut Self::Context) -> Self::Result {
        match msg.stadium_id {
            Some(stadium_id) => stadiums::update(&mut self.connection, stadium_id, &msg.form),
            None => stadiums::create(&mut self.connection, &msg.form),
        }
    }
}

struct DeleteStadium {
    stadium_id: i32,
}

impl Message for DeleteStadium {
    type Result = Result<(), LeagueError>;
}

impl Handler<DeleteStadium> for DbExecutor {
    type Result = Result<(), LeagueError>;

    fn handle(&mut self, msg: DeleteStadium, _: &mut Self::Context) -> Self::Result {
        stadiums::delete(&mut self.connection, msg.stadium_id)
    }
}

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, LeagueError> {
    let stadiums = state.db.send(ListStadiums).await??;
    Ok(HttpResponse::Ok().json(stadiums))
}

pub async fn show(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let stadium = state.db.send(FetchStadium { stadium_id: path.0 }).await??;
    Ok(HttpResponse::Ok().json(stadium))
}

pub async fn create(
    form: web::Json<StadiumForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let stadium = state
        .db
        .send(SaveStadium {
            stadium_id: None,
            form: form.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Created().json(stadium))
}

pub async fn update(
    path: web::Path<(i32,)>,
    form: web::Json<StadiumForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    let stadium = state
        .db
        .send(SaveStadium {
            stadium_id: Some(path.0),
            form: form.into_inner(),
        })
        .await??;
    Ok(HttpResponse::Ok().json(stadium))
}

pub async fn delete(
    path: web::Path<(i32,)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, LeagueError> {
    state.db.send(DeleteStadium { stadium_id: path.0 }).await??;
    Ok(notice(format!("Stadium {} deleted", path.0)))
}
