use actix_web::{web, HttpResponse};

use crate::errors::LeagueError;

pub mod app_state;
pub mod clubs;
pub mod matches;
pub mod players;
pub mod seasons;
pub mod stadiums;
pub mod standings;
pub mod statistics;

#[derive(Serialize)]
struct Notice {
    message: String,
}

pub(crate) fn notice(message: String) -> HttpResponse {
    HttpResponse::Ok().json(Notice { message })
}

/// Parses a season year given as text, e.g. from a query string.
pub fn parse_year(raw: Option<&str>) -> Result<i32, LeagueError> {
    let raw = raw
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| LeagueError::Validation("season is required".to_owned()))?;

    raw.parse::<i32>()
        .map_err(|_| LeagueError::Validation(format!("season must be a number, got {:?}", raw)))
}

/// Registers every route of the league API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/standings", web::get().to(standings::standings))
        .route("/scorers", web::get().to(standings::scorers))
        .service(
            web::resource("/clubs")
                .route(web::get().to(clubs::index))
                .route(web::post().to(clubs::create)),
        )
        .service(
            web::resource("/clubs/{id}")
                .route(web::get().to(clubs::show))
                .route(web::put().to(clubs::update))
                .route(web::delete().to(clubs::delete)),
        )
        .service(
            web::resource("/players")
                .route(web::get().to(players::index))
                .route(web::post().to(players::create)),
        )
        .service(
            web::resource("/players/{player_id}")
                .route(web::get().to(players::show))
                .route(web::put().to(players::update))
                .route(web::delete().to(players::delete)),
        )
        .service(
            web::resource("/stadiums")
                .route(web::get().to(stadiums::index))
                .route(web::post().to(stadiums::create)),
        )
        .service(
            web::resource("/stadiums/{id}")
                .route(web::get().to(stadiums::show))
                .route(web::put().to(stadiums::update))
                .route(web::delete().to(stadiums::delete)),
        )
        .service(
            web::resource("/seasons")
                .route(web::get().to(seasons::index))
                .route(web::post().to(seasons::create)),
        )
        .route("/seasons/{year}", web::delete().to(seasons::delete))
        .route("/seasons/{year}/rounds", web::get().to(seasons::rounds))
        .route("/seasons/{year}/table", web::get().to(standings::show))
        .service(
            web::resource("/matches")
                .route(web::get().to(matches::index))
                .route(web::post().to(matches::create)),
        )
        .service(
            web::resource("/matches/{id}")
                .route(web::get().to(matches::show))
                .route(web::put().to(matches::update))
                .route(web::delete().to(matches::delete)),
        )
        .route("/matches/{id}/players", web::get().to(matches::players))
        .service(
            web::resource("/statistics")
                .route(web::get().to(statistics::index))
                .route(web::post().to(statistics::upsert)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_year_accepts_padded_numbers() {
        assert_eq!(parse_year(Some(" 2025 ")).unwrap(), 2025);
    }

    #[test]
    fn parse_year_rejects_missing_and_garbage() {
        for raw in &[None, Some(""), Some("twenty"), Some("20.5")] {
            match parse_year(*raw) {
                Err(LeagueError::Validation(_)) => {}
                other => panic!("{:?} parsed as {:?}", raw, other),
            }
        }
    }
}
