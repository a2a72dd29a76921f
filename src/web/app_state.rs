use std::process;
use std::sync::Mutex;

use actix::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::errors::LeagueError;
use crate::store;

pub struct DbExecutor {
    pub connection: SqliteConnection,
}

impl Actor for DbExecutor {
    type Context = SyncContext<Self>;
}

/// Shared by every request handler: the address of the database executor pool.
pub struct AppState {
    pub db: Addr<DbExecutor>,
}

pub fn establish_connection(database_url: &str) -> Result<DbExecutor, LeagueError> {
    Ok(DbExecutor {
        connection: store::establish_connection(database_url)?,
    })
}

/// Starts `threads` executors, each owning its own connection to `database_url`.
///
/// The connection is checked once up front so that a bad url or a failing migration is
/// reported to the caller. That first connection is handed to the first executor. A
/// `:memory:` database only exists inside that one connection, so it always runs on a
/// single executor.
pub fn start_executors(database_url: &str, threads: usize) -> Result<Addr<DbExecutor>, LeagueError> {
    let threads = if database_url == ":memory:" { 1 } else { threads };
    let first = Mutex::new(Some(establish_connection(database_url)?));
    let database_url = database_url.to_owned();

    Ok(SyncArbiter::start(threads, move || {
        let checked = first.lock().ok().and_then(|mut slot| slot.take());
        match checked {
            Some(executor) => executor,
            None => match establish_connection(&database_url) {
                Ok(executor) => executor,
                Err(error) => {
                    error!("Error connecting to {}: {}", database_url, error);
                    process::exit(1);
                }
            },
        }
    }))
}
