//! Reads and writes against the league database.
//!
//! Every function takes the connection it works on, so the web executors, the import
//! tool and the tests all share the same code paths.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};

use crate::errors::LeagueError;

pub mod clubs;
pub mod matches;
pub mod players;
pub mod seasons;
pub mod stadiums;
pub mod statistics;
pub mod tables;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Opens a connection with foreign keys enforced and the schema up to date.
pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, LeagueError> {
    let mut connection = SqliteConnection::establish(database_url)?;

    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut connection)?;
    diesel::sql_query("PRAGMA busy_timeout = 5000").execute(&mut connection)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| LeagueError::Migration(error.to_string()))?;
    for version in applied {
        info!("Applied migration {}", version);
    }

    Ok(connection)
}
