use actix::MailboxError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};

#[derive(Debug, Fail)]
pub enum LeagueError {
    #[fail(display = "{}", _0)]
    Validation(String),
    #[fail(display = "{}", _0)]
    ConstraintViolation(String),
    #[fail(display = "{}", _0)]
    Conflict(String),
    #[fail(display = "{}", _0)]
    ReferentialConflict(String),
    #[fail(display = "{} not found", _0)]
    NotFound(String),
    #[fail(display = "Database error: {}", _0)]
    Database(#[fail(cause)] DieselError),
    #[fail(display = "Could not connect to the database: {}", _0)]
    Connection(#[fail(cause)] ConnectionError),
    #[fail(display = "Migration failed: {}", _0)]
    Migration(String),
    #[fail(display = "Database executor unavailable: {}", _0)]
    Mailbox(#[fail(cause)] MailboxError),
}

impl LeagueError {
    pub fn on_read(error: DieselError, what: &str) -> LeagueError {
        match error {
            DieselError::NotFound => LeagueError::NotFound(what.to_owned()),
            other => LeagueError::Database(other),
        }
    }

    /// Classifies a failed insert or update. A dangling foreign key means a referenced
    /// entity does not exist.
    pub fn on_write(error: DieselError, what: &str) -> LeagueError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                LeagueError::Conflict(format!("{} already exists", what))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                LeagueError::ConstraintViolation(format!("{} references a missing entity", what))
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                LeagueError::Validation(format!("{} is invalid: {}", what, info.message()))
            }
            DieselError::NotFound => LeagueError::NotFound(what.to_owned()),
            other => LeagueError::Database(other),
        }
    }

    /// Classifies a failed delete. A foreign key violation here means dependent rows
    /// still point at the row being removed.
    pub fn on_delete(error: DieselError, what: &str) -> LeagueError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                LeagueError::ReferentialConflict(format!("{} is still in use", what))
            }
            DieselError::NotFound => LeagueError::NotFound(what.to_owned()),
            other => LeagueError::Database(other),
        }
    }
}

impl From<DieselError> for LeagueError {
    fn from(error: DieselError) -> Self {
        match error {
            DieselError::NotFound => LeagueError::NotFound("record".to_owned()),
            other => LeagueError::Database(other),
        }
    }
}

impl From<ConnectionError> for LeagueError {
    fn from(error: ConnectionError) -> Self {
        LeagueError::Connection(error)
    }
}

impl From<MailboxError> for LeagueError {
    fn from(error: MailboxError) -> Self {
        LeagueError::Mailbox(error)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::Validation(_) => StatusCode::BAD_REQUEST,
            LeagueError::NotFound(_) => StatusCode::NOT_FOUND,
            LeagueError::Conflict(_) | LeagueError::ReferentialConflict(_) => StatusCode::CONFLICT,
            LeagueError::ConstraintViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LeagueError::Database(_)
            | LeagueError::Connection(_)
            | LeagueError::Migration(_)
            | LeagueError::Mailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{:?}", self);
        } else {
            warn!("{}", self);
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
