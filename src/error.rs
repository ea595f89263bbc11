use std::fmt::Display;
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use mongodb::bson::ser::Error as BsonError;
use mongodb::error::Error as DatabaseError;
use serde::{Serialize, Serializer};

use crate::campaign::CampaignId;
use crate::popup::PopupId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq, Eq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidForm(#[derivative(PartialEq = "ignore")] UrlencodedError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),

    // 401
    MissingSession,
    InvalidSession,

    // 403
    CampaignAccessDenied {
        campaign_id: CampaignId,
    },

    // 404
    PathNotFound,
    CampaignNotFound {
        campaign_id: CampaignId,
    },
    PopupNotFound {
        popup_id: PopupId,
    },
    RouteNotRecognized {
        path: String,
    },

    // 409
    ConcurrentModificationDetected,

    // 422
    MissingField {
        field: &'static str,
    },
    InvalidSchedule,

    // 500
    InvalidConfig {
        name: &'static str,
        value: String,
    },
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    FailedToSerializeToBson(#[derivative(PartialEq = "ignore")] BsonError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidForm(_) => "E4001002",
            Error::InvalidQuery(_) => "E4001003",
            Error::MissingSession => "E4011000",
            Error::InvalidSession => "E4011001",
            Error::CampaignAccessDenied { .. } => "E4031000",
            Error::PathNotFound => "E4041000",
            Error::CampaignNotFound { .. } => "E4041001",
            Error::PopupNotFound { .. } => "E4041002",
            Error::RouteNotRecognized { .. } => "E4041003",
            Error::ConcurrentModificationDetected => "E4091000",
            Error::MissingField { .. } => "E4221000",
            Error::InvalidSchedule => "E4221001",
            Error::InvalidConfig { .. } => "E5001000",
            Error::FailedDatabaseCall(_) => "E5001001",
            Error::FailedToSerializeToBson(_) => "E5001002",
            Error::IoError(_) => "E5001003",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidForm(_) => "The given form could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::MissingSession => "The request is not associated with a user",
            Error::InvalidSession => "The request carries an invalid user id",
            Error::CampaignAccessDenied { .. } => {
                "The requested campaign belongs to another user"
            }
            Error::PathNotFound => "The requested path was not found",
            Error::CampaignNotFound { .. } => "The requested campaign was not found",
            Error::PopupNotFound { .. } => "The requested popup was not found",
            Error::RouteNotRecognized { .. } => "The requested page does not exist",
            Error::ConcurrentModificationDetected => {
                "The server detected a concurrent modification"
            }
            Error::MissingField { .. } => "A required field was left empty",
            Error::InvalidSchedule => "The end date must not be before the start date",
            Error::InvalidConfig { .. } => "The server configuration is invalid",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::FailedToSerializeToBson(_) => {
                "An error occurred when serializing an object to bson"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::MissingSession => StatusCode::UNAUTHORIZED,
            Error::InvalidSession => StatusCode::UNAUTHORIZED,
            Error::CampaignAccessDenied { .. } => StatusCode::FORBIDDEN,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::PopupNotFound { .. } => StatusCode::NOT_FOUND,
            Error::RouteNotRecognized { .. } => StatusCode::NOT_FOUND,
            Error::ConcurrentModificationDetected => StatusCode::CONFLICT,
            Error::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidSchedule => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedToSerializeToBson(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::InvalidJson(err) => write!(f, "{}: {}", self.error_message(), err),
            Error::InvalidPath(err) => write!(f, "{}: {}", self.error_message(), err),
            Error::InvalidForm(err) => write!(f, "{}: {}", self.error_message(), err),
            Error::InvalidQuery(err) => write!(f, "{}: {}", self.error_message(), err),
            Error::MissingField { field } => write!(f, "{}: {}", self.error_message(), field),
            Error::InvalidConfig { name, value } => {
                write!(f, "{}: {}={:?}", self.error_message(), name, value)
            }
            Error::FailedDatabaseCall(err) => write!(f, "{}: {}", self.error_message(), err),
            Error::FailedToSerializeToBson(err) => {
                write!(f, "{}: {}", self.error_message(), err)
            }
            Error::IoError(err) => write!(f, "{}: {}", self.error_message(), err),
            _ => f.write_str(self.error_message()),
        }
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<BsonError> for Error {
    fn from(error: BsonError) -> Error {
        Error::FailedToSerializeToBson(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidForm(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::FailedToSerializeToBson(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
