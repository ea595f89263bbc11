use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::popup::PopupId;
use crate::typedid::{TypedId, TypedIdMarker};
use crate::user::UserId;

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: CampaignFields,
    pub is_active: bool,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

/// The portion of a campaign a user edits through the campaign form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CampaignFields {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_recurring: bool,
    pub popup_id: Option<PopupId>,
}

impl CampaignFields {
    /// Checks the constraints the form inputs enforce before anything is
    /// sent to the store.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField { field: "name" });
        }
        if self.description.trim().is_empty() {
            return Err(Error::MissingField {
                field: "description",
            });
        }

        let start_date = self.start_date.ok_or(Error::MissingField {
            field: "start_date",
        })?;
        let end_date = self
            .end_date
            .ok_or(Error::MissingField { field: "end_date" })?;

        if end_date < start_date {
            return Err(Error::InvalidSchedule);
        }

        Ok(())
    }
}
