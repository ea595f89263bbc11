//! The campaign pages of the user's space: the campaign form and the
//! campaign detail page, driven server side and rendered as view models.

use serde::{Deserialize, Serialize};

use crate::campaign::CampaignId;
use crate::error::Error;
use crate::popup::PopupId;

pub mod endpoints;
pub mod form;
pub mod page;
pub use endpoints::*;

pub const CREATE_PATH: &str = "/space/campaigns/create";

pub fn detail_path(campaign_id: CampaignId) -> String {
    format!("/space/campaigns/{}", campaign_id)
}

/// Where a freshly created campaign lands: its detail page, asking the user
/// to pick a template.
pub fn template_prompt_path(campaign_id: CampaignId) -> String {
    format!("{}?template=true", detail_path(campaign_id))
}

pub fn editor_path(popup_id: PopupId) -> String {
    format!("/editor/{}", popup_id)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A toast shown to the user after an action settles.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: &str) -> Notification {
        Notification {
            variant: NotificationVariant::Default,
            title: title.to_string(),
            description: None,
        }
    }

    pub fn failure(title: &str, error: &Error) -> Notification {
        Notification {
            variant: NotificationVariant::Destructive,
            title: title.to_string(),
            description: Some(error.to_string()),
        }
    }
}
