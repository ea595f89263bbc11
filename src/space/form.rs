use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::campaign::{manager, Campaign, CampaignFields, CampaignId};
use crate::database::Database;
use crate::error::Error;
use crate::user::Session;

use super::{detail_path, template_prompt_path, Notification};

/// The yes/no select behind `is_recurring`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringChoice {
    Yes,
    No,
}

impl RecurringChoice {
    pub fn from_flag(is_recurring: bool) -> RecurringChoice {
        if is_recurring {
            RecurringChoice::Yes
        } else {
            RecurringChoice::No
        }
    }

    pub fn is_recurring(self) -> bool {
        self == RecurringChoice::Yes
    }
}

impl Default for RecurringChoice {
    fn default() -> RecurringChoice {
        RecurringChoice::No
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit { campaign_id: CampaignId },
}

/// The urlencoded body the campaign form posts.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CampaignFormBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: RecurringChoice,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// What the form renders: the current field values and the state of its
/// buttons.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    #[serde(flatten)]
    pub mode: FormMode,
    pub fields: CampaignFields,
    pub recurring: RecurringChoice,
    pub submit_label: &'static str,
    /// Only ever true for a view taken while a submit is in flight. A form
    /// is rendered before or after `submit`, so served views have it false.
    pub submit_disabled: bool,
}

/// Local state of the campaign form. Edits only touch this record; the store
/// is only called on `submit`.
#[derive(Clone, Debug)]
pub struct CampaignForm {
    mode: FormMode,
    fields: CampaignFields,
    // set for the duration of `submit`; it backs `FormView::submit_disabled`
    loading: bool,
    notifications: Vec<Notification>,
    redirect: Option<String>,
}

impl CampaignForm {
    pub fn create() -> CampaignForm {
        CampaignForm::with_fields(FormMode::Create, CampaignFields::default())
    }

    pub fn edit(campaign: &Campaign) -> CampaignForm {
        CampaignForm::with_fields(
            FormMode::Edit {
                campaign_id: campaign.id,
            },
            campaign.fields.clone(),
        )
    }

    pub fn with_fields(mode: FormMode, fields: CampaignFields) -> CampaignForm {
        CampaignForm {
            mode,
            fields,
            loading: false,
            notifications: vec![],
            redirect: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &CampaignFields {
        &self.fields
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The page to navigate to after a successful submit.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn recurring(&self) -> RecurringChoice {
        RecurringChoice::from_flag(self.fields.is_recurring)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.fields.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.fields.end_date = date;
    }

    pub fn set_recurring(&mut self, choice: RecurringChoice) {
        self.fields.is_recurring = choice.is_recurring();
    }

    pub fn apply(&mut self, body: CampaignFormBody) {
        self.set_name(body.name);
        self.set_description(body.description);
        self.set_start_date(body.start_date);
        self.set_end_date(body.end_date);
        self.set_recurring(body.is_recurring);
    }

    pub fn view(&self) -> FormView {
        FormView {
            mode: self.mode,
            fields: self.fields.clone(),
            recurring: self.recurring(),
            submit_label: match self.mode {
                FormMode::Create => "Create",
                FormMode::Edit { .. } => "Update",
            },
            submit_disabled: self.loading,
        }
    }

    /// Sends the form to the store. Success and failure are both reported
    /// through `notifications`; a successful submit also sets `redirect`.
    pub async fn submit(
        &mut self,
        db: &dyn Database,
        session: &Session,
    ) -> Result<CampaignId, Error> {
        match self.mode {
            FormMode::Create => self.submit_create(db, session).await,
            FormMode::Edit { campaign_id } => {
                self.submit_update(db, session, campaign_id).await
            }
        }
    }

    async fn submit_create(
        &mut self,
        db: &dyn Database,
        session: &Session,
    ) -> Result<CampaignId, Error> {
        if let Err(err) = self.fields.validate() {
            self.notifications
                .push(Notification::failure("Cannot create campaign", &err));
            return Err(err);
        }

        self.loading = true;
        let result = manager::create_campaign(db, self.fields.clone(), session.user_id).await;
        self.loading = false;

        match result {
            Ok(campaign) => {
                self.fields = CampaignFields::default();
                self.notifications
                    .push(Notification::success("Campaign Created"));
                self.redirect = Some(template_prompt_path(campaign.id));
                Ok(campaign.id)
            }
            Err(err) => {
                tracing::error!("failed to create campaign: {}", err);
                self.notifications
                    .push(Notification::failure("Cannot create campaign", &err));
                Err(err)
            }
        }
    }

    async fn submit_update(
        &mut self,
        db: &dyn Database,
        session: &Session,
        campaign_id: CampaignId,
    ) -> Result<CampaignId, Error> {
        if let Err(err) = self.fields.validate() {
            self.notifications
                .push(Notification::failure("Cannot update campaign", &err));
            return Err(err);
        }

        self.loading = true;
        let fields = self.fields.clone();
        let result = manager::update_campaign(db, campaign_id, session.user_id, fields).await;
        self.loading = false;

        match result {
            Ok(campaign) => {
                self.fields = campaign.fields;
                self.notifications
                    .push(Notification::success("Campaign Updated"));
                self.redirect = Some(detail_path(campaign.id));
                Ok(campaign.id)
            }
            Err(err) => {
                tracing::error!("failed to update campaign {}: {}", campaign_id, err);
                self.notifications
                    .push(Notification::failure("Cannot update campaign", &err));
                Err(err)
            }
        }
    }
}
