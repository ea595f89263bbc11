use actix_web::http::StatusCode;
use actix_web::web::Query;
use actix_web::ResponseError;
use serde::{Deserialize, Serialize};

use crate::campaign::{manager as campaign_manager, Campaign, CampaignFields, CampaignId};
use crate::database::Database;
use crate::error::Error;
use crate::popup::{manager as popup_manager, PopupId, RenderedPopup};

use super::form::{CampaignForm, FormMode, FormView};
use super::{editor_path, Notification, CREATE_PATH};

/// Which campaign page was requested.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DetailRoute {
    Create,
    View {
        campaign_id: CampaignId,
        prompt_template: bool,
    },
}

#[derive(Debug, Default, Deserialize)]
struct DetailQuery {
    template: Option<String>,
}

impl DetailRoute {
    pub fn parse(path: &str, query: &str) -> Result<DetailRoute, Error> {
        let path = path.trim_end_matches('/');
        if path == CREATE_PATH {
            return Ok(DetailRoute::Create);
        }

        let not_recognized = || Error::RouteNotRecognized {
            path: path.to_string(),
        };

        let campaign_id: CampaignId = path
            .strip_prefix("/space/campaigns/")
            .filter(|segment| !segment.is_empty() && !segment.contains('/'))
            .ok_or_else(not_recognized)?
            .parse()
            .map_err(|_| not_recognized())?;

        let query = Query::<DetailQuery>::from_query(query).map_err(Error::InvalidQuery)?;

        Ok(DetailRoute::View {
            campaign_id,
            prompt_template: query.template.as_deref() == Some("true"),
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Pending,
    Ready,
    Failed,
}

/// The entry point into the template library, and whether it is open.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateLibrary {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub open: bool,
    pub should_update_popup: bool,
    pub popup_id: Option<PopupId>,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PreviewPanel {
    CreateFirst {
        message: &'static str,
    },
    SelectTemplate {
        message: &'static str,
        library: TemplateLibrary,
    },
    Linked {
        title: String,
        popup: RenderedPopup,
        editor_link: String,
        library: TemplateLibrary,
    },
    /// The campaign links a popup that could not be loaded.
    Unresolved {
        message: &'static str,
        popup_id: PopupId,
        editor_link: String,
        library: TemplateLibrary,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum PageView {
    Skeleton,
    Ready {
        heading: &'static str,
        load_state: LoadState,
        form: FormView,
        preview: PreviewPanel,
        notifications: Vec<Notification>,
    },
}

/// State of the campaign detail page for a single visit.
#[derive(Clone, Debug)]
pub struct CampaignPage {
    route: DetailRoute,
    load_state: LoadState,
    failure: Option<StatusCode>,
    campaign: Option<Campaign>,
    popup: Option<RenderedPopup>,
    modal_open: bool,
    notifications: Vec<Notification>,
}

impl CampaignPage {
    pub fn new(route: DetailRoute) -> CampaignPage {
        let load_state = match route {
            DetailRoute::Create => LoadState::Ready,
            DetailRoute::View { .. } => LoadState::Pending,
        };

        CampaignPage {
            route,
            load_state,
            failure: None,
            campaign: None,
            popup: None,
            modal_open: false,
            notifications: vec![],
        }
    }

    pub fn route(&self) -> DetailRoute {
        self.route
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// The status of the fetch that failed the page, if any.
    pub fn failure(&self) -> Option<StatusCode> {
        self.failure
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    pub fn popup(&self) -> Option<&RenderedPopup> {
        self.popup.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub async fn load(&mut self, db: &dyn Database) {
        if let DetailRoute::View { .. } = self.route {
            self.fetch_campaign(db).await;
        }
    }

    pub async fn fetch_campaign(&mut self, db: &dyn Database) {
        let (campaign_id, prompt_template) = match self.route {
            DetailRoute::View {
                campaign_id,
                prompt_template,
            } => (campaign_id, prompt_template),
            DetailRoute::Create => return,
        };

        let campaign = match campaign_manager::get_campaign_by_id(db, campaign_id).await {
            Ok(campaign) => campaign,
            Err(err) => {
                self.fail("Cannot fetch campaign", err);
                return;
            }
        };

        let popup_id = campaign.fields.popup_id;
        self.campaign = Some(campaign);

        match popup_id {
            Some(popup_id) => self.fetch_popup(db, popup_id).await,
            None if prompt_template => self.modal_open = true,
            None => {}
        }

        if self.load_state == LoadState::Pending {
            self.load_state = LoadState::Ready;
        }
    }

    /// A popup that fails to load leaves the page failed, but the campaign
    /// itself was found, so the page status is not affected.
    pub async fn fetch_popup(&mut self, db: &dyn Database, popup_id: PopupId) {
        match popup_manager::render_popup(db, popup_id).await {
            Ok(popup) => self.popup = Some(popup),
            Err(err) => self.notify_failure("Cannot fetch popup", &err),
        }
    }

    fn fail(&mut self, title: &str, err: Error) {
        self.notify_failure(title, &err);
        self.failure = Some(err.status_code());
    }

    fn notify_failure(&mut self, title: &str, err: &Error) {
        tracing::error!("{}: {}", title, err);
        self.notifications.push(Notification::failure(title, err));
        self.load_state = LoadState::Failed;
    }

    pub fn view(&self) -> PageView {
        if self.load_state == LoadState::Pending {
            return PageView::Skeleton;
        }

        let (heading, form) = match self.route {
            DetailRoute::Create => ("Create Campaign", CampaignForm::create()),
            DetailRoute::View { campaign_id, .. } => {
                let form = match &self.campaign {
                    Some(campaign) => CampaignForm::edit(campaign),
                    None => CampaignForm::with_fields(
                        FormMode::Edit { campaign_id },
                        CampaignFields::default(),
                    ),
                };
                ("Campaign Details", form)
            }
        };

        PageView::Ready {
            heading,
            load_state: self.load_state,
            form: form.view(),
            preview: self.preview(),
            notifications: self.notifications.clone(),
        }
    }

    fn preview(&self) -> PreviewPanel {
        let campaign_id = match self.route {
            DetailRoute::Create => {
                return PreviewPanel::CreateFirst {
                    message: "Create campaign first to get started",
                }
            }
            DetailRoute::View { campaign_id, .. } => campaign_id,
        };

        let linked_popup_id = self
            .campaign
            .as_ref()
            .and_then(|campaign| campaign.fields.popup_id);

        let library = TemplateLibrary {
            campaign_id,
            campaign_name: self
                .campaign
                .as_ref()
                .map(|campaign| campaign.fields.name.clone())
                .unwrap_or_default(),
            open: self.modal_open,
            should_update_popup: linked_popup_id.is_some(),
            popup_id: linked_popup_id,
            label: "Select a template",
        };

        match (&self.popup, linked_popup_id) {
            (Some(popup), _) => PreviewPanel::Linked {
                title: format!("{} Popup", popup.name),
                editor_link: editor_path(popup.id),
                popup: popup.clone(),
                library,
            },
            (None, Some(popup_id)) => PreviewPanel::Unresolved {
                message: "The linked template could not be loaded",
                popup_id,
                editor_link: editor_path(popup_id),
                library,
            },
            (None, None) => PreviewPanel::SelectTemplate {
                message: "You haven't selected any template yet",
                library,
            },
        }
    }
}
