use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, put};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::popup::PopupId;
use crate::user::{Session, UserId};

use super::{manager, Campaign, CampaignFields, CampaignId};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateCampaignBody {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_recurring: bool,
    pub popup_id: Option<PopupId>,
}

impl From<CreateCampaignBody> for CampaignFields {
    fn from(body: CreateCampaignBody) -> CampaignFields {
        CampaignFields {
            name: body.name,
            description: body.description,
            start_date: body.start_date,
            end_date: body.end_date,
            is_recurring: body.is_recurring,
            popup_id: body.popup_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SelectPopupBody {
    pub popup_id: PopupId,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignBody {
    pub id: CampaignId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_recurring: bool,
    pub popup_id: Option<PopupId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            user_id: campaign.user_id,
            name: campaign.fields.name,
            description: campaign.fields.description,
            start_date: campaign.fields.start_date,
            end_date: campaign.fields.end_date,
            is_recurring: campaign.fields.is_recurring,
            popup_id: campaign.fields.popup_id,
            is_active: campaign.is_active,
            created_at: campaign.created_at,
            modified_at: campaign.modified_at,
        }
    }
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    session: Session,
    body: Json<CreateCampaignBody>,
) -> Result<Json<CampaignBody>, Error> {
    let body = body.into_inner();
    let campaign = manager::create_campaign(&***db, body.into(), session.user_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
    session: Session,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns_for_user(&***db, session.user_id).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[put("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<Box<dyn Database>>,
    session: Session,
    params: Path<CampaignId>,
    body: Json<CreateCampaignBody>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();
    let campaign =
        manager::update_campaign(&***db, campaign_id, session.user_id, body.into()).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[put("/campaigns/{campaign_id}/popup")]
#[tracing::instrument(skip(db))]
pub async fn select_campaign_popup(
    db: Data<Box<dyn Database>>,
    session: Session,
    params: Path<CampaignId>,
    body: Json<SelectPopupBody>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();
    let campaign =
        manager::select_template(&***db, campaign_id, session.user_id, body.popup_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}
