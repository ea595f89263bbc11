use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::popup::PopupId;
use crate::user::UserId;

use super::{Campaign, CampaignFields, CampaignId};

#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: &dyn Database,
    fields: CampaignFields,
    user_id: UserId,
) -> Result<Campaign, Error> {
    fields.validate()?;

    if let Some(popup_id) = fields.popup_id {
        assert_popup_exists(db, popup_id).await?;
    }

    let now = Utc::now();
    let campaign = Campaign {
        id: CampaignId::new(),
        user_id,
        fields,
        is_active: false,
        created_at: now,
        modified_at: now,
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns_for_user(
    db: &dyn Database,
    user_id: UserId,
) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns_by_user(user_id).await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    user_id: UserId,
    fields: CampaignFields,
) -> Result<Campaign, Error> {
    fields.validate()?;

    let campaign = get_owned_campaign(db, campaign_id, user_id).await?;

    if let Some(popup_id) = fields.popup_id {
        if campaign.fields.popup_id != Some(popup_id) {
            assert_popup_exists(db, popup_id).await?;
        }
    }

    let campaign = db.campaigns().update_campaign(campaign, fields).await?;

    Ok(campaign)
}

/// Links a template from the library to the campaign, replacing any popup
/// it was already linked to.
#[tracing::instrument(skip(db))]
pub async fn select_template(
    db: &dyn Database,
    campaign_id: CampaignId,
    user_id: UserId,
    popup_id: PopupId,
) -> Result<Campaign, Error> {
    let campaign = get_owned_campaign(db, campaign_id, user_id).await?;
    assert_popup_exists(db, popup_id).await?;

    let campaign = db
        .campaigns()
        .update_campaign_popup(campaign, popup_id)
        .await?;

    Ok(campaign)
}

async fn get_owned_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    user_id: UserId,
) -> Result<Campaign, Error> {
    let campaign = get_campaign_by_id(db, campaign_id).await?;

    if campaign.user_id != user_id {
        return Err(Error::CampaignAccessDenied { campaign_id });
    }

    Ok(campaign)
}

async fn assert_popup_exists(db: &dyn Database, popup_id: PopupId) -> Result<(), Error> {
    db.popups()
        .fetch_popup_by_id(popup_id)
        .await?
        .ok_or(Error::PopupNotFound { popup_id })?;

    Ok(())
}
