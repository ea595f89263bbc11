use mongodb::{bson, Collection, IndexModel};

use crate::campaign::db::CampaignStore;
use crate::campaign::Campaign;
use crate::error::Error;
use crate::popup::db::PopupStore;
use crate::popup::Popup;

pub type MongoCampaignStore = Collection<Campaign>;
pub type MongoPopupStore = Collection<Popup>;

/// The document store backing the service, one store per collection.
pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;

    fn popups(&self) -> &dyn PopupStore;
}

#[derive(Debug, Clone)]
pub struct MongoDatabase {
    campaigns: Collection<Campaign>,
    popups: Collection<Popup>,
}

impl MongoDatabase {
    pub fn new(db: mongodb::Database) -> MongoDatabase {
        MongoDatabase {
            campaigns: db.collection("campaigns"),
            popups: db.collection("popups"),
        }
    }

    #[tracing::instrument(skip(db))]
    pub async fn initialize(db: mongodb::Database) -> Result<MongoDatabase, Error> {
        // ping the database to ensure connection is established
        db.run_command(bson::doc! { "ping": 1 }, None).await?;

        let db = MongoDatabase::new(db);

        let by_user = IndexModel::builder()
            .keys(bson::doc! { "user_id": 1 })
            .build();
        db.campaigns.create_index(by_user, None).await?;

        Ok(db)
    }
}

impl Database for MongoDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }

    fn popups(&self) -> &dyn PopupStore {
        &self.popups
    }
}

#[cfg(test)]
pub mod test {
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    use crate::campaign::db::CampaignStore;
    use crate::campaign::{Campaign, CampaignFields, CampaignId};
    use crate::error::Error;
    use crate::popup::db::PopupStore;
    use crate::popup::{Popup, PopupId};
    use crate::user::UserId;

    use super::Database;

    type Hook<A, R> = Box<dyn Fn(A) -> Result<R, Error> + Send + Sync>;

    pub struct MockCampaignStore {
        pub on_insert_campaign: Box<dyn Fn(&Campaign) -> Result<(), Error> + Send + Sync>,
        pub on_fetch_campaigns_by_user: Hook<UserId, Vec<Campaign>>,
        pub on_fetch_campaign_by_id: Hook<CampaignId, Option<Campaign>>,
        pub on_update_campaign:
            Box<dyn Fn(Campaign, CampaignFields) -> Result<Campaign, Error> + Send + Sync>,
        pub on_update_campaign_popup:
            Box<dyn Fn(Campaign, PopupId) -> Result<Campaign, Error> + Send + Sync>,
    }

    impl MockCampaignStore {
        pub fn new() -> MockCampaignStore {
            MockCampaignStore {
                on_insert_campaign: Box::new(|_| panic!("unexpected call to insert_campaign")),
                on_fetch_campaigns_by_user: Box::new(|_| {
                    panic!("unexpected call to fetch_campaigns_by_user")
                }),
                on_fetch_campaign_by_id: Box::new(|_| {
                    panic!("unexpected call to fetch_campaign_by_id")
                }),
                on_update_campaign: Box::new(|_, _| panic!("unexpected call to update_campaign")),
                on_update_campaign_popup: Box::new(|_, _| {
                    panic!("unexpected call to update_campaign_popup")
                }),
            }
        }
    }

    #[async_trait]
    impl CampaignStore for MockCampaignStore {
        async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
            (self.on_insert_campaign)(campaign)
        }

        async fn fetch_campaigns_by_user(&self, user_id: UserId) -> Result<Vec<Campaign>, Error> {
            (self.on_fetch_campaigns_by_user)(user_id)
        }

        async fn fetch_campaign_by_id(
            &self,
            campaign_id: CampaignId,
        ) -> Result<Option<Campaign>, Error> {
            (self.on_fetch_campaign_by_id)(campaign_id)
        }

        async fn update_campaign(
            &self,
            campaign: Campaign,
            fields: CampaignFields,
        ) -> Result<Campaign, Error> {
            (self.on_update_campaign)(campaign, fields)
        }

        async fn update_campaign_popup(
            &self,
            campaign: Campaign,
            popup_id: PopupId,
        ) -> Result<Campaign, Error> {
            (self.on_update_campaign_popup)(campaign, popup_id)
        }
    }

    pub struct MockPopupStore {
        pub on_insert_popup: Box<dyn Fn(&Popup) -> Result<(), Error> + Send + Sync>,
        pub on_fetch_popups: Box<dyn Fn() -> Result<Vec<Popup>, Error> + Send + Sync>,
        pub on_fetch_popup_by_id: Hook<PopupId, Option<Popup>>,
    }

    impl MockPopupStore {
        pub fn new() -> MockPopupStore {
            MockPopupStore {
                on_insert_popup: Box::new(|_| panic!("unexpected call to insert_popup")),
                on_fetch_popups: Box::new(|| panic!("unexpected call to fetch_popups")),
                on_fetch_popup_by_id: Box::new(|_| panic!("unexpected call to fetch_popup_by_id")),
            }
        }
    }

    #[async_trait]
    impl PopupStore for MockPopupStore {
        async fn insert_popup(&self, popup: &Popup) -> Result<(), Error> {
            (self.on_insert_popup)(popup)
        }

        async fn fetch_popups(&self) -> Result<Vec<Popup>, Error> {
            (self.on_fetch_popups)()
        }

        async fn fetch_popup_by_id(&self, popup_id: PopupId) -> Result<Option<Popup>, Error> {
            (self.on_fetch_popup_by_id)(popup_id)
        }
    }

    pub struct MockDatabase {
        pub campaigns: MockCampaignStore,
        pub popups: MockPopupStore,
    }

    impl MockDatabase {
        pub fn new() -> MockDatabase {
            MockDatabase {
                campaigns: MockCampaignStore::new(),
                popups: MockPopupStore::new(),
            }
        }
    }

    impl Database for MockDatabase {
        fn campaigns(&self) -> &dyn CampaignStore {
            &self.campaigns
        }

        fn popups(&self) -> &dyn PopupStore {
            &self.popups
        }
    }

    pub fn sample_fields() -> CampaignFields {
        CampaignFields {
            name: "Sale".to_string(),
            description: "Summer sale".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
            is_recurring: false,
            popup_id: None,
        }
    }

    pub fn sample_campaign(campaign_id: CampaignId) -> Campaign {
        let now = Utc::now();
        Campaign {
            id: campaign_id,
            user_id: UserId::new(),
            fields: sample_fields(),
            is_active: false,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn sample_popup(popup_id: PopupId) -> Popup {
        let now = Utc::now();
        Popup {
            id: popup_id,
            name: "Sunrise".to_string(),
            bg: "background-color: #fff8e7; padding: 24px".to_string(),
            title_value: "Summer is here".to_string(),
            title_style: "font-size: 24px; font-weight: 700".to_string(),
            subtitle_value: "Take 20% off everything".to_string(),
            subtitle_style: "color: #555".to_string(),
            img_url: "https://cdn.example.com/sunrise.png".to_string(),
            image_style: "width: 100%; object-fit: cover".to_string(),
            button_value: "Shop now".to_string(),
            button_style: "background: #ff7a00; border-radius: 8px".to_string(),
            created_at: now,
            modified_at: now,
        }
    }
}
