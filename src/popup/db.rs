use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson;

use crate::database::MongoPopupStore;
use crate::error::Error;

use super::{Popup, PopupId};

#[async_trait]
pub trait PopupStore: Send + Sync {
    async fn insert_popup(&self, popup: &Popup) -> Result<(), Error>;

    async fn fetch_popups(&self) -> Result<Vec<Popup>, Error>;

    async fn fetch_popup_by_id(&self, popup_id: PopupId) -> Result<Option<Popup>, Error>;
}

#[async_trait]
impl PopupStore for MongoPopupStore {
    #[tracing::instrument(skip(self))]
    async fn insert_popup(&self, popup: &Popup) -> Result<(), Error> {
        self.insert_one(popup, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_popups(&self) -> Result<Vec<Popup>, Error> {
        let popups: Vec<Popup> = self.find(bson::doc! {}, None).await?.try_collect().await?;

        Ok(popups)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_popup_by_id(&self, popup_id: PopupId) -> Result<Option<Popup>, Error> {
        let popup: Option<Popup> = self.find_one(bson::doc! { "_id": popup_id }, None).await?;

        Ok(popup)
    }
}
