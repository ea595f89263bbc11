use crate::database::Database;
use crate::error::Error;

use super::{Popup, PopupId, RenderedPopup};

#[tracing::instrument(skip(db))]
pub async fn get_popups(db: &dyn Database) -> Result<Vec<Popup>, Error> {
    let popups = db.popups().fetch_popups().await?;

    Ok(popups)
}

#[tracing::instrument(skip(db))]
pub async fn get_popup_by_id(db: &dyn Database, popup_id: PopupId) -> Result<Popup, Error> {
    let popup = db
        .popups()
        .fetch_popup_by_id(popup_id)
        .await?
        .ok_or(Error::PopupNotFound { popup_id })?;

    Ok(popup)
}

#[tracing::instrument(skip(db))]
pub async fn render_popup(db: &dyn Database, popup_id: PopupId) -> Result<RenderedPopup, Error> {
    let popup = get_popup_by_id(db, popup_id).await?;

    Ok(RenderedPopup::render(popup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::{sample_popup, MockDatabase};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn get_popup_by_id_returns_error_if_doesnt_exist() {
        let mut db = MockDatabase::new();
        let popup_id = PopupId::new();
        db.popups.on_fetch_popup_by_id = Box::new(|_| Ok(None));

        let result = get_popup_by_id(&db, popup_id).await;

        assert_eq!(result.unwrap_err(), Error::PopupNotFound { popup_id });
    }

    #[tokio::test]
    async fn render_popup_fetches_once_and_converts_styles() {
        let mut db = MockDatabase::new();
        let test_popup_id = PopupId::new();
        let fetches = Arc::new(Mutex::new(vec![]));
        let fetches_clone = Arc::clone(&fetches);
        db.popups.on_fetch_popup_by_id = Box::new(move |popup_id| {
            fetches_clone.lock().unwrap().push(popup_id);
            Ok(Some(sample_popup(popup_id)))
        });

        let rendered = render_popup(&db, test_popup_id).await.unwrap();

        assert_eq!(*fetches.lock().unwrap(), vec![test_popup_id]);
        assert_eq!(rendered.id, test_popup_id);
        assert_eq!(rendered.button_style.get("borderRadius"), Some("8px"));
    }

    #[tokio::test]
    async fn get_popups_lists_the_library() {
        let mut db = MockDatabase::new();
        db.popups.on_fetch_popups =
            Box::new(|| Ok(vec![sample_popup(PopupId::new()), sample_popup(PopupId::new())]));

        let popups = get_popups(&db).await.unwrap();

        assert_eq!(popups.len(), 2);
    }
}
