use actix_web::get;
use actix_web::web::{Data, Json, Path};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, Popup, PopupId, RenderedPopup};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PopupBody {
    pub id: PopupId,
    pub name: String,
    pub bg: String,
    pub title_value: String,
    pub title_style: String,
    pub subtitle_value: String,
    pub subtitle_style: String,
    pub img_url: String,
    pub image_style: String,
    pub button_value: String,
    pub button_style: String,
}

impl PopupBody {
    pub fn render(popup: Popup) -> PopupBody {
        PopupBody {
            id: popup.id,
            name: popup.name,
            bg: popup.bg,
            title_value: popup.title_value,
            title_style: popup.title_style,
            subtitle_value: popup.subtitle_value,
            subtitle_style: popup.subtitle_style,
            img_url: popup.img_url,
            image_style: popup.image_style,
            button_value: popup.button_value,
            button_style: popup.button_style,
        }
    }
}

#[get("/popups")]
#[tracing::instrument(skip(db))]
pub async fn get_popups(db: Data<Box<dyn Database>>) -> Result<Json<Vec<PopupBody>>, Error> {
    let popups = manager::get_popups(&***db).await?;

    let body = popups.into_iter().map(PopupBody::render).collect();

    Ok(Json(body))
}

#[get("/popups/{popup_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_popup_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<PopupId>,
) -> Result<Json<PopupBody>, Error> {
    let popup_id = params.into_inner();
    let popup = manager::get_popup_by_id(&***db, popup_id).await?;

    Ok(Json(PopupBody::render(popup)))
}

#[get("/popups/{popup_id}/rendered")]
#[tracing::instrument(skip(db))]
pub async fn get_rendered_popup_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<PopupId>,
) -> Result<Json<RenderedPopup>, Error> {
    let popup_id = params.into_inner();
    let popup = manager::render_popup(&***db, popup_id).await?;

    Ok(Json(popup))
}
