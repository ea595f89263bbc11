use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub mod style;
pub use endpoints::*;

use self::style::{convert_style_string, StructuredStyle};

pub type PopupId = TypedId<Popup>;

/// A popup template as the editor saves it. Every `*_style` field, and `bg`,
/// holds a raw css declaration list such as `"color: red; font-size: 12px"`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Popup {
    #[serde(rename = "_id")]
    pub id: PopupId,
    pub name: String,
    #[serde(default)]
    pub bg: String,
    #[serde(default)]
    pub title_value: String,
    #[serde(default)]
    pub title_style: String,
    #[serde(default)]
    pub subtitle_value: String,
    #[serde(default)]
    pub subtitle_style: String,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub image_style: String,
    #[serde(default)]
    pub button_value: String,
    #[serde(default)]
    pub button_style: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub modified_at: DateTime<Utc>,
}

impl TypedIdMarker for Popup {
    fn tag() -> &'static str {
        "PUP"
    }
}

/// A popup with its style strings converted into structured styles, ready to
/// be handed to a renderer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderedPopup {
    pub id: PopupId,
    pub name: String,
    pub bg: StructuredStyle,
    pub title_value: String,
    pub title_style: StructuredStyle,
    pub subtitle_value: String,
    pub subtitle_style: StructuredStyle,
    pub img_url: String,
    pub image_style: StructuredStyle,
    pub button_value: String,
    pub button_style: StructuredStyle,
}

impl RenderedPopup {
    pub fn render(popup: Popup) -> RenderedPopup {
        RenderedPopup {
            id: popup.id,
            bg: convert_style_string(&popup.bg),
            title_style: convert_style_string(&popup.title_style),
            subtitle_style: convert_style_string(&popup.subtitle_style),
            image_style: convert_style_string(&popup.image_style),
            button_style: convert_style_string(&popup.button_style),
            name: popup.name,
            title_value: popup.title_value,
            subtitle_value: popup.subtitle_value,
            img_url: popup.img_url,
            button_value: popup.button_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::sample_popup;

    #[test]
    fn render_converts_every_style_field() {
        let popup = sample_popup(PopupId::new());

        let rendered = RenderedPopup::render(popup.clone());

        assert_eq!(rendered.bg, convert_style_string(&popup.bg));
        assert_eq!(rendered.title_style, convert_style_string(&popup.title_style));
        assert_eq!(
            rendered.subtitle_style,
            convert_style_string(&popup.subtitle_style)
        );
        assert_eq!(rendered.image_style, convert_style_string(&popup.image_style));
        assert_eq!(
            rendered.button_style,
            convert_style_string(&popup.button_style)
        );
        assert_eq!(rendered.bg.get("backgroundColor"), Some("#fff8e7"));
    }

    #[test]
    fn render_leaves_values_untouched() {
        let popup = sample_popup(PopupId::new());

        let rendered = RenderedPopup::render(popup.clone());

        assert_eq!(rendered.id, popup.id);
        assert_eq!(rendered.name, popup.name);
        assert_eq!(rendered.title_value, popup.title_value);
        assert_eq!(rendered.subtitle_value, popup.subtitle_value);
        assert_eq!(rendered.img_url, popup.img_url);
        assert_eq!(rendered.button_value, popup.button_value);
    }
}
