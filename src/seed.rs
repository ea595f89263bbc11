use chrono::Utc;

use crate::database::Database;
use crate::error::Error;
use crate::popup::{Popup, PopupId};

/// Fills an empty template library with a few starter popups. A library
/// that already has templates is left alone.
#[tracing::instrument(skip(db))]
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    let existing = db.popups().fetch_popups().await?;
    if !existing.is_empty() {
        tracing::info!("template library has {} popups, skipping seed", existing.len());
        return Ok(());
    }

    for popup in starter_templates() {
        db.popups().insert_popup(&popup).await?;
    }

    Ok(())
}

fn starter_templates() -> Vec<Popup> {
    let now = Utc::now();
    let template = |name: &str, bg: &str, title: &str, subtitle: &str, button: &str| Popup {
        id: PopupId::new(),
        name: name.to_string(),
        bg: bg.to_string(),
        title_value: title.to_string(),
        title_style: "font-size: 28px; font-weight: 700; text-align: center".to_string(),
        subtitle_value: subtitle.to_string(),
        subtitle_style: "font-size: 16px; color: #4a4a4a; text-align: center".to_string(),
        img_url: String::new(),
        image_style: "width: 100%; border-radius: 12px".to_string(),
        button_value: button.to_string(),
        button_style: "padding: 12px 24px; border-radius: 8px; background-color: #111827"
            .to_string(),
        created_at: now,
        modified_at: now,
    };

    vec![
        template(
            "Newsletter",
            "background-color: #ffffff; padding: 32px; border-radius: 16px",
            "Stay in the loop",
            "Get the latest offers straight to your inbox",
            "Subscribe",
        ),
        template(
            "Flash Sale",
            "background-color: #fde68a; padding: 32px; border-radius: 16px",
            "24 hour flash sale",
            "Everything is 30% off until midnight",
            "Shop now",
        ),
        template(
            "Exit Intent",
            "background-color: #1f2937; color: #f9fafb; padding: 32px",
            "Wait, before you go",
            "Here is 10% off your first order",
            "Claim discount",
        ),
    ]
}
