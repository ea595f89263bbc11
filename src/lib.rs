use actix_web::web::{self, Data, FormConfig, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod popup;
pub mod seed;
pub mod space;
pub mod typedid;
pub mod user;

pub use crate::campaign::{CampaignBody, CreateCampaignBody};

use crate::config::Config;
use crate::database::{Database, MongoDatabase};
use crate::error::Error;

pub async fn run(config: Config) -> Result<(), Error> {
    info!("connecting to db: {}", config.mongodb_uri);
    let db = Client::with_uri_str(&config.mongodb_uri)
        .await?
        .database(&config.database_name);
    let db = MongoDatabase::initialize(db).await?;

    if config.seed_templates {
        seed::seed(&db).await?;
    }

    let db = Data::new(Box::new(db) as Box<dyn Database>);

    info!("listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(JsonConfig::default().error_handler(|err, _req| {
                // format json errors with custom format
                Error::InvalidJson(err).into()
            }))
            .app_data(PathConfig::default().error_handler(|err, _req| {
                // format path errors with custom format
                Error::InvalidPath(err).into()
            }))
            .app_data(FormConfig::default().error_handler(|err, _req| {
                // format form errors with custom format
                Error::InvalidForm(err).into()
            }))
            .app_data(QueryConfig::default().error_handler(|err, _req| {
                // format query errors with custom format
                Error::InvalidQuery(err).into()
            }))
            .app_data(db.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
            .default_service(web::to(|| async { Error::PathNotFound.error_response() }))
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(campaign::endpoints::create_campaign)
        .service(campaign::endpoints::get_campaigns)
        .service(campaign::endpoints::get_campaign_by_id)
        .service(campaign::endpoints::update_campaign)
        .service(campaign::endpoints::select_campaign_popup)
        .service(popup::endpoints::get_popups)
        .service(popup::endpoints::get_popup_by_id)
        .service(popup::endpoints::get_rendered_popup_by_id)
        // the create page must be registered before the `{campaign_id}` page
        .service(space::endpoints::get_create_campaign_page)
        .service(space::endpoints::get_campaign_page)
        .service(space::endpoints::submit_create_campaign_form)
        .service(space::endpoints::submit_edit_campaign_form)
        .service(space::endpoints::select_campaign_template);
}
