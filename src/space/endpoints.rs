use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::web::{Data, Form, Path};
use actix_web::{get, post, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::campaign::{manager as campaign_manager, CampaignId};
use crate::database::Database;
use crate::error::Error;
use crate::popup::PopupId;
use crate::user::Session;

use super::form::{CampaignForm, CampaignFormBody, FormView};
use super::page::{CampaignPage, DetailRoute};
use super::{detail_path, Notification};

#[derive(Clone, Debug, Serialize)]
pub struct FormResponse {
    pub form: FormView,
    pub notifications: Vec<Notification>,
    pub redirect: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SelectTemplateBody {
    pub popup_id: PopupId,
}

#[get("/space/campaigns/create")]
#[tracing::instrument(skip(db, req))]
pub async fn get_create_campaign_page(
    db: Data<Box<dyn Database>>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    render_page(&***db, &req).await
}

#[get("/space/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db, req))]
pub async fn get_campaign_page(
    db: Data<Box<dyn Database>>,
    req: HttpRequest,
) -> Result<HttpResponse, Error> {
    render_page(&***db, &req).await
}

async fn render_page(db: &dyn Database, req: &HttpRequest) -> Result<HttpResponse, Error> {
    let route = DetailRoute::parse(req.path(), req.query_string())?;

    let mut page = CampaignPage::new(route);
    page.load(db).await;

    let status = page.failure().unwrap_or(StatusCode::OK);

    Ok(HttpResponse::build(status).json(page.view()))
}

#[post("/space/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn submit_create_campaign_form(
    db: Data<Box<dyn Database>>,
    session: Session,
    body: Form<CampaignFormBody>,
) -> HttpResponse {
    let mut form = CampaignForm::create();
    form.apply(body.into_inner());

    let result = form.submit(&***db, &session).await;

    respond_to_submit(&form, result)
}

#[post("/space/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn submit_edit_campaign_form(
    db: Data<Box<dyn Database>>,
    session: Session,
    params: Path<CampaignId>,
    body: Form<CampaignFormBody>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();
    let campaign = campaign_manager::get_campaign_by_id(&***db, campaign_id).await?;

    let mut form = CampaignForm::edit(&campaign);
    form.apply(body.into_inner());

    let result = form.submit(&***db, &session).await;

    Ok(respond_to_submit(&form, result))
}

#[post("/space/campaigns/{campaign_id}/template")]
#[tracing::instrument(skip(db))]
pub async fn select_campaign_template(
    db: Data<Box<dyn Database>>,
    session: Session,
    params: Path<CampaignId>,
    body: Form<SelectTemplateBody>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    campaign_manager::select_template(&***db, campaign_id, session.user_id, body.popup_id)
        .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, detail_path(campaign_id)))
        .finish())
}

fn respond_to_submit(form: &CampaignForm, result: Result<CampaignId, Error>) -> HttpResponse {
    let body = FormResponse {
        form: form.view(),
        notifications: form.notifications().to_vec(),
        redirect: form.redirect().map(str::to_string),
    };

    match (result, form.redirect()) {
        (Ok(_), Some(location)) => HttpResponse::SeeOther()
            .insert_header((LOCATION, location))
            .json(body),
        (Ok(_), None) => HttpResponse::Ok().json(body),
        (Err(err), _) => HttpResponse::build(err.status_code()).json(body),
    }
}
