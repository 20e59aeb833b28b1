// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::core::ConfigManager;
use crate::job_posting::{FormView, JobDraft, JobPreview, NewQuestion, PostingMode, PostingReceipt};
use crate::lfd::{ListView, PanelView, RecordId};
use crate::profile::{AccountProfile, PlanView, Subscription};
use crate::types::{Application, Candidate, Job};
use crate::workspace::Workspace;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{
    catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, State,
};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// Jobs

#[get("/jobs?<query>&<status>")]
pub async fn list_jobs(
    query: Option<String>,
    status: Option<String>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<ListView<Job>>>> {
    handlers::list_handler::<Job>(workspace, None, query, status).await
}

#[get("/jobs/closed")]
pub async fn closed_jobs(workspace: &State<Workspace>) -> Json<DataResponse<Vec<Job>>> {
    handlers::closed_jobs_handler(workspace).await
}

#[get("/jobs/stats")]
pub async fn job_stats(
    workspace: &State<Workspace>,
) -> Json<DataResponse<crate::dashboard::JobStats>> {
    handlers::job_stats_handler(workspace).await
}

#[get("/jobs/export.csv")]
pub async fn export_jobs(workspace: &State<Workspace>) -> ApiResult<CsvResponse> {
    handlers::export_handler::<Job>(workspace, None).await
}

#[post("/jobs", data = "<request>")]
pub async fn create_job(
    request: Json<StandardRequest<JobDraft>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<PostingReceipt>>> {
    handlers::submit_job_handler(request, PostingMode::Create, workspace).await
}

#[post("/jobs/preview", data = "<request>")]
pub async fn preview_job(
    request: Json<StandardRequest<JobDraft>>,
    workspace: &State<Workspace>,
) -> Json<DataResponse<JobPreview>> {
    handlers::preview_job_handler(request, workspace).await
}

#[put("/jobs/<id>", data = "<request>")]
pub async fn update_job(
    id: &str,
    request: Json<StandardRequest<JobDraft>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<PostingReceipt>>> {
    handlers::submit_job_handler(request, PostingMode::Edit(RecordId::from(id)), workspace).await
}

#[get("/jobs/<id>/draft")]
pub async fn job_draft(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<JobDraft>>> {
    handlers::job_draft_handler(id, workspace).await
}

#[post("/jobs/<id>/close")]
pub async fn close_job(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<Job>>> {
    handlers::close_job_handler(id, workspace).await
}

#[get("/jobs/<id>/link")]
pub async fn job_link(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<LinkData>>> {
    handlers::job_link_handler(id, workspace).await
}

#[post("/jobs/<id>/link/copy")]
pub async fn copy_job_link(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<CopyData>>> {
    handlers::copy_link_handler(id, workspace).await
}

#[get("/jobs/<id>/form")]
pub async fn application_form(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<FormView>>> {
    handlers::application_form_handler(id, workspace).await
}

#[post("/jobs/<id>/form/questions", data = "<request>")]
pub async fn add_form_question(
    id: &str,
    request: Json<StandardRequest<NewQuestion>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    handlers::add_question_handler(id, request, workspace).await
}

#[delete("/jobs/<id>/form/questions/<question_id>")]
pub async fn remove_form_question(
    id: &str,
    question_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    handlers::remove_question_handler(id, question_id, workspace).await
}

#[post("/jobs/<id>/form/publish")]
pub async fn publish_form(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    handlers::publish_form_handler(id, workspace).await
}

#[post("/jobs/panel/select/<id>")]
pub async fn select_job(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<PanelView<Job>>>> {
    handlers::select_handler::<Job>(workspace, None, id).await
}

#[get("/jobs/panel")]
pub async fn job_panel(
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<Option<PanelView<Job>>>>> {
    handlers::panel_handler::<Job>(workspace, None).await
}

#[delete("/jobs/panel")]
pub async fn close_job_panel(workspace: &State<Workspace>) -> ApiResult<Json<TextResponse>> {
    handlers::close_panel_handler::<Job>(workspace, None).await
}

#[post("/jobs/panel/actions/<action>")]
pub async fn job_action(
    action: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<PanelView<Job>>>> {
    handlers::action_handler::<Job>(workspace, None, action).await
}

// Applications, scoped to one job

#[get("/applications/<job_id>?<query>&<status>")]
pub async fn list_applications(
    job_id: &str,
    query: Option<String>,
    status: Option<String>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<ListView<Application>>>> {
    let scope = RecordId::from(job_id);
    handlers::list_handler::<Application>(workspace, Some(&scope), query, status).await
}

#[get("/applications/<job_id>/export.csv")]
pub async fn export_applications(
    job_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<CsvResponse> {
    let scope = RecordId::from(job_id);
    handlers::export_handler::<Application>(workspace, Some(&scope)).await
}

#[post("/applications/<job_id>/refresh")]
pub async fn refresh_applications(
    job_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<TextResponse>> {
    let scope = RecordId::from(job_id);
    handlers::refresh_handler::<Application>(workspace, Some(&scope)).await
}

#[post("/applications/<job_id>/panel/select/<id>")]
pub async fn select_application(
    job_id: &str,
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<PanelView<Application>>>> {
    let scope = RecordId::from(job_id);
    handlers::select_handler::<Application>(workspace, Some(&scope), id).await
}

#[get("/applications/<job_id>/panel")]
pub async fn application_panel(
    job_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<Option<PanelView<Application>>>>> {
    let scope = RecordId::from(job_id);
    handlers::panel_handler::<Application>(workspace, Some(&scope)).await
}

#[delete("/applications/<job_id>/panel")]
pub async fn close_application_panel(
    job_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<TextResponse>> {
    let scope = RecordId::from(job_id);
    handlers::close_panel_handler::<Application>(workspace, Some(&scope)).await
}

#[post("/applications/<job_id>/panel/actions/<action>")]
pub async fn application_action(
    job_id: &str,
    action: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<PanelView<Application>>>> {
    let scope = RecordId::from(job_id);
    handlers::action_handler::<Application>(workspace, Some(&scope), action).await
}

// Candidates

#[get("/candidates?<query>")]
pub async fn list_candidates(
    query: Option<String>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<ListView<Candidate>>>> {
    handlers::list_handler::<Candidate>(workspace, None, query, None).await
}

#[get("/candidates/export.csv")]
pub async fn export_candidates(workspace: &State<Workspace>) -> ApiResult<CsvResponse> {
    handlers::export_handler::<Candidate>(workspace, None).await
}

#[post("/candidates/panel/select/<id>")]
pub async fn select_candidate(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<PanelView<Candidate>>>> {
    handlers::select_handler::<Candidate>(workspace, None, id).await
}

#[get("/candidates/panel")]
pub async fn candidate_panel(
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<Option<PanelView<Candidate>>>>> {
    handlers::panel_handler::<Candidate>(workspace, None).await
}

#[delete("/candidates/panel")]
pub async fn close_candidate_panel(workspace: &State<Workspace>) -> ApiResult<Json<TextResponse>> {
    handlers::close_panel_handler::<Candidate>(workspace, None).await
}

// Account

#[get("/usage")]
pub async fn usage(
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<crate::usage::UsageReport>>> {
    handlers::usage_handler(workspace).await
}

#[get("/profile")]
pub async fn get_profile(workspace: &State<Workspace>) -> Json<DataResponse<AccountProfile>> {
    handlers::get_profile_handler(workspace).await
}

#[put("/profile", data = "<request>")]
pub async fn save_profile(
    request: Json<StandardRequest<AccountProfile>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<AccountProfile>>> {
    handlers::save_profile_handler(request, workspace).await
}

#[get("/plans")]
pub async fn plans(workspace: &State<Workspace>) -> Json<DataResponse<Vec<PlanView>>> {
    handlers::plans_handler(workspace).await
}

#[post("/plans/<id>/upgrade")]
pub async fn upgrade_plan(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<Subscription>>> {
    handlers::upgrade_plan_handler(id, workspace).await
}

#[get("/dashboard")]
pub async fn dashboard(
    workspace: &State<Workspace>,
) -> Json<DataResponse<crate::dashboard::DashboardSummary>> {
    handlers::dashboard_handler(workspace).await
}

#[get("/health")]
pub async fn health(workspace: &State<Workspace>) -> Json<TextResponse> {
    handlers::health_handler(workspace).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {}", request.uri().path()),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

pub fn build_rocket(workspace: Workspace) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(workspace)
        .register("/api", catchers![bad_request, not_found, internal_error])
        .mount(
            "/api",
            routes![
                list_jobs,
                closed_jobs,
                job_stats,
                export_jobs,
                create_job,
                preview_job,
                update_job,
                job_draft,
                close_job,
                job_link,
                copy_job_link,
                application_form,
                add_form_question,
                remove_form_question,
                publish_form,
                select_job,
                job_panel,
                close_job_panel,
                job_action,
                list_applications,
                export_applications,
                refresh_applications,
                select_application,
                application_panel,
                close_application_panel,
                application_action,
                list_candidates,
                export_candidates,
                select_candidate,
                candidate_panel,
                close_candidate_panel,
                usage,
                get_profile,
                save_profile,
                plans,
                upgrade_plan,
                dashboard,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let api = config.build_api()?;
    let links = config.build_link_sharer();

    let workspace = match Workspace::load(api, links).await {
        Ok(workspace) => workspace,
        Err(e) => {
            error!("Failed to load records: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting RecruitAI dashboard API ({} environment) on port {}",
        config.environment_name, config.environment.port
    );

    let figment = rocket::Config::figment().merge(("port", config.environment.port));
    let _rocket = build_rocket(workspace)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
