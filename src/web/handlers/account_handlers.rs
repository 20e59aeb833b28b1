// src/web/handlers/account_handlers.rs

use rocket::serde::json::Json;
use rocket::State;

use crate::dashboard::DashboardSummary;
use crate::profile::{AccountProfile, PlanView, Subscription};
use crate::usage::UsageReport;
use crate::web::types::*;
use crate::workspace::Workspace;

pub async fn usage_handler(
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<UsageReport>>> {
    let report = workspace
        .usage_report()
        .await
        .map_err(|e| api_error(e, None))?;
    Ok(Json(DataResponse::success(
        format!("Usage for the {} plan", report.plan.name),
        report,
        None,
    )))
}

pub async fn get_profile_handler(
    workspace: &State<Workspace>,
) -> Json<DataResponse<AccountProfile>> {
    Json(DataResponse::success(
        "Account profile".to_string(),
        workspace.profile().await,
        None,
    ))
}

pub async fn save_profile_handler(
    request: Json<StandardRequest<AccountProfile>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<AccountProfile>>> {
    let conversation_id = request.conversation_id();
    let request = request.into_inner();
    let saved = workspace
        .save_profile(request.data)
        .await
        .map_err(|e| api_error(e, conversation_id.clone()))?;

    Ok(Json(
        ActionResponse::success(
            "Profile saved".to_string(),
            "profile_saved".to_string(),
            conversation_id,
        )
        .with_data(saved),
    ))
}

pub async fn plans_handler(workspace: &State<Workspace>) -> Json<DataResponse<Vec<PlanView>>> {
    Json(DataResponse::success(
        "Available plans".to_string(),
        workspace.plans().await,
        None,
    ))
}

pub async fn upgrade_plan_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<Subscription>>> {
    let subscription = workspace
        .upgrade_plan(id)
        .await
        .map_err(|e| api_error(e, None))?;

    Ok(Json(
        ActionResponse::success(
            format!("Subscription changed to {}", subscription.plan_id),
            "plan_changed".to_string(),
            None,
        )
        .with_data(subscription),
    ))
}

pub async fn dashboard_handler(
    workspace: &State<Workspace>,
) -> Json<DataResponse<DashboardSummary>> {
    Json(DataResponse::success(
        "Dashboard overview".to_string(),
        workspace.dashboard().await,
        None,
    ))
}
