// src/web/handlers/screen_handlers.rs
//! List, panel and action handlers shared by the applications, candidates and jobs screens.

use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::lfd::export::to_csv_string;
use crate::lfd::{ActionOutcome, ListView, PanelView, Record, RecordId, RecordStatus};
use crate::web::types::*;
use crate::workspace::{Screened, Workspace};

pub async fn list_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
    query: Option<String>,
    status: Option<String>,
) -> ApiResult<Json<DataResponse<ListView<R>>>> {
    let view = workspace
        .list::<R>(scope, query.as_deref(), status.as_deref())
        .await
        .map_err(|e| api_error(e, None))?;

    let message = match view.empty_message {
        Some(empty) => empty.to_string(),
        None => format!("{} of {} {}", view.rows.len(), view.total, R::KIND.plural()),
    };
    Ok(Json(DataResponse::success(message, view, None)))
}

pub async fn export_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
) -> ApiResult<CsvResponse> {
    let records = workspace
        .visible::<R>(scope)
        .await
        .map_err(|e| api_error(e, None))?;
    let csv = to_csv_string(&records).map_err(internal_error)?;

    app_log!(info, "Exported {} {} as CSV", records.len(), R::KIND.plural());
    let filename = match scope {
        Some(job_id) => format!("{}-job-{}.csv", R::KIND.plural(), job_id),
        None => format!("{}.csv", R::KIND.plural()),
    };
    Ok(CsvResponse::with_filename(csv, filename))
}

pub async fn select_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
    id: &str,
) -> ApiResult<Json<DataResponse<PanelView<R>>>> {
    let id = RecordId::from(id);
    let panel = workspace
        .select::<R>(scope, &id)
        .await
        .map_err(|e| api_error(e, None))?;

    Ok(Json(DataResponse::success(
        format!("Viewing {} {}", R::KIND, id),
        panel,
        None,
    )))
}

pub async fn close_panel_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
) -> ApiResult<Json<TextResponse>> {
    workspace
        .close_panel::<R>(scope)
        .await
        .map_err(|e| api_error(e, None))?;
    Ok(Json(TextResponse::success(
        format!("{} panel closed", R::KIND),
        None,
    )))
}

pub async fn panel_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
) -> ApiResult<Json<DataResponse<Option<PanelView<R>>>>> {
    let panel = workspace
        .panel::<R>(scope)
        .await
        .map_err(|e| api_error(e, None))?;

    let message = match &panel {
        Some(view) => format!("Viewing {} {}", R::KIND, view.record.id()),
        None => format!("No {} selected", R::KIND),
    };
    Ok(Json(DataResponse::success(message, panel, None)))
}

/// Runs a detail panel button. The response carries the panel as it stands afterwards.
pub async fn action_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
    action: &str,
) -> ApiResult<Json<ActionResponse<PanelView<R>>>> {
    let action = action
        .parse::<R::Action>()
        .map_err(|e| api_error(e, None))?;
    let outcome = workspace
        .invoke::<R>(scope, action)
        .await
        .map_err(|e| api_error(e, None))?;

    let message = match &outcome {
        ActionOutcome::Transitioned { record, .. } => format!(
            "{} '{}' is now {}",
            R::KIND,
            record.display_name(),
            record.status().label()
        ),
        ActionOutcome::Dispatched { record, label } => {
            format!("{}: {}", label, record.display_name())
        }
    };

    let panel = workspace
        .panel::<R>(scope)
        .await
        .map_err(|e| api_error(e, None))?;
    let next_actions: Vec<String> = panel
        .as_ref()
        .map(|view| view.actions.iter().map(|a| a.action.clone()).collect())
        .unwrap_or_default();

    let mut response = ActionResponse::success(message, action.to_string(), None)
        .with_next_actions(next_actions);
    if let Some(panel) = panel {
        response = response.with_data(panel);
    }
    Ok(Json(response))
}

pub async fn refresh_handler<R: Screened>(
    workspace: &State<Workspace>,
    scope: Option<&RecordId>,
) -> ApiResult<Json<TextResponse>> {
    let count = workspace
        .refresh::<R>(scope)
        .await
        .map_err(|e| api_error(e, None))?;
    Ok(Json(TextResponse::success(
        format!("Reloaded {} {}", count, R::KIND.plural()),
        None,
    )))
}

