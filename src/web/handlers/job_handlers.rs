// src/web/handlers/job_handlers.rs

use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::State;

use crate::core::CopyResult;
use crate::dashboard::JobStats;
use crate::job_posting::{FormView, JobDraft, JobPreview, NewQuestion, PostingMode, PostingReceipt};
use crate::lfd::RecordId;
use crate::types::Job;
use crate::web::types::*;
use crate::workspace::Workspace;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LinkData {
    pub job_id: RecordId,
    pub link: String,
    pub button_label: &'static str,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CopyData {
    #[serde(flatten)]
    pub result: CopyResult,
    pub button_label: &'static str,
}

pub async fn submit_job_handler(
    request: Json<StandardRequest<JobDraft>>,
    mode: PostingMode,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<PostingReceipt>>> {
    let conversation_id = request.conversation_id();
    let receipt = workspace
        .submit_job(mode, &request.data)
        .await
        .map_err(|e| api_error(e, conversation_id.clone()))?;

    let (action, message) = if receipt.updated {
        ("job_updated", format!("Job '{}' updated", receipt.job.title))
    } else {
        ("job_posted", format!("Job '{}' posted", receipt.job.title))
    };

    let next_actions = vec![
        format!("Share the application link: {}", receipt.link),
        format!("Review applications at /api/applications/{}", receipt.job.id),
    ];

    Ok(Json(
        ActionResponse::success(message, action.to_string(), conversation_id)
            .with_next_actions(next_actions)
            .with_data(receipt),
    ))
}

pub async fn preview_job_handler(
    request: Json<StandardRequest<JobDraft>>,
    workspace: &State<Workspace>,
) -> Json<DataResponse<JobPreview>> {
    let preview = workspace.preview(&request.data).await;
    Json(DataResponse::success(
        "Preview of the public posting".to_string(),
        preview,
        request.conversation_id(),
    ))
}

pub async fn job_draft_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<JobDraft>>> {
    let draft = workspace
        .job_draft(&RecordId::from(id))
        .await
        .map_err(|e| api_error(e, None))?;
    Ok(Json(DataResponse::success(
        format!("Editing job {}", id),
        draft,
        None,
    )))
}

pub async fn close_job_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<Job>>> {
    let job = workspace
        .close_job(&RecordId::from(id))
        .await
        .map_err(|e| api_error(e, None))?;

    Ok(Json(
        ActionResponse::success(
            format!("Job '{}' closed", job.title),
            "job_closed".to_string(),
            None,
        )
        .with_data(Job::clone(&job)),
    ))
}

pub async fn closed_jobs_handler(workspace: &State<Workspace>) -> Json<DataResponse<Vec<Job>>> {
    let jobs: Vec<Job> = workspace
        .closed_jobs()
        .await
        .iter()
        .map(|job| Job::clone(job))
        .collect();
    Json(DataResponse::success(
        format!("{} closed jobs", jobs.len()),
        jobs,
        None,
    ))
}

pub async fn job_stats_handler(workspace: &State<Workspace>) -> Json<DataResponse<JobStats>> {
    Json(DataResponse::success(
        "Job posting statistics".to_string(),
        workspace.job_stats().await,
        None,
    ))
}

pub async fn job_link_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<LinkData>>> {
    let job_id = RecordId::from(id);
    let link = workspace
        .job_link(&job_id)
        .await
        .map_err(|e| api_error(e, None))?;

    Ok(Json(DataResponse::success(
        "Application link".to_string(),
        LinkData {
            button_label: workspace.copy_label(&job_id).await,
            job_id,
            link,
        },
        None,
    )))
}

pub async fn copy_link_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<CopyData>>> {
    let (result, button_label) = workspace
        .copy_job_link(&RecordId::from(id))
        .await
        .map_err(|e| api_error(e, None))?;

    let message = if result.copied {
        "Application link copied".to_string()
    } else {
        format!("Copy the link manually: {}", result.link)
    };

    Ok(Json(
        ActionResponse::success(message, "link_copied".to_string(), None).with_data(CopyData {
            result,
            button_label,
        }),
    ))
}

pub async fn application_form_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<DataResponse<FormView>>> {
    let form = workspace
        .application_form(&RecordId::from(id))
        .await
        .map_err(|e| api_error(e, None))?;
    Ok(Json(DataResponse::success(
        format!("Application form for '{}'", form.job_title),
        form,
        None,
    )))
}

pub async fn add_question_handler(
    id: &str,
    request: Json<StandardRequest<NewQuestion>>,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    let conversation_id = request.conversation_id();
    let form = workspace
        .add_form_question(&RecordId::from(id), &request.data)
        .await
        .map_err(|e| api_error(e, conversation_id.clone()))?;

    Ok(Json(
        ActionResponse::success(
            format!("Question '{}' added", request.data.label.trim()),
            "question_added".to_string(),
            conversation_id,
        )
        .with_data(form),
    ))
}

pub async fn remove_question_handler(
    id: &str,
    question_id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    let form = workspace
        .remove_form_question(&RecordId::from(id), question_id)
        .await
        .map_err(|e| api_error(e, None))?;

    Ok(Json(
        ActionResponse::success(
            format!("Question {} removed", question_id),
            "question_removed".to_string(),
            None,
        )
        .with_data(form),
    ))
}

pub async fn publish_form_handler(
    id: &str,
    workspace: &State<Workspace>,
) -> ApiResult<Json<ActionResponse<FormView>>> {
    let form = workspace
        .publish_form(&RecordId::from(id))
        .await
        .map_err(|e| api_error(e, None))?;

    let next_actions = vec![format!("Share the application link: /api/jobs/{}/link", id)];
    Ok(Json(
        ActionResponse::success(
            format!("Application form for '{}' published", form.job_title),
            "form_published".to_string(),
            None,
        )
        .with_next_actions(next_actions)
        .with_data(form),
    ))
}
