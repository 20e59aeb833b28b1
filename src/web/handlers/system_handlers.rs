// src/web/handlers/system_handlers.rs
use crate::lfd::RecordKind;
use crate::web::types::*;
use crate::workspace::Workspace;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(workspace: &State<Workspace>) -> Json<TextResponse> {
    let busy: Vec<&str> = [RecordKind::Application, RecordKind::Candidate, RecordKind::Job]
        .into_iter()
        .filter(|kind| workspace.is_updating(*kind))
        .map(|kind| kind.plural())
        .collect();

    info!("Health check ({} screens with updates in flight)", busy.len());
    let message = if busy.is_empty() {
        "OK".to_string()
    } else {
        format!("OK (updating {})", busy.join(", "))
    };
    Json(TextResponse::success(message, None))
}
