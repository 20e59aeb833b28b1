// src/web/types.rs

use rocket::http::{ContentType, Status};
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

use crate::app_log;
use crate::error::DashboardError;

pub struct CsvResponse {
    pub data: String,
    pub filename: Option<String>,
}

impl CsvResponse {
    pub fn with_filename(data: String, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for CsvResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::CSV)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if let Some(filename) = self.filename {
            response = response.raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            );
        }

        response.ok()
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<crate::error::FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

// Request bodies may carry a conversation_id next to their own fields
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

pub type ApiError = status::Custom<Json<StandardErrorResponse>>;
pub type ApiResult<T> = Result<T, ApiError>;

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl<T> ActionResponse<T> {
    pub fn success(message: String, action: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            data: None,
            next_actions: None,
            conversation_id,
        }
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_next_actions(mut self, next_actions: Vec<String>) -> Self {
        self.next_actions = Some(next_actions);
        self
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            field_errors: Vec::new(),
            conversation_id,
        }
    }

    pub fn from_error(error: &DashboardError, conversation_id: Option<String>) -> Self {
        Self {
            field_errors: error.field_errors().to_vec(),
            ..Self::new(
                error.to_string(),
                error.code().to_string(),
                error.suggestions(),
                conversation_id,
            )
        }
    }
}

pub fn http_status(error: &DashboardError) -> Status {
    match error {
        DashboardError::NotFound { .. } | DashboardError::UnknownPlan(_) => Status::NotFound,
        DashboardError::Validation(_) => Status::UnprocessableEntity,
        DashboardError::InvalidTransition { .. } | DashboardError::Busy(_) => Status::Conflict,
        DashboardError::NothingSelected(_) => Status::BadRequest,
        DashboardError::TransientIo(_) => Status::ServiceUnavailable,
    }
}

pub fn api_error(error: DashboardError, conversation_id: Option<String>) -> ApiError {
    status::Custom(
        http_status(&error),
        Json(StandardErrorResponse::from_error(&error, conversation_id)),
    )
}

/// Export failures are not domain errors; they surface as 500s.
pub fn internal_error(error: anyhow::Error) -> ApiError {
    app_log!(error, "Request failed: {:#}", error);
    status::Custom(
        Status::InternalServerError,
        Json(StandardErrorResponse::new(
            "Internal server error".to_string(),
            "INTERNAL_ERROR".to_string(),
            vec!["Try again in a few moments".to_string()],
            None,
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfd::{RecordId, RecordKind};

    #[test]
    fn test_error_envelope_carries_fields() {
        let err = DashboardError::invalid("title", "Job title is required");
        let body = StandardErrorResponse::from_error(&err, Some("c-1".to_string()));
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert_eq!(body.field_errors.len(), 1);
        assert_eq!(http_status(&err), Status::UnprocessableEntity);
    }

    #[test]
    fn test_status_mapping() {
        let missing = DashboardError::not_found(RecordKind::Job, &RecordId::from("9"));
        assert_eq!(http_status(&missing), Status::NotFound);
        assert_eq!(
            http_status(&DashboardError::Busy("job submission")),
            Status::Conflict
        );
        assert_eq!(
            http_status(&DashboardError::TransientIo("timeout".to_string())),
            Status::ServiceUnavailable
        );
    }
}
