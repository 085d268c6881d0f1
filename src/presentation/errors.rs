// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::analytics_use_case::AnalyticsError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl From<AnalyticsError> for (StatusCode, String) {
    fn from(err: AnalyticsError) -> Self {
        let message = err.to_string();
        let status = match err {
            AnalyticsError::CrawlNotFound
            | AnalyticsError::ProjectNotFound
            | AnalyticsError::PageNotFound(_) => StatusCode::NOT_FOUND,
            AnalyticsError::NotReady { .. } => StatusCode::ACCEPTED,
            AnalyticsError::CrossProjectMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AnalyticsError::Validation(_) => StatusCode::BAD_REQUEST,
            AnalyticsError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, message)
    }
}

fn analytics_response(err: AnalyticsError) -> Response {
    // 未完成的爬取返回占位响应而不是错误
    if let AnalyticsError::NotReady { crawl_id, status } = &err {
        let body = json!({
            "ready": false,
            "crawl_id": crawl_id,
            "status": status,
            "message": err.to_string(),
        });
        return (StatusCode::ACCEPTED, Json(body)).into_response();
    }

    let (status, message): (StatusCode, String) = err.into();
    if status.is_server_error() {
        error!("Analytics request failed: {}", message);
    }
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = match self.0.downcast::<AnalyticsError>() {
            Ok(analytics) => return analytics_response(analytics),
            Err(other) => other,
        };

        error!("Request failed: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.to_string() }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::crawl::CrawlStatus;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AnalyticsError::CrawlNotFound, StatusCode::NOT_FOUND),
            (AnalyticsError::ProjectNotFound, StatusCode::NOT_FOUND),
            (
                AnalyticsError::CrossProjectMismatch {
                    crawl_a: Uuid::nil(),
                    crawl_b: Uuid::nil(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AnalyticsError::Validation("limit".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            let (status, _): (StatusCode, String) = err.into();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_not_ready_is_accepted_placeholder() {
        let err = AppError::from(AnalyticsError::NotReady {
            crawl_id: Uuid::nil(),
            status: CrawlStatus::Running,
        });
        assert_eq!(err.into_response().status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
