use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::{Extension, Json};

use crate::domain::service::Service;

use super::dto::{CalculateRequest, CalculateResponse};
use super::error::ApiResult;
use super::pages;

pub async fn index() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

pub async fn calculator_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        pages::CALCULATOR_JS,
    )
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn history(Extension(svc): Extension<Arc<Service>>) -> Html<String> {
    let records = svc.history().await;
    Html(pages::render_history(&records))
}

pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<CalculateResponse>> {
    let Json(req) = payload?;
    let result = svc.calculate(&req.expression).await?;
    Ok(Json(CalculateResponse { result }))
}
