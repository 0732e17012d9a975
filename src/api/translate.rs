//! REST API endpoint for transcript translation

use actix_web::{post, web, HttpResponse};

use crate::api::error::ApiError;
use crate::model::TranslationRequest;
use crate::service::TranslationService;

/// Translate text into a target language
#[utoipa::path(
    post,
    path = "/v1/translate",
    request_body = TranslationRequest,
    responses(
        (status = 200, description = "Translation completed", body = crate::model::TranslationResponse),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "Translation backend unavailable")
    ),
    tag = "translation"
)]
#[post("/v1/translate")]
pub async fn translate_text(
    service: web::Data<TranslationService>,
    body: web::Json<TranslationRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }
    if body.target_language.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "target_language must not be empty".to_string(),
        ));
    }

    let response = service
        .translate(&body.text, &body.target_language)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configure translation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(translate_text);
}
