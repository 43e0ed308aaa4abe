use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Serialize;
use tera::Tera;

use super::helpers::{page_context, render_page};
use super::notifications::Toast;
use crate::api_client::{ApiClient, ApiError};
use crate::domain::ConfirmationToken;
use crate::test_ids::{CONFIRM_PAGE_IDS, ResultPageIds};

/// Wording of one token page (confirmation or unsubscribe) in both outcomes.
pub struct TokenPageTexts {
    pub ids: ResultPageIds,
    pub success_text: &'static str,
    pub success_toast: &'static str,
    pub failure_text: &'static str,
    pub failure_toast_prefix: &'static str,
}

pub const CONFIRM_TEXTS: TokenPageTexts = TokenPageTexts {
    ids: CONFIRM_PAGE_IDS,
    success_text: "Subscription confirmed ✅",
    success_toast: "Subscription confirmed!",
    failure_text: "Confirmation failed ❌",
    failure_toast_prefix: "Confirmation failed",
};

#[derive(Debug, Serialize)]
struct TokenPageView {
    ids: ResultPageIds,
    succeeded: bool,
    text: &'static str,
}

/// Renders the terminal state of a token page from the outcome of its single API call.
pub fn render_token_page(
    tera: &Tera,
    texts: &TokenPageTexts,
    outcome: Result<(), ApiError>,
) -> Result<HttpResponse, actix_web::Error> {
    let (view, toast) = match outcome {
        Ok(()) => (
            TokenPageView {
                ids: texts.ids,
                succeeded: true,
                text: texts.success_text,
            },
            Toast::success(texts.success_toast),
        ),
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} request was rejected",
                texts.failure_toast_prefix
            );
            (
                TokenPageView {
                    ids: texts.ids,
                    succeeded: false,
                    text: texts.failure_text,
                },
                Toast::error(format!("{}: {e}", texts.failure_toast_prefix)),
            )
        }
    };

    let mut ctx = page_context();
    ctx.insert("page", &view);
    ctx.insert("toast", &Some(toast));
    render_page(tera, "token_result.html", &ctx, StatusCode::OK)
}

/// Parses the token from the path. Only a blank token is answered without calling the API.
pub fn parse_token(token: String) -> Result<ConfirmationToken, ApiError> {
    ConfirmationToken::parse(token).map_err(|e| {
        tracing::warn!(error.message = %e, "Blank token in link");
        ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            message: "Invalid token".into(),
        }
    })
}

#[tracing::instrument(name = "Confirm a pending subscription", skip(token, api_client, tera))]
pub async fn confirm(
    token: web::Path<String>,
    api_client: web::Data<ApiClient>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, actix_web::Error> {
    let outcome = match parse_token(token.into_inner()) {
        Ok(token) => api_client.confirm_subscription(&token).await,
        Err(e) => Err(e),
    };

    render_token_page(&tera, &CONFIRM_TEXTS, outcome)
}
