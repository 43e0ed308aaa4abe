use actix_web::{HttpResponse, web};
use tera::Tera;

use super::subscriptions_confirm::{TokenPageTexts, parse_token, render_token_page};
use crate::api_client::ApiClient;
use crate::test_ids::UNSUBSCRIBE_PAGE_IDS;

pub const UNSUBSCRIBE_TEXTS: TokenPageTexts = TokenPageTexts {
    ids: UNSUBSCRIBE_PAGE_IDS,
    success_text: "Succsessfuly unsubscribed ✅",
    success_toast: "Succsessfuly unsubscribed!",
    failure_text: "Unsubscribe failed! ❌",
    failure_toast_prefix: "Unsubscribe failed",
};

#[tracing::instrument(name = "Unsubscribe a confirmed subscriber", skip(token, api_client, tera))]
pub async fn unsubscribe(
    token: web::Path<String>,
    api_client: web::Data<ApiClient>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, actix_web::Error> {
    let outcome = match parse_token(token.into_inner()) {
        Ok(token) => api_client.unsubscribe(&token).await,
        Err(e) => Err(e),
    };

    render_token_page(&tera, &UNSUBSCRIBE_TEXTS, outcome)
}
