use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use tera::Tera;

use super::helpers::{page_context, render_page};

#[tracing::instrument(name = "Rendering not found page", skip(req, tera), fields(path = %req.path()))]
pub async fn not_found(
    req: HttpRequest,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, actix_web::Error> {
    render_page(&tera, "not_found.html", &page_context(), StatusCode::NOT_FOUND)
}
