use std::error::Error;

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};
use tera::Tera;

use crate::test_ids::TEST_IDS;

pub const PAGE_TITLE: &str = "Weather Api service";

pub fn error_chain_fmt(e: &impl Error, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }

    Ok(())
}

/// Context every page starts from: title, test ids and an empty toast slot.
pub fn page_context() -> tera::Context {
    let mut ctx = tera::Context::new();
    ctx.insert("title", PAGE_TITLE);
    ctx.insert("ids", &TEST_IDS);
    ctx.insert("toast", &Option::<super::Toast>::None);
    ctx
}

pub fn render_page(
    tera: &Tera,
    template_name: &str,
    ctx: &tera::Context,
    status: StatusCode,
) -> Result<HttpResponse, actix_web::Error> {
    let page = tera.render(template_name, ctx).map_err(e500)?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(page))
}

pub fn e500<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    actix_web::error::ErrorInternalServerError(e)
}
