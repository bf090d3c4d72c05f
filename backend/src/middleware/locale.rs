//! Locale extraction middleware.
//!
//! Reads the `Accept-Language` header and records the caller's language
//! for the current request so error rendering picks the right translation.

use axum::{
    extract::Request,
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::Response,
};

use crate::utils::{locale_from_header, set_locale};

pub async fn locale_middleware(req: Request, next: Next) -> Response {
    let locale = locale_from_header(
        req.headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );

    set_locale(locale);

    next.run(req).await
}
