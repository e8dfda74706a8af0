use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};

pub fn middleware(origin: &str) -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-email"),
            HeaderName::from_static("x-user-name"),
            HeaderName::from_static("x-admin-id"),
        ])
        .allowed_origin(origin)
        .supports_credentials()
        .max_age(3600)
}
