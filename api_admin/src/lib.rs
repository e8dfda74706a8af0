use actix_web::web::{self};

pub mod middleware {
    pub mod admin;
}

pub mod routes {
    pub mod admin;
}

mod services {
    pub(crate) mod admin;
}

mod dtos {
    pub(crate) mod admin;
}

pub use middleware::admin::AdminGuard;

pub fn mount_admin() -> actix_web::Scope {
    web::scope("/admin")
        .service(routes::admin::get_payment_requests)
        .service(routes::admin::post_payment_request)
        .service(routes::admin::get_profiles)
        .service(routes::admin::post_subscription)
}
