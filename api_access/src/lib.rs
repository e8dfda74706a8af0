use actix_web::web::{self};

pub mod identity;

pub mod routes {
    pub mod access;
    pub mod purchase;
}

mod services {
    pub(crate) mod access;
    pub(crate) mod purchase;
}

mod dtos {
    pub(crate) mod access;
    pub(crate) mod purchase;
}

pub fn mount_access() -> actix_web::Scope {
    web::scope("/access")
        .service(routes::access::post_session)
        .service(routes::access::get_content)
        .service(routes::access::get_subscription)
        .service(routes::purchase::post_purchase)
        .service(routes::purchase::get_purchases)
}
