use actix_web::{FromRequest, HttpRequest, dev::Payload};
use common::error::AppError;
use futures::future::{Ready, ready};

/// Identity asserted by the external provider in front of this service.
/// The id is an opaque string key; nothing here validates it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// The caller of a reader-facing endpoint. Anonymous visitors are a normal
/// case for the access gate, so extraction never fails on missing headers.
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<Identity>);

impl Viewer {
    pub fn require(self) -> Result<Identity, AppError> {
        self.0
            .ok_or_else(|| AppError::Unauthorized("no user identity supplied".to_string()))
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = header(req, "X-User-Id").map(|user_id| Identity {
            user_id,
            email: header(req, "X-User-Email").unwrap_or_default(),
            display_name: header(req, "X-User-Name").unwrap_or_default(),
        });
        ready(Ok(Viewer(identity)))
    }
}
