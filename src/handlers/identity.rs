use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::domain::identity::{Principal, Role};
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";
pub const CUSTOMER_ID_HEADER: &str = "X-Customer-Id";

/// The caller as asserted by the gateway in front of this service.
///
/// A request without a usable `X-User-Id` is rejected with 401 before the
/// handler runs. `X-User-Role` defaults to `customer`.
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(principal_from_headers(req.headers()).map(Identity))
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub fn principal_from_headers(headers: &HeaderMap) -> Result<Principal, AppError> {
    let user_id = header(headers, USER_ID_HEADER)
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| AppError::Unauthorized("Please login".to_string()))?;

    let role = match header(headers, USER_ROLE_HEADER) {
        Some(role) => role.parse::<Role>()?,
        None => Role::Customer,
    };

    let customer_id = header(headers, CUSTOMER_ID_HEADER)
        .map(|v| {
            Uuid::parse_str(v)
                .map_err(|_| AppError::BadRequest(format!("Invalid {CUSTOMER_ID_HEADER} '{v}'")))
        })
        .transpose()?;

    Ok(Principal {
        user_id,
        role,
        customer_id,
    })
}
