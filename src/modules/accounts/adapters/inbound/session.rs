// Axum extractors for the session principal.
//
// The authenticator in front of this service validates the session and forwards
// the claims as headers. A request without a user id or with an unknown role is
// treated as having no session at all.

use crate::modules::accounts::core::principal::Principal;
use crate::modules::accounts::core::user::Role;
use crate::shell::api_error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn principal_from_headers(headers: &HeaderMap) -> Option<Principal> {
    let user_id = header_value(headers, USER_ID_HEADER)?;
    let role = header_value(headers, USER_ROLE_HEADER)?.parse::<Role>().ok()?;
    Some(Principal {
        user_id,
        role,
        name: header_value(headers, USER_NAME_HEADER),
        email: header_value(headers, USER_EMAIL_HEADER),
    })
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)
    }
}

/// A principal holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Principal);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        if principal.has_role(Role::Admin) {
            Ok(AdminSession(principal))
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// A principal holding the distributor role.
#[derive(Debug, Clone)]
pub struct DistributorSession(pub Principal);

impl<S> FromRequestParts<S> for DistributorSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;
        if principal.has_role(Role::Distributor) {
            Ok(DistributorSession(principal))
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}
