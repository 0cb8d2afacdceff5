use crate::{error::ApiError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use database::services::identity::IdentityService;
use models::identity::Principal;

/// The principal behind the request's `Authorization: Token <key>` header
#[derive(Debug, Clone)]
pub struct Auth(pub Principal);

impl Auth {
    /// Student id of the caller, or 403 for other roles
    pub fn student_id(&self) -> Result<i32, ApiError> {
        match self.0 {
            Principal::Student { student_id, .. } => Ok(student_id),
            _ => Err(ApiError::forbidden("Only students can access this resource.")),
        }
    }

    /// Department headed by the caller, or 403 for other roles
    pub fn hod_department(&self) -> Result<i32, ApiError> {
        match self.0 {
            Principal::Hod { department_id, .. } => Ok(department_id),
            _ => Err(ApiError::forbidden(
                "Only heads of department can access this resource.",
            )),
        }
    }
}

/// Extracts the key from `Token <key>` or `Bearer <key>`
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();

    let known = scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    (known && !key.is_empty()).then_some(key)
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let key = token_from_headers(&parts.headers).ok_or_else(|| {
            ApiError::unauthorized("Authentication credentials were not provided.")
        })?;

        IdentityService::authenticate(&state.db, key)
            .await?
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Invalid token."))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_token_from_headers() {
        assert_eq!(token_from_headers(&headers("Token abc123")), Some("abc123"));
        assert_eq!(token_from_headers(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(token_from_headers(&headers("bearer  abc123 ")), Some("abc123"));
        assert_eq!(token_from_headers(&headers("Basic abc123")), None);
        assert_eq!(token_from_headers(&headers("Token")), None);
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_role_checks() {
        let hod = Auth(Principal::Hod {
            user_id: 1,
            hod_id: 2,
            department_id: 3,
        });
        assert_eq!(hod.hod_department().unwrap(), 3);
        assert!(hod.student_id().is_err());

        let admin = Auth(Principal::Admin { user_id: 1 });
        assert_eq!(
            admin.hod_department().unwrap_err().status,
            axum::http::StatusCode::FORBIDDEN
        );
    }
}
