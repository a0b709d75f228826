use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use stayvista_auth::{AuthError, Identity, verify_session_token};
use stayvista_config::{SameSitePolicy, SessionCookieConfig};

use crate::state::AppState;

/// Verifies the session cookie carried by `headers`.
///
/// A missing or empty cookie is [`AuthError::Unauthenticated`], same as a
/// token that fails verification.
pub fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Identity, AuthError> {
    let jar = CookieJar::from_headers(headers);
    let token = jar
        .get(&state.session_config.name)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::Unauthenticated)?;

    verify_session_token(token, &state.jwt_config)
}

/// Extractor for the authenticated caller.
///
/// Behind a gate it reuses the identity the gate already verified; on an
/// ungated route it verifies the cookie itself.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(CurrentUser(identity.clone()));
        }

        authenticate(&parts.headers, state).map(CurrentUser)
    }
}

/// The cookie that carries a freshly issued session token.
pub fn session_cookie(config: &SessionCookieConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token))
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(config.same_site))
        .path("/")
        .build()
}

/// A removal cookie for the session: empty value, expired, same attributes
/// as the issued one so browsers match and drop it.
pub fn cleared_session_cookie(config: &SessionCookieConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(config, String::new());
    cookie.make_removal();
    cookie
}

fn same_site(policy: SameSitePolicy) -> SameSite {
    match policy {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::None => SameSite::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie_attributes() {
        let cookie = session_cookie(&SessionCookieConfig::for_mode(false), "abc".to_string());
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_production_cookie_attributes() {
        let cookie = session_cookie(&SessionCookieConfig::for_mode(true), "abc".to_string());
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn test_cleared_cookie_expires_immediately() {
        let cookie = cleared_session_cookie(&SessionCookieConfig::for_mode(false));
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
    }
}
