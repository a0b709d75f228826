//! Attributes of the `token` cookie that carries the session token.
//!
//! Production deployments serve the API and the client from different
//! sites, so the cookie must be `Secure` with `SameSite=None`. Everywhere
//! else it is `SameSite=Strict` and may travel over plain HTTP.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    None,
}

#[derive(Clone, Debug)]
pub struct SessionCookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSitePolicy,
}

impl SessionCookieConfig {
    pub fn for_mode(production: bool) -> Self {
        Self {
            name: "token".to_string(),
            secure: production,
            same_site: if production {
                SameSitePolicy::None
            } else {
                SameSitePolicy::Strict
            },
        }
    }

    pub fn from_env() -> Self {
        Self::for_mode(crate::is_production())
    }
}
