//! One-shot notices carried across a single redirect in a cookie.
//!
//! A mutation handler sets the notice on its redirect response; the page that
//! displays it removes the cookie in the same response, so it is shown once.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flash {
    CustomerAdded,
    CustomerUpdated,
    CustomerDeleted,
}

impl Flash {
    fn token(self) -> &'static str {
        match self {
            Flash::CustomerAdded => "added",
            Flash::CustomerUpdated => "updated",
            Flash::CustomerDeleted => "deleted",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "added" => Some(Flash::CustomerAdded),
            "updated" => Some(Flash::CustomerUpdated),
            "deleted" => Some(Flash::CustomerDeleted),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::CustomerAdded => "New customer has been added.",
            Flash::CustomerUpdated => "Customer has been updated.",
            Flash::CustomerDeleted => "Customer has been deleted.",
        }
    }

    /// Attach this notice to the outgoing response.
    pub fn set(self, jar: CookieJar) -> CookieJar {
        jar.add(
            Cookie::build((FLASH_COOKIE, self.token()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    }

    /// Read the pending notice, if any, and clear it.
    pub fn take(jar: CookieJar) -> (CookieJar, Option<Self>) {
        let Some(cookie) = jar.get(FLASH_COOKIE) else {
            return (jar, None);
        };
        let flash = Self::from_token(cookie.value());
        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
    }
}
