//! Redirect-with-flash
//!
//! The message rides in a short-lived `flash` cookie set on the redirect and
//! is cleared by the page that shows it.

use axum::response::{IntoResponse, Redirect, Response};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

const COOKIE_NAME: &str = "flash";

/// One-shot notice shown above the reservation list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Created,
    Updated,
    Deleted,
}

impl Flash {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Created => "Reservation created.",
            Self::Updated => "Reservation updated.",
            Self::Deleted => "Reservation deleted.",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Read the pending flash from the request cookies
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, value)| Self::from_key(value.trim()))
    }

    /// `303 See Other` to `to`, carrying this flash
    pub fn redirect(self, to: &str) -> Response {
        let cookie = format!(
            "{COOKIE_NAME}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
            self.key()
        );
        let mut response = Redirect::to(to).into_response();
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
        response
    }
}

/// `Set-Cookie` header that expires the flash cookie
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}
