//! One-shot user notices carried across a redirect in a cookie.
//!
//! Only a short code is stored client-side; the text lives here.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const COOKIE_NAME: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    SaveFailed,
    UpdateFailed,
    DeleteFailed,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::MissingFields => "missing_fields",
            Notice::SaveFailed => "save_failed",
            Notice::UpdateFailed => "update_failed",
            Notice::DeleteFailed => "delete_failed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "missing_fields" => Some(Notice::MissingFields),
            "save_failed" => Some(Notice::SaveFailed),
            "update_failed" => Some(Notice::UpdateFailed),
            "delete_failed" => Some(Notice::DeleteFailed),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::MissingFields => "Both Title and Author are required!",
            Notice::SaveFailed => "The book could not be saved. Please try again.",
            Notice::UpdateFailed => "Error updating book. Please try again.",
            Notice::DeleteFailed => "The book could not be deleted. Please try again.",
        }
    }
}

/// Queue a notice for the next rendered page
pub fn push(jar: CookieJar, notice: Notice) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_NAME, notice.code()))
            .path("/")
            .http_only(true),
    )
}

/// Consume the pending notice, if any
pub fn take(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(COOKIE_NAME) else {
        return (jar, None);
    };
    let notice = Notice::from_code(cookie.value());
    (jar.remove(Cookie::build(COOKIE_NAME).path("/")), notice)
}
