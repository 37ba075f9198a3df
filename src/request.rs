//! Extractors that report rejections with the app's error envelope, and
//! helpers for reading request fields.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

/// Like [axum::Json], but rejections are reported with the app's [Error]
/// envelope instead of axum's plain text bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Like [axum::extract::Query], with rejections reported as [Error::Validation].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);

/// Like [axum::extract::Path], with rejections reported as [Error::Validation].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

/// Treat a missing, empty or whitespace-only string field as absent.
pub fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::required;

    #[test]
    fn blank_strings_are_treated_as_missing() {
        assert_eq!(required(None), None);
        assert_eq!(required(Some(String::new())), None);
        assert_eq!(required(Some("   ".to_owned())), None);
        assert_eq!(required(Some("Food".to_owned())), Some("Food".to_owned()));
    }
}
