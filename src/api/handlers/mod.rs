//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authentication handlers (register, login, logout).
pub mod auth;
/// List item CRUD and search handlers.
pub mod items;
/// Shopping list CRUD and search handlers.
pub mod lists;
/// Account management handlers (password reset, account info).
pub mod user;

use crate::types::{AppError, Result};

/// Largest accepted `page` or `per_page` value. Keeps the derived SQL
/// OFFSET (`(page - 1) * per_page`) well inside i64 range.
const MAX_PAGE_PARAM: i64 = 1_000_000;

/// Parses `page`/`per_page` query values.
///
/// When `page` is given without `per_page`, `per_page` defaults to 5. Both
/// must be positive integers within [`MAX_PAGE_PARAM`]. No `page` at all
/// means an unpaginated fetch.
pub(crate) fn parse_page_params(
    page: Option<&str>,
    per_page: Option<&str>,
) -> Result<Option<(i64, i64)>> {
    let page = match page.filter(|p| !p.is_empty()) {
        Some(p) => p,
        None => return Ok(None),
    };
    let per_page = per_page.filter(|p| !p.is_empty()).unwrap_or("5");

    let (page, per_page) = match (page.parse::<i64>(), per_page.parse::<i64>()) {
        (Ok(p), Ok(pp)) => (p, pp),
        _ => {
            return Err(AppError::Validation(
                "Page and per page should be integers".to_string(),
            ))
        }
    };

    if page <= 0 || per_page <= 0 {
        return Err(AppError::Validation(
            "Page and per page should be more than 0".to_string(),
        ));
    }
    if page > MAX_PAGE_PARAM || per_page > MAX_PAGE_PARAM {
        return Err(AppError::Validation(
            "Page and per page are out of range".to_string(),
        ));
    }

    Ok(Some((page, per_page)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_page_means_unpaginated() {
        assert_eq!(parse_page_params(None, None).unwrap(), None);
        assert_eq!(parse_page_params(None, Some("10")).unwrap(), None);
    }

    #[test]
    fn test_per_page_defaults_to_five() {
        assert_eq!(parse_page_params(Some("2"), None).unwrap(), Some((2, 5)));
        assert_eq!(parse_page_params(Some("2"), Some("")).unwrap(), Some((2, 5)));
    }

    #[test]
    fn test_non_integer_rejected() {
        assert!(parse_page_params(Some("abc"), Some("5")).is_err());
        assert!(parse_page_params(Some("1"), Some("xyz")).is_err());
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert!(parse_page_params(Some("0"), Some("5")).is_err());
        assert!(parse_page_params(Some("1"), Some("-3")).is_err());
    }

    #[test]
    fn test_huge_values_rejected() {
        let max = i64::MAX.to_string();
        assert!(parse_page_params(Some(&max), Some(&max)).is_err());
        assert!(parse_page_params(Some("1"), Some(&max)).is_err());
        assert!(parse_page_params(Some("1000001"), Some("5")).is_err());
        assert!(parse_page_params(Some("1000000"), Some("5")).is_ok());
    }
}
