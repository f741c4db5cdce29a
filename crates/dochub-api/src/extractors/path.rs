//! Typed path parameter helpers.
//!
//! A path segment that is not a UUID cannot name any row, so it is reported
//! as `NotFound` rather than as bad input.

use std::str::FromStr;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;

/// Parse an id from a path segment.
pub fn parse_id<T: FromStr>(s: &str, what: &str) -> AppResult<T> {
    T::from_str(s).map_err(|_| AppError::not_found(format!("{what} '{s}' not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::error::ErrorKind;
    use dochub_core::types::FolderId;

    #[test]
    fn test_parse_id() {
        let id = FolderId::new();
        assert_eq!(parse_id::<FolderId>(&id.to_string(), "Folder").unwrap(), id);
        let err = parse_id::<FolderId>("reports", "Folder").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
