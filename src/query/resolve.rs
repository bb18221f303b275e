use tracing::debug;

use super::error::{Criteria, LookupError};

/// Reduces a match set to its single element, or explains why it can't.
pub(crate) fn unique<Q: Criteria>(
    query: &Q,
    mut found: Vec<Q::Match>,
) -> Result<Q::Match, LookupError<Q>> {
    match found.len() {
        0 => Err(LookupError::not_found(query.clone())),
        1 => Ok(found.remove(0)),
        n => {
            debug!(matches = n, "expected a unique match");
            Err(LookupError::multiple_found(query.clone(), found))
        }
    }
}

/// Reports a lookup failure through the test harness: the calling test
/// panics with the diagnostic, and the failure kind survives only as text.
#[track_caller]
pub(crate) fn or_fail<Q: Criteria>(result: Result<Q::Match, LookupError<Q>>) -> Q::Match {
    match result {
        Ok(found) => found,
        Err(e) => panic!("{}. Failed with {}: {}", e.message(), e.kind(), e.message()),
    }
}
