#![forbid(unsafe_code)]

//! Construction errors.

use core::fmt;

/// The container handed to [`ScrollController::new`](crate::ScrollController::new)
/// was absent.
///
/// This is the only failure the controller can produce. It is raised before
/// any side effect, so no styling or scheduling is left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvalidContainerError;

impl fmt::Display for InvalidContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "container not found: pass an existing scrollable element (e.g. the element with id `monkieprompter`)"
        )
    }
}

impl std::error::Error for InvalidContainerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_problem() {
        let msg = InvalidContainerError.to_string();
        assert!(msg.starts_with("container not found"));
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(InvalidContainerError);
        assert!(err.source().is_none());
    }
}
