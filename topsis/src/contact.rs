//! Validation of the contact address that accompanies a submitted decision table.

use snafu::prelude::*;

use crate::config::*;

/// Accepts addresses shaped like `local@domain.tld`.
///
/// There must be exactly one `@`, something before it, and a `.` in the domain
/// with at least one character on each side.
pub fn check_email(address: &str) -> Result<(), TopsisError> {
    let valid = match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.contains('@') => {
            let n = domain.len();
            domain
                .char_indices()
                .any(|(i, c)| c == '.' && i > 0 && i + 1 < n)
        }
        _ => false,
    };
    ensure!(
        valid,
        InvalidEmailSnafu {
            address: address.to_string(),
        }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted() {
        assert!(check_email("jane@example.com").is_ok());
        assert!(check_email("a@b.c").is_ok());
        assert!(check_email("first.last@mail.example.org").is_ok());
    }

    #[test]
    fn rejected() {
        for s in [
            "",
            "jane",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@.com",
            "jane@example.",
            "jane@ex@ample.com",
        ] {
            assert!(
                matches!(check_email(s), Err(TopsisError::InvalidEmail { .. })),
                "{:?} should be rejected",
                s
            );
        }
    }
}
