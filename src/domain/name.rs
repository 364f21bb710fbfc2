//! Package and import name normalization

/// Normalize a package or import name for loose comparison.
///
/// Lower-cases the input and maps every `-` and `.` to `_`, so that
/// `My.Package`, `my-package` and `my_package` all compare equal.
pub fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hyphen_and_dot() {
        assert_eq!(normalize("my-package"), "my_package");
        assert_eq!(normalize("My.Package"), "my_package");
        assert_eq!(normalize("my_package"), "my_package");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["Flask-RESTful", "zope.interface", "PIL", "", "a-.b_C"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }
}
