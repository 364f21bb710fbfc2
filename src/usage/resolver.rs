//! Alias-aware matching of package names against imports
//!
//! The match is a static heuristic. Packages loaded only through dynamic
//! imports (`importlib`, `__import__`), re-exported by another package, or
//! used purely as plugins, entry points or CLI tools are reported as not
//! imported.

use super::ImportSet;
use crate::domain::normalize;

/// Import names whose published package name differs (import name, package name)
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("PIL", "pillow"),
    ("cv2", "opencv-python"),
    ("sklearn", "scikit-learn"),
    ("bs4", "beautifulsoup4"),
    ("yaml", "pyyaml"),
    ("dotenv", "python-dotenv"),
    ("dateutil", "python-dateutil"),
    ("jwt", "pyjwt"),
    ("Crypto", "pycryptodome"),
    ("attr", "attrs"),
    ("pkg_resources", "setuptools"),
    ("google", "google-cloud"),
    ("serial", "pyserial"),
    ("usb", "pyusb"),
    ("magic", "python-magic"),
    ("gi", "pygobject"),
    ("wx", "wxpython"),
    ("MySQLdb", "mysql-python"),
    ("psycopg2", "psycopg2-binary"),
    ("flask", "flask"),
    ("django", "django"),
    ("fastapi", "fastapi"),
];

/// Returns true if `package` appears to be imported, using the built-in alias table
pub fn is_imported(package: &str, imports: &ImportSet) -> bool {
    is_imported_with(package, imports, DEFAULT_ALIASES)
}

/// Returns true if `package` appears to be imported.
///
/// A direct match on the normalized name wins. Otherwise every alias whose
/// package name normalizes to `package` is checked for its import name.
/// Lookup goes from package to import name only.
pub fn is_imported_with(package: &str, imports: &ImportSet, aliases: &[(&str, &str)]) -> bool {
    let key = normalize(package);
    if imports.contains_normalized(&key) {
        return true;
    }

    aliases
        .iter()
        .filter(|(_, published)| normalize(published) == key)
        .any(|(import_name, _)| imports.contains_normalized(&normalize(import_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_match() {
        let imports = ImportSet::from_names(["requests"]);
        assert!(is_imported("requests", &imports));
        assert!(is_imported("Requests", &imports));
    }

    #[test]
    fn test_normalized_match() {
        let imports = ImportSet::from_names(["flask_login"]);
        assert!(is_imported("Flask-Login", &imports));
    }

    #[test]
    fn test_alias_match() {
        let imports = ImportSet::from_names(["PIL", "sklearn", "bs4", "yaml"]);
        assert!(is_imported("Pillow", &imports));
        assert!(is_imported("scikit-learn", &imports));
        assert!(is_imported("beautifulsoup4", &imports));
        assert!(is_imported("PyYAML", &imports));
    }

    #[test]
    fn test_alias_is_one_directional() {
        let imports = ImportSet::from_names(["pillow"]);
        assert!(!is_imported("PIL", &imports));
    }

    #[test]
    fn test_not_imported() {
        let imports = ImportSet::from_names(["os", "json"]);
        assert!(!is_imported("numpy", &imports));
        assert!(!is_imported("pillow", &imports));
    }

    #[test]
    fn test_injected_alias_table() {
        let imports = ImportSet::from_names(["foo"]);
        let aliases = [("foo", "python-foo")];
        assert!(is_imported_with("python-foo", &imports, &aliases));
        assert!(!is_imported("python-foo", &imports));
    }
}
