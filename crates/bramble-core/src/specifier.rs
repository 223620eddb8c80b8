//! Bare import specifier parsing.

/// A bare specifier split into its package name and subpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpecifier<'a> {
    /// The package name, including the scope for `@scope/name`.
    pub name: &'a str,
    /// The subpath in `exports` form, always starting with `.`.
    pub subpath: String,
}

/// Split a bare specifier like `pkg/sub` or `@scope/pkg/sub`.
///
/// Returns `None` for the empty string, a scoped specifier without a
/// name, or a package name that starts with `.` or contains `\` or
/// `%`.
#[must_use]
pub fn parse_package_name(specifier: &str) -> Option<PackageSpecifier<'_>> {
    if specifier.is_empty() {
        return None;
    }

    let slash = specifier.find('/');
    let name = if specifier.starts_with('@') {
        // A scope alone is not a valid package name
        let slash = slash?;
        let rest = &specifier[slash + 1..];
        match rest.find('/') {
            Some(second) => &specifier[..slash + 1 + second],
            None => specifier,
        }
    } else {
        &specifier[..slash.unwrap_or(specifier.len())]
    };

    if name.starts_with('.') || name.contains('\\') || name.contains('%') {
        return None;
    }

    Some(PackageSpecifier {
        name,
        subpath: format!(".{}", &specifier[name.len()..]),
    })
}

/// Whether a path is package-shaped rather than relative or absolute.
#[must_use]
pub fn is_package_path(path: &str) -> bool {
    !path.starts_with('/')
        && !path.starts_with("./")
        && !path.starts_with("../")
        && path != "."
        && path != ".."
}
