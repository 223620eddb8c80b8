//! Pure path manipulation for package-relative lookups.
//!
//! Resolution works on `/`-separated paths rooted at the package
//! directory, so the lexical operations here never touch the disk.
//! The [`PathOps`] trait is the seam through which the outer resolver
//! can substitute platform-specific behavior.

/// Lexically normalize a `/`-separated path.
///
/// Collapses duplicate separators and `.` segments, resolves `..`
/// against earlier segments, and drops any trailing separator. An
/// empty result becomes `"."`.
#[must_use]
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
                // ".." above a rooted path stays at the root
            }
            _ => segments.push(segment),
        }
    }

    let mut cleaned = if rooted {
        String::from("/")
    } else {
        String::new()
    };
    cleaned.push_str(&segments.join("/"));
    if cleaned.is_empty() {
        ".".to_string()
    } else {
        cleaned
    }
}

/// Join two `/`-separated path fragments and normalize the result.
///
/// Empty fragments are ignored; joining two empty fragments yields an
/// empty string rather than `"."`.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    if base.is_empty() {
        if path.is_empty() {
            String::new()
        } else {
            clean(path)
        }
    } else if path.is_empty() {
        clean(base)
    } else {
        clean(&format!("{base}/{path}"))
    }
}

/// Path operations supplied to the core by the outer resolver.
pub trait PathOps: std::fmt::Debug {
    /// Join `path` onto `base`.
    fn join(&self, base: &str, path: &str) -> String;

    /// Compute the path of `target` relative to `base`, or `None` when
    /// no relative path exists (for example, mixed absolute and
    /// relative inputs).
    fn relative(&self, base: &str, target: &str) -> Option<String>;
}

/// Lexical `/`-separated implementation of [`PathOps`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixPaths;

impl PathOps for PosixPaths {
    fn join(&self, base: &str, path: &str) -> String {
        join(base, path)
    }

    fn relative(&self, base: &str, target: &str) -> Option<String> {
        let base = clean(base);
        let target = clean(target);
        if base == target {
            return Some(".".to_string());
        }
        if !base.starts_with('/') || !target.starts_with('/') {
            return None;
        }

        let base_segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
        let target_segments: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();
        let common = base_segments
            .iter()
            .zip(&target_segments)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; base_segments.len() - common];
        parts.extend(&target_segments[common..]);
        Some(parts.join("/"))
    }
}
