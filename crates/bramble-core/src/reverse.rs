//! Reverse resolution: from a package-relative path back to the
//! specifier a consumer would write.
//!
//! Used for friendly diagnostics ("did you mean to import X?") and
//! for rewriting imports when bundling. This walks the same `exports`
//! tree as forward resolution, but matches against the targets and
//! synthesizes the key.

use rustc_hash::FxHashSet;

use crate::map::{MapEntry, MapEntryKind};
use crate::source::SourceRange;

/// How a target is compared against the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReverseKind {
    Exact,
    Pattern,
    Prefix,
}

/// Find the specifier subpath that forward-resolves to `query`.
///
/// `query` is a package-relative path in the same form forward
/// resolution produces (`./…`). Returns the synthesized subpath and
/// the range of the matched target. Only subpath-form `exports`
/// objects can be walked backwards.
#[must_use]
pub fn reverse_resolve_exports(
    query: &str,
    root: &MapEntry,
    conditions: &FxHashSet<String>,
) -> Option<(String, SourceRange)> {
    if matches!(root.kind, MapEntryKind::Object(_)) && root.keys_start_with_dot() {
        return reverse_resolve_match(query, root, conditions);
    }
    None
}

fn reverse_resolve_match(
    query: &str,
    match_obj: &MapEntry,
    conditions: &FxHashSet<String>,
) -> Option<(String, SourceRange)> {
    let object = match_obj.as_object()?;

    if !query.ends_with('*') {
        for field in &object.fields {
            if let Some(found) =
                reverse_resolve_target(query, &field.key, &field.value, ReverseKind::Exact, conditions)
            {
                return Some(found);
            }
        }
    }

    for field in object.expansion_fields() {
        if field.key.contains('*') {
            if let Some(found) = reverse_resolve_target(
                query,
                &field.key,
                &field.value,
                ReverseKind::Pattern,
                conditions,
            ) {
                return Some(found);
            }
        }

        if let Some(found) =
            reverse_resolve_target(query, &field.key, &field.value, ReverseKind::Prefix, conditions)
        {
            return Some(found);
        }
    }

    None
}

fn reverse_resolve_target(
    query: &str,
    key: &str,
    target: &MapEntry,
    kind: ReverseKind,
    conditions: &FxHashSet<String>,
) -> Option<(String, SourceRange)> {
    match &target.kind {
        MapEntryKind::Str(str_data) => match kind {
            ReverseKind::Exact => {
                if query == str_data {
                    return Some((key.to_string(), target.first_token));
                }
                None
            }

            ReverseKind::Prefix => {
                if let Some(rest) = query.strip_prefix(str_data.as_str()) {
                    return Some((format!("{key}{rest}"), target.first_token));
                }
                None
            }

            ReverseKind::Pattern => {
                let Some(star) = str_data.find('*') else {
                    // A pattern key with a literal target degrades to
                    // exact matching
                    if query == str_data {
                        return Some((key.replacen('*', "", 1), target.first_token));
                    }
                    return None;
                };

                // Only trace through a single "*"
                let prefix = &str_data[..star];
                let suffix = &str_data[star + 1..];
                if !suffix.contains('*') && query.starts_with(prefix) {
                    let after_prefix = &query[prefix.len()..];
                    if let Some(star_data) = after_prefix.strip_suffix(suffix) {
                        return Some((key.replacen('*', star_data, 1), target.first_token));
                    }
                }
                None
            }
        },

        MapEntryKind::Object(object) => {
            for field in &object.fields {
                if field.key == "default" || conditions.contains(field.key.as_str()) {
                    if let Some(found) =
                        reverse_resolve_target(query, key, &field.value, kind, conditions)
                    {
                        return Some(found);
                    }
                }
            }
            None
        }

        MapEntryKind::Array(items) => {
            for item in items {
                if let Some(found) = reverse_resolve_target(query, key, item, kind, conditions) {
                    return Some(found);
                }
            }
            None
        }

        _ => None,
    }
}
