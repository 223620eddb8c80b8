//! Forward resolution over the `exports` and `imports` maps.
//!
//! The entry points mirror the ESM resolver algorithm: match by exact
//! key, then by pattern or prefix over the expansion keys, descend
//! condition objects in source order, and fall through array
//! fallbacks. Outcomes are status codes rather than errors so the
//! outer resolver can translate terminal statuses into user-facing
//! messages with the accompanying source range.

use rustc_hash::FxHashSet;

use crate::map::{MapEntry, MapEntryKind, MapField};
use crate::paths;
use crate::source::SourceRange;

/// Outcome of a map resolution step.
///
/// All thirteen codes are part of the stable contract with the outer
/// resolver, including the ones only it produces (`ModuleNotFound` is
/// assigned after the filesystem check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    Undefined,
    /// Like `Undefined`, but no condition matched anywhere; carries
    /// the unmatched condition names for a friendlier message.
    UndefinedNoConditionsMatch,
    Null,
    Exact,
    /// The result may still need CommonJS-style extension suffixes.
    Inexact,
    /// The result is a bare specifier; package resolution must be
    /// restarted on it.
    PackageResolve,
    InvalidModuleSpecifier,
    InvalidPackageConfiguration,
    InvalidPackageTarget,
    PackagePathNotExported,
    PackageImportNotDefined,
    ModuleNotFound,
    UnsupportedDirectoryImport,
}

impl ResolutionStatus {
    /// Both undefined flavors continue condition-map iteration.
    #[must_use]
    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined | Self::UndefinedNoConditionsMatch)
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Undefined => "UNDEFINED",
            Self::UndefinedNoConditionsMatch => "UNDEFINED_NO_CONDITIONS_MATCH",
            Self::Null => "NULL",
            Self::Exact => "EXACT",
            Self::Inexact => "INEXACT",
            Self::PackageResolve => "PACKAGE_RESOLVE",
            Self::InvalidModuleSpecifier => "INVALID_MODULE_SPECIFIER",
            Self::InvalidPackageConfiguration => "INVALID_PACKAGE_CONFIGURATION",
            Self::InvalidPackageTarget => "INVALID_PACKAGE_TARGET",
            Self::PackagePathNotExported => "PACKAGE_PATH_NOT_EXPORTED",
            Self::PackageImportNotDefined => "PACKAGE_IMPORT_NOT_DEFINED",
            Self::ModuleNotFound => "MODULE_NOT_FOUND",
            Self::UnsupportedDirectoryImport => "UNSUPPORTED_DIRECTORY_IMPORT",
        };
        write!(f, "{s}")
    }
}

/// Debug payload accompanying a resolution outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionDebug {
    /// Range of the token to use for error messages.
    pub token: SourceRange,
    /// For `UndefinedNoConditionsMatch`, the condition names that did
    /// not match.
    pub unmatched_conditions: Vec<String>,
}

/// A resolution outcome: the result string, a status, and debug data.
///
/// For `Exact`/`Inexact` the result is a package-rooted path; for
/// `PackageResolve` it is a bare specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: String,
    pub status: ResolutionStatus,
    pub debug: ResolutionDebug,
}

impl Resolution {
    fn new(result: impl Into<String>, status: ResolutionStatus, token: SourceRange) -> Self {
        Self {
            result: result.into(),
            status,
            debug: ResolutionDebug {
                token,
                unmatched_conditions: Vec::new(),
            },
        }
    }
}

/// Resolve a `#`-prefixed specifier against an `imports` map.
#[must_use]
pub fn resolve_imports(
    specifier: &str,
    imports: &MapEntry,
    conditions: &FxHashSet<String>,
) -> Resolution {
    if !matches!(imports.kind, MapEntryKind::Object(_)) {
        return Resolution::new(
            "",
            ResolutionStatus::InvalidPackageConfiguration,
            imports.first_token,
        );
    }

    let resolution = resolve_match(specifier, imports, "/", true, conditions);
    if resolution.status != ResolutionStatus::Null && resolution.status != ResolutionStatus::Undefined
    {
        return resolution;
    }

    tracing::debug!(specifier, "package import is not defined");
    Resolution::new(
        specifier,
        ResolutionStatus::PackageImportNotDefined,
        imports.first_token,
    )
}

/// Resolve a subpath against an `exports` map.
///
/// `package_url` is the package-rooted base the targets are joined
/// onto (`"/"` makes results package-relative). `subpath` is the
/// `.`-prefixed form produced by the specifier parser.
#[must_use]
pub fn resolve_exports(
    package_url: &str,
    subpath: &str,
    exports: &MapEntry,
    conditions: &FxHashSet<String>,
) -> Resolution {
    if matches!(exports.kind, MapEntryKind::Invalid) {
        return Resolution::new(
            "",
            ResolutionStatus::InvalidPackageConfiguration,
            exports.first_token,
        );
    }

    if subpath == "." {
        // The main export is the map itself in the string, array, and
        // conditional-sugar forms, or the "." entry of a subpath map
        let main_export: Option<&MapEntry> = match &exports.kind {
            MapEntryKind::Str(_) | MapEntryKind::Array(_) => Some(exports),
            MapEntryKind::Object(_) if !exports.keys_start_with_dot() => Some(exports),
            MapEntryKind::Object(_) => exports
                .value_for_key(".")
                .filter(|entry| !matches!(entry.kind, MapEntryKind::Null)),
            _ => None,
        };

        if let Some(main_export) = main_export {
            let resolution =
                resolve_target(package_url, main_export, "", false, false, conditions);
            if resolution.status != ResolutionStatus::Null
                && resolution.status != ResolutionStatus::Undefined
            {
                return resolution;
            }
        }
    } else if exports.keys_start_with_dot() {
        let resolution = resolve_match(subpath, exports, package_url, false, conditions);
        if resolution.status != ResolutionStatus::Null
            && resolution.status != ResolutionStatus::Undefined
        {
            return resolution;
        }
    }

    tracing::debug!(subpath, "path is not exported");
    Resolution::new(
        "",
        ResolutionStatus::PackagePathNotExported,
        exports.first_token,
    )
}

/// The shared matcher over a subpath-form object: exact key first,
/// then the expansion keys in length order.
fn resolve_match(
    match_key: &str,
    match_obj: &MapEntry,
    package_url: &str,
    is_imports: bool,
    conditions: &FxHashSet<String>,
) -> Resolution {
    tracing::debug!(match_key, "checking object path map");

    let Some(object) = match_obj.as_object() else {
        return Resolution::new("", ResolutionStatus::Null, match_obj.first_token);
    };

    if !match_key.ends_with('*') {
        if let Some(target) = match_obj.value_for_key(match_key) {
            tracing::debug!(match_key, "found exact match");
            return resolve_target(package_url, target, "", false, is_imports, conditions);
        }
    }

    for field in object.expansion_fields() {
        if let Some(star) = field.key.find('*') {
            // A pattern key: the text before the star must prefix the
            // match key and the text after it must suffix it
            let pattern_base = &field.key[..star];
            if match_key.starts_with(pattern_base) && match_key != pattern_base {
                let pattern_trailer = &field.key[star + 1..];
                if pattern_trailer.is_empty()
                    || (match_key.ends_with(pattern_trailer)
                        && match_key.len() >= field.key.len())
                {
                    let subpath =
                        &match_key[pattern_base.len()..match_key.len() - pattern_trailer.len()];
                    tracing::debug!(key = %field.key, subpath, "pattern key matched");
                    return resolve_target(
                        package_url,
                        &field.value,
                        subpath,
                        true,
                        is_imports,
                        conditions,
                    );
                }
            }
        } else if let Some(subpath) = match_key.strip_prefix(field.key.as_str()) {
            tracing::debug!(key = %field.key, subpath, "prefix key matched");
            let mut resolution = resolve_target(
                package_url,
                &field.value,
                subpath,
                false,
                is_imports,
                conditions,
            );
            if resolution.status == ResolutionStatus::Exact {
                // The caller may still need to try extension suffixes
                resolution.status = ResolutionStatus::Inexact;
            }
            return resolution;
        }
    }

    tracing::debug!(match_key, "no keys matched");
    Resolution::new("", ResolutionStatus::Null, match_obj.first_token)
}

/// If the path split on `/` or `\` contains a `.`, `..`, or
/// `node_modules` segment after the first segment, return it.
fn find_invalid_segment(path: &str) -> Option<&str> {
    let first = path.find(['/', '\\'])?;
    path[first + 1..]
        .split(['/', '\\'])
        .find(|segment| *segment == "." || *segment == ".." || *segment == "node_modules")
}

fn resolve_target(
    package_url: &str,
    target: &MapEntry,
    subpath: &str,
    pattern: bool,
    internal: bool,
    conditions: &FxHashSet<String>,
) -> Resolution {
    match &target.kind {
        MapEntryKind::Str(str_data) => {
            // Without a pattern, a leftover subpath requires the
            // target to be a directory reference
            if !pattern && !subpath.is_empty() && !str_data.ends_with('/') {
                return Resolution::new(
                    str_data.clone(),
                    ResolutionStatus::InvalidModuleSpecifier,
                    target.first_token,
                );
            }

            if !str_data.starts_with("./") {
                if internal && !str_data.starts_with("../") && !str_data.starts_with('/') {
                    // An "imports" target may be another bare
                    // specifier; the caller restarts resolution on it
                    let result = if pattern {
                        str_data.replace('*', subpath)
                    } else {
                        format!("{str_data}{subpath}")
                    };
                    tracing::debug!("the target {str_data:?} is a bare specifier, continuing with {result:?}");
                    return Resolution::new(
                        result,
                        ResolutionStatus::PackageResolve,
                        target.first_token,
                    );
                }
                tracing::debug!("the target {str_data:?} does not start with \"./\"");
                return Resolution::new(
                    str_data.clone(),
                    ResolutionStatus::InvalidPackageTarget,
                    target.first_token,
                );
            }

            if let Some(segment) = find_invalid_segment(str_data) {
                tracing::debug!("the target {str_data:?} contains invalid segment {segment:?}");
                return Resolution::new(
                    str_data.clone(),
                    ResolutionStatus::InvalidPackageTarget,
                    target.first_token,
                );
            }

            let resolved_target = paths::join(package_url, str_data);

            if let Some(segment) = find_invalid_segment(subpath) {
                tracing::debug!(subpath, segment, "subpath contains invalid segment");
                return Resolution::new(
                    subpath,
                    ResolutionStatus::InvalidModuleSpecifier,
                    target.first_token,
                );
            }

            let result = if pattern {
                resolved_target.replace('*', subpath)
            } else {
                paths::join(&resolved_target, subpath)
            };
            Resolution::new(result, ResolutionStatus::Exact, target.first_token)
        }

        MapEntryKind::Object(object) => {
            let mut last_matched: Option<&MapField> = None;

            for field in &object.fields {
                if field.key == "default" || conditions.contains(field.key.as_str()) {
                    tracing::debug!(key = %field.key, "condition applies");
                    let resolution = resolve_target(
                        package_url,
                        &field.value,
                        subpath,
                        pattern,
                        internal,
                        conditions,
                    );
                    if resolution.status.is_undefined() {
                        last_matched = Some(field);
                        continue;
                    }
                    return resolution;
                }
            }

            if !object.fields.is_empty() && !target.keys_start_with_dot() {
                // When a condition matched at this level but nothing
                // matched below, report the innermost unmatched
                // condition object for a less confusing message
                let mut report = target;
                if let Some(last) = last_matched {
                    if let MapEntryKind::Object(inner) = &last.value.kind {
                        if !inner.fields.is_empty() && !last.value.keys_start_with_dot() {
                            report = &last.value;
                        }
                    }
                }
                let unmatched_conditions = report
                    .as_object()
                    .map(|object| object.fields.iter().map(|field| field.key.clone()).collect())
                    .unwrap_or_default();
                return Resolution {
                    result: String::new(),
                    status: ResolutionStatus::UndefinedNoConditionsMatch,
                    debug: ResolutionDebug {
                        token: report.first_token,
                        unmatched_conditions,
                    },
                };
            }

            Resolution::new("", ResolutionStatus::Undefined, target.first_token)
        }

        MapEntryKind::Array(items) => {
            if items.is_empty() {
                return Resolution::new("", ResolutionStatus::Null, target.first_token);
            }

            let mut last_exception =
                Resolution::new("", ResolutionStatus::Undefined, target.first_token);

            for item in items {
                // Invalid targets and nulls are fallback points; any
                // other terminal outcome wins immediately
                let resolution =
                    resolve_target(package_url, item, subpath, pattern, internal, conditions);
                match resolution.status {
                    ResolutionStatus::InvalidPackageTarget | ResolutionStatus::Null => {
                        last_exception = resolution;
                    }
                    status if status.is_undefined() => {}
                    _ => return resolution,
                }
            }

            Resolution {
                result: String::new(),
                ..last_exception
            }
        }

        MapEntryKind::Null => Resolution::new("", ResolutionStatus::Null, target.first_token),

        MapEntryKind::Invalid => Resolution::new(
            "",
            ResolutionStatus::InvalidPackageTarget,
            target.first_token,
        ),
    }
}

/// Post-process an `Exact`/`Inexact` result: URL-decode it, reject
/// percent-encoded separators, and reject directory results.
#[must_use]
pub fn handle_post_conditions(resolution: Resolution) -> Resolution {
    if resolution.status != ResolutionStatus::Exact
        && resolution.status != ResolutionStatus::Inexact
    {
        return resolution;
    }

    let Some(decoded) = path_unescape(&resolution.result) else {
        tracing::debug!(result = %resolution.result, "path contains invalid URL escapes");
        return Resolution {
            status: ResolutionStatus::InvalidModuleSpecifier,
            ..resolution
        };
    };

    for banned in ["%2f", "%2F", "%5c", "%5C"] {
        if resolution.result.contains(banned) {
            tracing::debug!(result = %resolution.result, banned, "path contains an encoded separator");
            return Resolution {
                status: ResolutionStatus::InvalidModuleSpecifier,
                ..resolution
            };
        }
    }

    if decoded.ends_with('/') || decoded.ends_with('\\') {
        tracing::debug!(result = %resolution.result, "path is not allowed to end with a slash");
        return Resolution {
            status: ResolutionStatus::UnsupportedDirectoryImport,
            ..resolution
        };
    }

    Resolution {
        result: decoded,
        ..resolution
    }
}

/// Strict percent-decode: every `%` must begin a two-digit hex escape
/// and the decoded bytes must be valid UTF-8.
fn path_unescape(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_encoding::percent_decode_str(path)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonValue;
    use crate::map::parse_import_export_map;
    use serde_json::json;

    fn exports_map(value: serde_json::Value) -> MapEntry {
        let mut sink = Vec::new();
        parse_import_export_map(&JsonValue::from_serde(&value), &mut sink)
            .expect("map should parse")
            .root
    }

    fn conditions(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn resolve(
        value: serde_json::Value,
        subpath: &str,
        condition_names: &[&str],
    ) -> Resolution {
        let root = exports_map(value);
        handle_post_conditions(resolve_exports(
            "/",
            subpath,
            &root,
            &conditions(condition_names),
        ))
    }

    #[test]
    fn exact_subpath_export() {
        let resolution = resolve(json!({"./feature": "./src/feature.js"}), "./feature", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/src/feature.js");
    }

    #[test]
    fn string_root_export() {
        let resolution = resolve(json!("./dist/index.js"), ".", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/dist/index.js");
    }

    #[test]
    fn pattern_with_trailer_matches_and_substitutes() {
        let resolution = resolve(
            json!({"./feat/*.js": "./src/feat/*.js"}),
            "./feat/x.js",
            &[],
        );
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/src/feat/x.js");
    }

    #[test]
    fn trailing_star_pattern_takes_the_whole_tail() {
        let resolution = resolve(json!({"./lib/*": "./src/*"}), "./lib/a/b.js", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/src/a/b.js");
    }

    #[test]
    fn pattern_key_does_not_match_its_own_base() {
        let resolution = resolve(json!({"./lib/*": "./src/*"}), "./lib/", &[]);
        assert_eq!(resolution.status, ResolutionStatus::PackagePathNotExported);
    }

    #[test]
    fn prefix_key_downgrades_exact_to_inexact() {
        let resolution = resolve(json!({"./lib/": "./src/"}), "./lib/a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Inexact);
        assert_eq!(resolution.result, "/src/a");
    }

    #[test]
    fn longest_expansion_key_wins_regardless_of_source_order() {
        let value = json!({
            "./a/": "./shallow/",
            "./a/b/": "./deep/"
        });
        let resolution = resolve(value, "./a/b/c", &[]);
        assert_eq!(resolution.result, "/deep/c");

        let flipped = json!({
            "./a/b/": "./deep/",
            "./a/": "./shallow/"
        });
        let resolution = resolve(flipped, "./a/b/c", &[]);
        assert_eq!(resolution.result, "/deep/c");
    }

    #[test]
    fn conditions_picked_in_source_order() {
        let value = json!({".": {"import": "./esm/i.js", "require": "./cjs/i.js"}});
        let resolution = resolve(value.clone(), ".", &["require"]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/cjs/i.js");

        let resolution = resolve(value, ".", &["import", "require"]);
        assert_eq!(resolution.result, "/esm/i.js");
    }

    #[test]
    fn default_condition_always_applies() {
        let value = json!({".": {"worker": "./w.js", "default": "./d.js"}});
        let resolution = resolve(value, ".", &[]);
        assert_eq!(resolution.result, "/d.js");
    }

    #[test]
    fn unmatched_conditions_report_the_innermost_object() {
        let value = json!({".": {"node": {"require": "./n.js"}}});
        let resolution = resolve(value, ".", &["node", "import"]);
        assert_eq!(resolution.status, ResolutionStatus::UndefinedNoConditionsMatch);
        assert_eq!(resolution.debug.unmatched_conditions, ["require"]);
    }

    #[test]
    fn unmatched_conditions_at_the_top_level() {
        let value = json!({".": {"browser": "./b.js", "electron": "./e.js"}});
        let resolution = resolve(value, ".", &["node", "import"]);
        assert_eq!(resolution.status, ResolutionStatus::UndefinedNoConditionsMatch);
        assert_eq!(
            resolution.debug.unmatched_conditions,
            ["browser", "electron"]
        );
    }

    #[test]
    fn null_target_means_not_exported() {
        let resolution = resolve(json!({"./a": null}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::PackagePathNotExported);
    }

    #[test]
    fn missing_subpath_means_not_exported() {
        let resolution = resolve(json!({"./a": "./a.js"}), "./b", &[]);
        assert_eq!(resolution.status, ResolutionStatus::PackagePathNotExported);
    }

    #[test]
    fn array_falls_through_invalid_targets() {
        let resolution = resolve(json!({"./a": ["missing", "./b.js"]}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/b.js");
    }

    #[test]
    fn array_of_only_invalid_targets_keeps_the_last_exception() {
        let resolution = resolve(json!({"./a": ["missing", "also-bad"]}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidPackageTarget);
    }

    #[test]
    fn empty_array_is_null() {
        let resolution = resolve(json!({"./a": []}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::PackagePathNotExported);
    }

    #[test]
    fn invalid_map_is_invalid_package_configuration() {
        // Mixed subpath and condition keys turn the node invalid
        let mut sink = Vec::new();
        let map = parse_import_export_map(
            &JsonValue::from_serde(&json!({"./a": "./a.js", "import": "./b.js"})),
            &mut sink,
        )
        .unwrap();
        let resolution = resolve_exports("/", "./a", &map.root, &conditions(&[]));
        assert_eq!(
            resolution.status,
            ResolutionStatus::InvalidPackageConfiguration
        );
    }

    #[test]
    fn target_outside_package_is_invalid() {
        let resolution = resolve(json!({"./a": "../outside.js"}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidPackageTarget);
    }

    #[test]
    fn invalid_segments_in_target_and_subpath() {
        let resolution = resolve(json!({"./a": "./x/../y.js"}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidPackageTarget);

        let resolution = resolve(json!({"./a": "./x/node_modules/y.js"}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidPackageTarget);

        let resolution = resolve(json!({"./lib/*": "./src/*"}), "./lib/x/../secret", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidModuleSpecifier);
    }

    #[test]
    fn percent_encoded_separators_are_rejected() {
        for encoded in ["%2f", "%2F", "%5c", "%5C"] {
            let resolution = resolve(
                json!({"./a": format!("./b{encoded}c.js")}),
                "./a",
                &[],
            );
            assert_eq!(
                resolution.status,
                ResolutionStatus::InvalidModuleSpecifier,
                "expected rejection for {encoded}"
            );
        }
    }

    #[test]
    fn percent_escapes_are_decoded() {
        let resolution = resolve(json!({"./a": "./sp%20ace.js"}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/sp ace.js");
    }

    #[test]
    fn malformed_percent_escape_is_invalid() {
        let resolution = resolve(json!({"./a": "./bad%zz.js"}), "./a", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidModuleSpecifier);
    }

    #[test]
    fn trailing_slash_result_is_a_directory_import() {
        let resolution = resolve(json!({"./*": "./src/*"}), "./x/", &[]);
        assert_eq!(
            resolution.status,
            ResolutionStatus::UnsupportedDirectoryImport
        );
    }

    #[test]
    fn imports_bare_specifier_requests_package_resolve() {
        let mut sink = Vec::new();
        let map = parse_import_export_map(
            &JsonValue::from_serde(&json!({"#x": "pkg-y/sub"})),
            &mut sink,
        )
        .unwrap();
        let resolution = resolve_imports("#x", &map.root, &conditions(&[]));
        assert_eq!(resolution.status, ResolutionStatus::PackageResolve);
        assert_eq!(resolution.result, "pkg-y/sub");
    }

    #[test]
    fn imports_pattern_substitutes_into_bare_specifier() {
        let mut sink = Vec::new();
        let map = parse_import_export_map(
            &JsonValue::from_serde(&json!({"#deps/*": "pkg-y/lib/*"})),
            &mut sink,
        )
        .unwrap();
        let resolution = resolve_imports("#deps/tool", &map.root, &conditions(&[]));
        assert_eq!(resolution.status, ResolutionStatus::PackageResolve);
        assert_eq!(resolution.result, "pkg-y/lib/tool");
    }

    #[test]
    fn imports_unknown_specifier_is_not_defined() {
        let mut sink = Vec::new();
        let map = parse_import_export_map(
            &JsonValue::from_serde(&json!({"#x": "./x.js"})),
            &mut sink,
        )
        .unwrap();
        let resolution = resolve_imports("#missing", &map.root, &conditions(&[]));
        assert_eq!(resolution.status, ResolutionStatus::PackageImportNotDefined);
        assert_eq!(resolution.result, "#missing");
    }

    #[test]
    fn imports_non_object_is_invalid_configuration() {
        let mut sink = Vec::new();
        let map =
            parse_import_export_map(&JsonValue::from_serde(&json!("./x.js")), &mut sink).unwrap();
        let resolution = resolve_imports("#x", &map.root, &conditions(&[]));
        assert_eq!(
            resolution.status,
            ResolutionStatus::InvalidPackageConfiguration
        );
    }

    #[test]
    fn conditional_sugar_resolves_the_main_export() {
        let value = json!({"import": "./esm.js", "require": "./cjs.js"});
        let resolution = resolve(value, ".", &["require"]);
        assert_eq!(resolution.status, ResolutionStatus::Exact);
        assert_eq!(resolution.result, "/cjs.js");
    }

    #[test]
    fn subpath_leftover_requires_directory_target() {
        // A prefix-key leftover against a non-directory target fails
        let resolution = resolve(json!({"./lib/": "./file.js"}), "./lib/extra", &[]);
        assert_eq!(resolution.status, ResolutionStatus::InvalidModuleSpecifier);
    }
}
