//! The object form of the `browser` field.
//!
//! Lets a package redirect files or whole package names when the
//! target platform is the browser, or disable them outright. The
//! probe order emulates the established bundler behavior around
//! missing extensions: an entry without an extension only matches
//! queries without one, while an entry with an extension also matches
//! the extensionless query through the implicit-extension probe.

use rustc_hash::FxHashMap;

use crate::config::{Platform, ResolveOptions};
use crate::manifest::PackageManifest;
use crate::paths::{self, PathOps};
use crate::specifier::is_package_path;

/// How the input path should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserPathKind {
    /// An absolute filesystem path inside the package.
    Absolute,
    /// A package-shaped specifier.
    Package,
}

/// Outcome of a browser-map hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserRemap {
    /// The input is replaced by this path or package.
    Replace(String),
    /// The input is disabled and should load as an empty module.
    Disabled,
}

/// The enclosing manifest whose `browser` map is in scope, as located
/// by the outer resolver's directory walk.
#[derive(Debug, Clone, Copy)]
pub struct BrowserScope<'a> {
    /// The manifest carrying the `browser` map.
    pub manifest: &'a PackageManifest,
    /// Absolute directory containing that manifest.
    pub abs_dir: &'a str,
    /// False when a `node_modules` directory sits between the resolve
    /// directory and `abs_dir`.
    pub in_same_package: bool,
}

/// Directory context for a browser-map check.
#[derive(Debug, Clone, Copy)]
pub struct DirInfo<'a> {
    /// Absolute path of the directory the resolution runs in.
    pub abs_path: &'a str,
    pub enclosing_browser_scope: Option<BrowserScope<'a>>,
}

/// Decide whether `input_path` is remapped or disabled by the
/// enclosing `browser` map. Returns `None` when no entry applies.
#[must_use]
pub fn check_browser_map(
    options: &ResolveOptions,
    dir: &DirInfo<'_>,
    input_path: &str,
    kind: BrowserPathKind,
    paths: &dyn PathOps,
) -> Option<BrowserRemap> {
    // This only applies when the current platform is the browser
    if options.platform != Platform::Browser {
        return None;
    }

    let Some(scope) = &dir.enclosing_browser_scope else {
        tracing::debug!(dir = %dir.abs_path, "no \"browser\" map in scope");
        return None;
    };
    let browser_map = scope.manifest.browser_map.as_ref()?;

    // Turn absolute paths into paths relative to the map's location
    let input = match kind {
        BrowserPathKind::Absolute => {
            let rel = paths.relative(scope.abs_dir, input_path)?;
            rel.replace('\\', "/")
        }
        BrowserPathKind::Package => input_path.to_string(),
    };

    if input == "." {
        // No bundler supports remapping ".", so we don't either
        return None;
    }

    // First try the import path as a package path
    let mut remapped = probe(browser_map, &options.extension_order, &input);

    let relative_retry;
    if remapped.is_none() && is_package_path(&input) {
        // If a package path didn't work, try it as a relative path
        relative_retry = format!("./{input}");
        match kind {
            BrowserPathKind::Absolute => {
                remapped = probe(browser_map, &options.extension_order, &relative_retry);
            }
            BrowserPathKind::Package => {
                // A map entry of "./pkg" may override the package path
                // "pkg", but only within the same package: an entry in
                // a parent package cannot override a child package
                if scope.in_same_package {
                    remapped = probe(browser_map, &options.extension_order, &relative_retry);
                }
            }
        }
    }

    match remapped {
        Some(Some(replacement)) => Some(BrowserRemap::Replace(replacement.clone())),
        Some(None) => Some(BrowserRemap::Disabled),
        None => None,
    }
}

/// Run the probe sequence for one spelling of the input path: exact
/// key, implicit extensions, the `/index` directory form, and that
/// form's implicit extensions.
fn probe<'m>(
    browser_map: &'m FxHashMap<String, Option<String>>,
    extension_order: &[String],
    path_to_check: &str,
) -> Option<&'m Option<String>> {
    tracing::debug!(path = path_to_check, "checking the \"browser\" map");

    // Check for equality
    if let Some(remapped) = browser_map.get(path_to_check) {
        return Some(remapped);
    }

    // If that failed, try adding implicit extensions
    for ext in extension_order {
        if let Some(remapped) = browser_map.get(&format!("{path_to_check}{ext}")) {
            return Some(remapped);
        }
    }

    // If that failed, assume this is a directory and look for an
    // "index" file
    let mut index_path = paths::join(path_to_check, "index");
    if is_package_path(&index_path) && !is_package_path(path_to_check) {
        index_path = format!("./{index_path}");
    }

    if let Some(remapped) = browser_map.get(&index_path) {
        return Some(remapped);
    }

    for ext in extension_order {
        if let Some(remapped) = browser_map.get(&format!("{index_path}{ext}")) {
            return Some(remapped);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::JsonValue;
    use crate::paths::PosixPaths;
    use crate::source::Source;
    use serde_json::json;

    fn browser_manifest(browser: serde_json::Value) -> PackageManifest {
        let mut sink = Vec::new();
        let options = ResolveOptions::default().with_platform(Platform::Browser);
        PackageManifest::parse(
            Source::new("/pkg/package.json", ""),
            &JsonValue::from_serde(&json!({ "browser": browser })),
            "/pkg",
            &options,
            &PosixPaths,
            &mut sink,
        )
    }

    fn check(
        manifest: &PackageManifest,
        input: &str,
        kind: BrowserPathKind,
        in_same_package: bool,
    ) -> Option<BrowserRemap> {
        let options = ResolveOptions::default().with_platform(Platform::Browser);
        let dir = DirInfo {
            abs_path: "/pkg/src",
            enclosing_browser_scope: Some(BrowserScope {
                manifest,
                abs_dir: "/pkg",
                in_same_package,
            }),
        };
        check_browser_map(&options, &dir, input, kind, &PosixPaths)
    }

    #[test]
    fn requires_browser_platform() {
        let manifest = browser_manifest(json!({"./a.js": "./b.js"}));
        let options = ResolveOptions::default();
        let dir = DirInfo {
            abs_path: "/pkg",
            enclosing_browser_scope: Some(BrowserScope {
                manifest: &manifest,
                abs_dir: "/pkg",
                in_same_package: true,
            }),
        };
        assert!(check_browser_map(&options, &dir, "./a.js", BrowserPathKind::Package, &PosixPaths).is_none());
    }

    #[test]
    fn entry_without_extension_only_matches_without_extension() {
        let manifest = browser_manifest(json!({"./no-ext": "./no-ext-browser.js"}));

        assert_eq!(
            check(&manifest, "./no-ext", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./no-ext-browser.js".to_string()))
        );
        assert_eq!(
            check(&manifest, "./no-ext.js", BrowserPathKind::Package, true),
            None
        );
    }

    #[test]
    fn entry_with_extension_also_matches_without() {
        let manifest = browser_manifest(json!({"./ext.js": "./ext-browser.js"}));

        assert_eq!(
            check(&manifest, "./ext.js", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./ext-browser.js".to_string()))
        );
        assert_eq!(
            check(&manifest, "./ext", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./ext-browser.js".to_string()))
        );
    }

    #[test]
    fn dot_never_matches() {
        let manifest = browser_manifest(json!({".": "./never.js"}));
        assert_eq!(check(&manifest, ".", BrowserPathKind::Package, true), None);
    }

    #[test]
    fn false_disables_a_module() {
        let manifest = browser_manifest(json!({"fs": false}));
        assert_eq!(
            check(&manifest, "fs", BrowserPathKind::Package, true),
            Some(BrowserRemap::Disabled)
        );
    }

    #[test]
    fn absolute_paths_are_relativized_against_the_scope() {
        let manifest = browser_manifest(json!({"./foo.js": "./foo-browser.js"}));
        assert_eq!(
            check(&manifest, "/pkg/foo.js", BrowserPathKind::Absolute, true),
            Some(BrowserRemap::Replace("./foo-browser.js".to_string()))
        );
    }

    #[test]
    fn package_override_needs_the_same_package() {
        let manifest = browser_manifest(json!({"./pkg-b": "./shim.js"}));

        assert_eq!(
            check(&manifest, "pkg-b", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./shim.js".to_string()))
        );
        assert_eq!(
            check(&manifest, "pkg-b", BrowserPathKind::Package, false),
            None
        );
    }

    #[test]
    fn directory_probe_finds_index_entries() {
        let manifest = browser_manifest(json!({"./lib/index.js": "./lib-browser.js"}));
        assert_eq!(
            check(&manifest, "./lib", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./lib-browser.js".to_string()))
        );
    }

    #[test]
    fn package_name_remap_hits_directly() {
        let manifest = browser_manifest(json!({"util": "./util-shim.js"}));
        assert_eq!(
            check(&manifest, "util", BrowserPathKind::Package, true),
            Some(BrowserRemap::Replace("./util-shim.js".to_string()))
        );
    }
}
