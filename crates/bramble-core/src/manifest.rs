//! The manifest record and top-level `package.json` field reader.
//!
//! Parsing runs once per manifest; the record is immutable afterwards
//! and safe to share by reference across concurrent resolutions. Only
//! source ranges are retained from the JSON tree, so the tree can be
//! dropped after this pass.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{Platform, ResolveOptions, MAIN_FIELDS_FOR_FAILURE};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Note};
use crate::glob;
use crate::json::{JsonKind, JsonValue};
use crate::map::{parse_import_export_map, ImportExportMap, MapEntryKind};
use crate::paths::PathOps;
use crate::source::{Source, SourceRange};

/// Module format declared by the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleType {
    #[default]
    Unknown,
    CommonJs,
    Esm,
}

/// A recorded main-field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainField {
    /// Range of the field's key, for diagnostics.
    pub key_range: SourceRange,
    /// The field's value, relative to the package directory.
    pub rel_path: String,
}

/// Provenance of the `sideEffects` field, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideEffectsOrigin {
    /// True when the field was the array form rather than `false`.
    pub is_array_form: bool,
    pub range: SourceRange,
}

/// A parsed `package.json`.
#[derive(Debug, Clone, Default)]
pub struct PackageManifest {
    /// Source identity, kept for diagnostics.
    pub source: Source,

    /// The `type` field.
    pub module_type: ModuleType,

    /// Main-field entries found by scanning the configured order plus
    /// the diagnostics fallback sweep.
    pub main_fields: FxHashMap<String, MainField>,

    /// The object form of the `browser` field. A `None` value marks a
    /// disabled file. Only present when targeting the browser.
    pub browser_map: Option<FxHashMap<String, Option<String>>>,

    /// Absolute paths declared as having side effects. `Some` (even
    /// empty) flips tree shaking from "assume side effects" to
    /// "assume none unless listed".
    pub side_effects_map: Option<FxHashSet<String>>,

    /// Compiled side-effect patterns that contained a wildcard.
    pub side_effects_regexps: Vec<regex::Regex>,

    /// Where the `sideEffects` field came from.
    pub side_effects_origin: Option<SideEffectsOrigin>,

    /// The `imports` field.
    pub imports_map: Option<ImportExportMap>,

    /// The `exports` field.
    pub exports_map: Option<ImportExportMap>,
}

impl PackageManifest {
    /// Read the recognized top-level fields out of a parsed JSON tree.
    ///
    /// `package_dir` is the absolute directory containing the
    /// manifest; side-effect patterns are anchored to it. Structural
    /// problems are reported to `sink` as warnings and never abort
    /// the parse.
    #[must_use]
    pub fn parse(
        source: Source,
        json: &JsonValue,
        package_dir: &str,
        options: &ResolveOptions,
        paths: &dyn PathOps,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        let mut manifest = Self {
            source,
            ..Self::default()
        };

        // The "type" field
        if let Some(member) = json.property("type") {
            match member.value.as_str() {
                Some("commonjs") => manifest.module_type = ModuleType::CommonJs,
                Some("module") => manifest.module_type = ModuleType::Esm,
                Some(other) => sink.add(
                    Diagnostic::warning(
                        member.value.range,
                        format!("{other:?} is not a valid value for the \"type\" field"),
                    )
                    .with_note(Note::new(
                        "The \"type\" field must be set to either \"commonjs\" or \"module\".",
                    )),
                ),
                None => sink.add(Diagnostic::warning(
                    member.value.range,
                    "The value for \"type\" must be a string",
                )),
            }
        }

        // The main fields, in configured order, then a sweep over the
        // fixed fallback list used only for failure diagnostics
        for field in options.effective_main_fields() {
            record_main_field(&mut manifest, json, field);
        }
        for field in MAIN_FIELDS_FOR_FAILURE {
            if !manifest.main_fields.contains_key(*field) {
                record_main_field(&mut manifest, json, field);
            }
        }

        // The "browser" field, only when targeting the browser
        if let Some(member) = json.property("browser") {
            if options.platform == Platform::Browser {
                if let JsonKind::Object(entries) = &member.value.kind {
                    let mut browser_map: FxHashMap<String, Option<String>> = FxHashMap::default();

                    for entry in entries {
                        match &entry.value.kind {
                            JsonKind::Str(replacement) => {
                                // A string is a replacement module
                                browser_map.insert(entry.key.clone(), Some(replacement.clone()));
                            }
                            JsonKind::Bool(false) => {
                                // False means the file is disabled
                                browser_map.insert(entry.key.clone(), None);
                            }
                            JsonKind::Bool(true) => {}
                            _ => sink.add(Diagnostic::warning(
                                entry.value.range,
                                "Each \"browser\" mapping must be a string or a boolean",
                            )),
                        }
                    }

                    manifest.browser_map = Some(browser_map);
                }
            }
        }

        // The "sideEffects" field
        if let Some(member) = json.property("sideEffects") {
            match &member.value.kind {
                JsonKind::Bool(value) => {
                    if !*value {
                        // "sideEffects": false means no file in this
                        // package has side effects
                        manifest.side_effects_map = Some(FxHashSet::default());
                        manifest.side_effects_origin = Some(SideEffectsOrigin {
                            is_array_form: false,
                            range: member.value.range,
                        });
                    }
                }

                JsonKind::Array(items) => {
                    // Only the listed files have side effects
                    let mut side_effects_map = FxHashSet::default();
                    manifest.side_effects_origin = Some(SideEffectsOrigin {
                        is_array_form: true,
                        range: member.value.range,
                    });

                    for item in items {
                        let Some(pattern) = item.as_str() else {
                            sink.add(Diagnostic::warning(
                                item.range,
                                "Expected string in array for \"sideEffects\"",
                            ));
                            continue;
                        };

                        // A bare file name applies at any depth
                        let pattern = if pattern.contains('/') {
                            pattern.to_string()
                        } else {
                            format!("**/{pattern}")
                        };
                        let abs_pattern = paths.join(package_dir, &pattern);

                        match glob::compile(&abs_pattern) {
                            Ok((regex, true)) => manifest.side_effects_regexps.push(regex),
                            Ok((_, false)) => {
                                side_effects_map.insert(abs_pattern);
                            }
                            Err(_) => sink.add(Diagnostic::warning(
                                item.range,
                                format!("Invalid pattern {pattern:?} in \"sideEffects\""),
                            )),
                        }
                    }

                    manifest.side_effects_map = Some(side_effects_map);
                }

                _ => sink.add(Diagnostic::warning(
                    member.value.range,
                    "The value for \"sideEffects\" must be a boolean or an array",
                )),
            }
        }

        // The "imports" map
        if let Some(member) = json.property("imports") {
            if let Some(imports_map) = parse_import_export_map(&member.value, sink) {
                if !matches!(imports_map.root.kind, MapEntryKind::Object(_)) {
                    sink.add(Diagnostic::warning(
                        imports_map.root.first_token,
                        "The value for \"imports\" must be an object",
                    ));
                }
                manifest.imports_map = Some(imports_map);
            }
        }

        // The "exports" map
        if let Some(member) = json.property("exports") {
            manifest.exports_map = parse_import_export_map(&member.value, sink);
        }

        manifest
    }

    /// Whether the manifest declares `abs_path` as having side
    /// effects. `None` when there is no usable `sideEffects` field,
    /// meaning the caller should assume side effects.
    #[must_use]
    pub fn has_side_effects(&self, abs_path: &str) -> Option<bool> {
        let map = self.side_effects_map.as_ref()?;
        if map.contains(abs_path) {
            return Some(true);
        }
        if self
            .side_effects_regexps
            .iter()
            .any(|regex| regex.is_match(abs_path))
        {
            return Some(true);
        }
        Some(false)
    }
}

fn record_main_field(manifest: &mut PackageManifest, json: &JsonValue, field: &str) {
    if let Some(member) = json.property(field) {
        if let Some(value) = member.value.as_str() {
            if !value.is_empty() {
                manifest.main_fields.insert(
                    field.to_string(),
                    MainField {
                        key_range: member.key_range,
                        rel_path: value.to_string(),
                    },
                );
            }
        }
    }
}
