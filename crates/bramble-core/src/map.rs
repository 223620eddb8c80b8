//! The `imports`/`exports` map entry tree.
//!
//! A map is an acyclic tree of five node shapes. Object nodes keep
//! their members in source order because the resolution algorithm is
//! order-sensitive; the expansion keys (keys eligible for prefix or
//! pattern matching) are precomputed per object and sorted by key
//! length descending, stably, which is the only order consulted
//! during expansion matching.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Note};
use crate::json::{JsonKind, JsonValue};
use crate::source::SourceRange;

/// A parsed `imports` or `exports` field.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportExportMap {
    pub root: MapEntry,
}

/// One node of the map entry tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub kind: MapEntryKind,
    /// Range of the node's first token, for diagnostics.
    pub first_token: SourceRange,
}

/// The five shapes a map node can take.
///
/// `Invalid` is distinct from `Null`: a `null` value is an explicit
/// disable, while `Invalid` marks a structural violation that turns
/// into an invalid-package-configuration status when read.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEntryKind {
    Null,
    Str(String),
    Array(Vec<MapEntry>),
    Object(MapObject),
    Invalid,
}

/// An ordered object node.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    /// Members in source order, duplicates preserved.
    pub fields: Vec<MapField>,
    /// Indices into `fields` of the keys ending in `/` or containing
    /// `*`, sorted by key length descending (stable).
    pub expansion_keys: Vec<usize>,
}

impl MapObject {
    /// Expansion-key fields in match order.
    pub fn expansion_fields(&self) -> impl Iterator<Item = &MapField> {
        self.expansion_keys.iter().map(|&index| &self.fields[index])
    }
}

/// A single `key: value` member of an object node.
#[derive(Debug, Clone, PartialEq)]
pub struct MapField {
    pub key: String,
    pub key_range: SourceRange,
    pub value: MapEntry,
}

impl MapEntry {
    /// Look up an object member by exact key with a linear scan.
    /// Manifests are small enough that no index pays for itself.
    #[must_use]
    pub fn value_for_key(&self, key: &str) -> Option<&MapEntry> {
        match &self.kind {
            MapEntryKind::Object(object) => object
                .fields
                .iter()
                .find(|field| field.key == key)
                .map(|field| &field.value),
            _ => None,
        }
    }

    /// Whether this is an object node in subpath form (first key
    /// starts with `.`). Condition-form objects return false.
    #[must_use]
    pub fn keys_start_with_dot(&self) -> bool {
        match &self.kind {
            MapEntryKind::Object(object) => object
                .fields
                .first()
                .is_some_and(|field| field.key.starts_with('.')),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&MapObject> {
        match &self.kind {
            MapEntryKind::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Whether a key participates in prefix or pattern expansion.
fn is_expansion_key(key: &str) -> bool {
    key.ends_with('/') || key.contains('*')
}

/// Parse the JSON value of an `imports` or `exports` field.
///
/// Structural violations are reported to `sink` and produce `Invalid`
/// nodes rather than aborting. A top-level `null` means the field is
/// treated as absent.
#[must_use]
pub fn parse_import_export_map(
    json: &JsonValue,
    sink: &mut dyn DiagnosticSink,
) -> Option<ImportExportMap> {
    let root = visit(json, sink);

    if matches!(root.kind, MapEntryKind::Null) {
        return None;
    }

    Some(ImportExportMap { root })
}

fn visit(json: &JsonValue, sink: &mut dyn DiagnosticSink) -> MapEntry {
    match &json.kind {
        JsonKind::Null => MapEntry {
            kind: MapEntryKind::Null,
            first_token: json.range,
        },

        JsonKind::Str(value) => MapEntry {
            kind: MapEntryKind::Str(value.clone()),
            first_token: json.range,
        },

        JsonKind::Array(items) => MapEntry {
            kind: MapEntryKind::Array(items.iter().map(|item| visit(item, sink)).collect()),
            first_token: json.range,
        },

        JsonKind::Object(members) => {
            let mut fields: Vec<MapField> = Vec::with_capacity(members.len());
            let mut is_conditional_sugar = false;

            for (i, member) in members.iter().enumerate() {
                // An object cannot mix subpath keys with condition keys
                let cur_is_conditional_sugar = !member.key.starts_with('.');
                if i == 0 {
                    is_conditional_sugar = cur_is_conditional_sugar;
                } else if is_conditional_sugar != cur_is_conditional_sugar {
                    let prev = &fields[i - 1];
                    sink.add(
                        Diagnostic::warning(
                            member.key_range,
                            "This object cannot contain keys that both start with \".\" and don't start with \".\"",
                        )
                        .with_note(
                            Note::new(format!(
                                "The key {:?} is incompatible with the previous key {:?}:",
                                member.key, prev.key
                            ))
                            .with_range(prev.key_range),
                        ),
                    );
                    return MapEntry {
                        kind: MapEntryKind::Invalid,
                        first_token: json.range,
                    };
                }

                fields.push(MapField {
                    key: member.key.clone(),
                    key_range: member.key_range,
                    value: visit(&member.value, sink),
                });
            }

            let mut expansion_keys: Vec<usize> = (0..fields.len())
                .filter(|&index| is_expansion_key(&fields[index].key))
                .collect();
            // Stable, so equal-length keys keep their source order
            expansion_keys.sort_by(|&a, &b| fields[b].key.len().cmp(&fields[a].key.len()));

            MapEntry {
                kind: MapEntryKind::Object(MapObject {
                    fields,
                    expansion_keys,
                }),
                first_token: json.range,
            }
        }

        JsonKind::Bool(_) | JsonKind::Number(_) => {
            sink.add(Diagnostic::warning(
                json.range,
                "This value must be a string, an object, an array, or null",
            ));
            MapEntry {
                kind: MapEntryKind::Invalid,
                first_token: json.range,
            }
        }
    }
}
