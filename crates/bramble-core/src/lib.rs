#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

pub mod browser;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exports;
pub mod glob;
pub mod json;
pub mod manifest;
pub mod map;
pub mod paths;
pub mod reverse;
pub mod source;
pub mod specifier;

pub use browser::{check_browser_map, BrowserPathKind, BrowserRemap, BrowserScope, DirInfo};
pub use config::{
    default_main_fields, Platform, ResolveOptions, DEFAULT_EXTENSION_ORDER,
    MAIN_FIELDS_FOR_FAILURE,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, Note, Severity};
pub use error::{Error, Result};
pub use exports::{
    handle_post_conditions, resolve_exports, resolve_imports, Resolution, ResolutionDebug,
    ResolutionStatus,
};
pub use json::{JsonKind, JsonMember, JsonValue};
pub use manifest::{MainField, ModuleType, PackageManifest, SideEffectsOrigin};
pub use map::{parse_import_export_map, ImportExportMap, MapEntry, MapEntryKind, MapField};
pub use paths::{PathOps, PosixPaths};
pub use reverse::reverse_resolve_exports;
pub use source::{Source, SourceRange};
pub use specifier::{is_package_path, parse_package_name, PackageSpecifier};
