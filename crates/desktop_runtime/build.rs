use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CATALOG_SCHEMA_VERSION: u32 = 1;

const KNOWN_KINDS: [&str; 19] = [
    "contacts",
    "photos",
    "email",
    "audio",
    "camera",
    "health",
    "wallet",
    "businesses",
    "classic",
    "ai",
    "models",
    "backup",
    "sync",
    "help",
    "settings",
    "notifications",
    "admin-organizations",
    "admin-groups",
    "admin-sessions",
];

fn default_true() -> bool {
    true
}

fn default_max_percent() -> u8 {
    90
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    windows: Vec<WindowEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct WindowEntry {
    kind: String,
    title: String,
    #[serde(default)]
    needs_database: bool,
    #[serde(default)]
    needs_auth: bool,
    #[serde(default)]
    single_instance: bool,
    #[serde(default = "default_true")]
    show_in_launcher: bool,
    #[serde(default)]
    supports_view_modes: bool,
    #[serde(default)]
    supports_sorting: bool,
    default_size: [i32; 2],
    min_size: [i32; 2],
    #[serde(default = "default_max_percent")]
    max_width_percent: u8,
    #[serde(default = "default_max_percent")]
    max_height_percent: u8,
}

#[derive(Debug, Clone, Serialize)]
struct GeneratedDescriptor {
    kind: String,
    title: String,
    capabilities: GeneratedCapabilities,
    single_instance: bool,
    show_in_launcher: bool,
    supports_view_modes: bool,
    supports_sorting: bool,
    constraints: GeneratedConstraints,
}

#[derive(Debug, Clone, Serialize)]
struct GeneratedCapabilities {
    needs_database: bool,
    needs_auth: bool,
}

#[derive(Debug, Clone, Serialize)]
struct GeneratedConstraints {
    default_width: i32,
    default_height: i32,
    min_width: i32,
    min_height: i32,
    max_width_percent: u8,
    max_height_percent: u8,
}

fn validate(path: &str, catalog: &CatalogFile) {
    if catalog.schema_version != CATALOG_SCHEMA_VERSION {
        panic!(
            "catalog schema mismatch in {path}: expected {CATALOG_SCHEMA_VERSION} found {}",
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for entry in &catalog.windows {
        if !KNOWN_KINDS.contains(&entry.kind.as_str()) {
            panic!("unknown window kind `{}` in {path}", entry.kind);
        }
        if !seen.insert(entry.kind.clone()) {
            panic!("duplicate window kind `{}` in {path}", entry.kind);
        }
        if entry.title.trim().is_empty() {
            panic!("window kind `{}` has an empty title in {path}", entry.kind);
        }
        let [default_w, default_h] = entry.default_size;
        let [min_w, min_h] = entry.min_size;
        if min_w <= 0 || min_h <= 0 || min_w > default_w || min_h > default_h {
            panic!(
                "window kind `{}` in {path}: min_size {:?} must be positive and within default_size {:?}",
                entry.kind, entry.min_size, entry.default_size
            );
        }
        for percent in [entry.max_width_percent, entry.max_height_percent] {
            if percent == 0 || percent > 100 {
                panic!(
                    "window kind `{}` in {path}: max percent {percent} outside 1..=100",
                    entry.kind
                );
            }
        }
    }

    for kind in KNOWN_KINDS {
        if !seen.contains(kind) {
            panic!("window kind `{kind}` missing from {path}");
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("feature_windows.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: CatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&path.display().to_string(), &catalog);

    let descriptors: Vec<GeneratedDescriptor> = catalog
        .windows
        .into_iter()
        .map(|entry| GeneratedDescriptor {
            kind: entry.kind,
            title: entry.title,
            capabilities: GeneratedCapabilities {
                needs_database: entry.needs_database,
                needs_auth: entry.needs_auth,
            },
            single_instance: entry.single_instance,
            show_in_launcher: entry.show_in_launcher,
            supports_view_modes: entry.supports_view_modes,
            supports_sorting: entry.supports_sorting,
            constraints: GeneratedConstraints {
                default_width: entry.default_size[0],
                default_height: entry.default_size[1],
                min_width: entry.min_size[0],
                min_height: entry.min_size[1],
                max_width_percent: entry.max_width_percent,
                max_height_percent: entry.max_height_percent,
            },
        })
        .collect();

    let json = serde_json::to_string_pretty(&descriptors).expect("serialize feature catalog");
    let generated = format!(
        "/// Build-time generated feature window catalog JSON.\n\
pub const FEATURE_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("feature_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
