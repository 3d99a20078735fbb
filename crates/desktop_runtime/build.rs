use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const MANIFEST_SCHEMA_VERSION: u32 = 1;
const MIN_DEFAULT_WIDTH: i32 = 200;
const MIN_DEFAULT_HEIGHT: i32 = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    fixed_size: bool,
    grow_only: bool,
    minimizable: bool,
    maximizable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    schema_version: u32,
    app_id: String,
    title: String,
    icon: String,
    disabled: bool,
    show_in_launcher: bool,
    show_on_desktop: bool,
    window_defaults: WindowDefaults,
}

fn manifest_paths(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", dir.display()));
    let mut paths = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect::<Vec<_>>();
    paths.sort();
    paths
}

fn is_valid_app_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('-')
        && !key.ends_with('-')
        && key
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

fn validate(path: &Path, manifest: &AppManifest) {
    if manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        panic!(
            "manifest schema mismatch in {}: expected {MANIFEST_SCHEMA_VERSION} found {}",
            path.display(),
            manifest.schema_version
        );
    }
    if !is_valid_app_key(&manifest.app_id) {
        panic!("invalid app_id `{}` in {}", manifest.app_id, path.display());
    }
    if manifest.title.trim().is_empty() {
        panic!("empty title in {}", path.display());
    }
    let defaults = &manifest.window_defaults;
    if defaults.width < MIN_DEFAULT_WIDTH || defaults.height < MIN_DEFAULT_HEIGHT {
        panic!(
            "window defaults in {} are smaller than {MIN_DEFAULT_WIDTH}x{MIN_DEFAULT_HEIGHT}",
            path.display()
        );
    }
    if defaults.fixed_size && defaults.grow_only {
        panic!(
            "{}: fixed_size and grow_only are mutually exclusive",
            path.display()
        );
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let manifest_dir = crate_root.join("manifests");
    println!("cargo:rerun-if-changed={}", manifest_dir.display());

    let mut manifests = Vec::<AppManifest>::new();
    let mut seen = BTreeSet::new();
    for path in manifest_paths(&manifest_dir) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: AppManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        validate(&path, &manifest);
        if !seen.insert(manifest.app_id.clone()) {
            panic!("duplicate app_id `{}` in {}", manifest.app_id, path.display());
        }
        manifests.push(manifest);
    }

    manifests.sort_by(|a, b| a.app_id.cmp(&b.app_id));
    let json = serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
