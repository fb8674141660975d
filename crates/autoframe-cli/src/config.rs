use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use autoframe::{LayoutOptions, Snapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Layout options read from `--config`. Unset keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub collect_diagnostics: Option<bool>,
    pub snap_to_pixels: Option<bool>,
    pub viewport_height: Option<f64>,
}

impl ConfigFile {
    pub fn apply(&self, mut options: LayoutOptions) -> LayoutOptions {
        if let Some(enabled) = self.collect_diagnostics {
            options = options.with_diagnostics(enabled);
        }
        if let Some(enabled) = self.snap_to_pixels {
            options = options.with_pixel_snapping(enabled);
        }
        if let Some(height) = self.viewport_height {
            options = options.with_viewport_height(height);
        }
        options
    }
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let config = read_structured(path).context("invalid configuration file")?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let snapshot: Snapshot = read_structured(path).context("invalid snapshot")?;
    log::info!(
        "loaded snapshot {} ({} nodes, {} breakpoints, {} overrides)",
        path.display(),
        snapshot.nodes.len(),
        snapshot.breakpoints.len(),
        snapshot.overrides.len()
    );
    Ok(snapshot)
}

/// Parse a `.json` or `.toml` file, picked by extension.
fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON in {}", path.display())),
        Some("toml") => {
            toml::from_str(&content).with_context(|| format!("parsing TOML in {}", path.display()))
        }
        _ => bail!("{} must be a .json or .toml file", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoframe::{NodeId, Rect};

    #[test]
    fn test_config_overrides_only_set_keys() {
        let config: ConfigFile = toml::from_str("collect_diagnostics = true\n").unwrap();
        let options = config.apply(LayoutOptions::default());
        assert!(options.collect_diagnostics);
        assert!(options.snap_to_pixels);
        assert_eq!(options.viewport_height, None);

        let config: ConfigFile =
            serde_json::from_str(r#"{ "snap_to_pixels": false, "viewport_height": 720 }"#).unwrap();
        let options = config.apply(LayoutOptions::default());
        assert!(!options.snap_to_pixels);
        assert_eq!(options.viewport_height, Some(720.0));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        assert!(toml::from_str::<ConfigFile>("snap = true\n").is_err());
    }

    #[test]
    fn test_demo_snapshot_resolves() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/responsive.json");
        let input = load_snapshot(&path).unwrap().into_input().unwrap();

        let desktop = input.resolve(1024.0).unwrap();
        let active = desktop.active_breakpoint.as_ref().map(|id| id.to_string());
        assert_eq!(active.as_deref(), Some("desktop"));
        assert_eq!(desktop.get("content"), Some(Rect::new(256.0, 0.0, 600.0, 300.0)));
        assert_eq!(desktop.get("badge"), Some(Rect::new(8.0, 8.0, 64.0, 20.0)));
        assert_eq!(desktop.get("promo"), Some(Rect::new(864.0, 0.0, 160.0, 120.0)));

        let mobile = input.resolve(500.0).unwrap();
        assert_eq!(mobile.hidden, vec![NodeId::from("sidebar")]);
        assert_eq!(mobile.get("content"), Some(Rect::new(0.0, 0.0, 500.0, 240.0)));
        assert_eq!(mobile.get("badge"), Some(Rect::new(8.0, 8.0, 64.0, 20.0)));
        assert_eq!(mobile.get("promo"), Some(Rect::new(0.0, 248.0, 160.0, 120.0)));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_structured::<ConfigFile>(Path::new("missing/layout.toml")).unwrap_err();
        assert!(err.to_string().contains("missing/layout.toml"));
    }
}
