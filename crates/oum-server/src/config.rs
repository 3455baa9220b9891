use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use oum_store::FileStore;
use oum_types::MapConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Tile provider token for the drawing page.
pub const ENV_MAP_TOKEN: &str = "MAPBOX_TOKEN";
/// Overrides [`ServerConfig::data_path`].
pub const ENV_DATA_PATH: &str = "OUM_DATA_PATH";
/// Overrides [`ServerConfig::bind_addr`].
pub const ENV_BIND: &str = "OUM_BIND";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Location of the feature store file.
    pub data_path: PathBuf,
    /// Settings handed to the drawing page.
    pub map: MapConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            data_path: PathBuf::from(FileStore::DEFAULT_PATH),
            map: MapConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file missing; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> ServerResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ServerResult<()> {
        if let Some(token) = lookup(ENV_MAP_TOKEN) {
            self.map.api_token = token;
        }
        if let Some(path) = lookup(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_BIND}={bind}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.data_path, PathBuf::from("data/store.json"));
        assert_eq!(c.map, MapConfig::default());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"

            [map]
            drawZoomMin = 12
            bounds = [76.0, 42.5, 78.0, 44.0]
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.data_path, PathBuf::from("data/store.json"));
        assert_eq!(c.map.draw_zoom_min, 12);
        assert_eq!(c.map.draw_zoom_max, 20);
        assert_eq!(c.map.bounds.east, 78.0);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 5").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = ServerConfig::load(&dir.path().join("oum.toml")).unwrap();
        assert_eq!(c, ServerConfig::default());
    }

    #[test]
    fn env_vars_override() {
        let vars: HashMap<&str, &str> = [
            (ENV_MAP_TOKEN, "pk.secret"),
            (ENV_DATA_PATH, "/var/lib/oum/store.json"),
            (ENV_BIND, "0.0.0.0:9000"),
        ]
        .into_iter()
        .collect();
        let mut c = ServerConfig::default();
        c.apply_vars(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.map.api_token, "pk.secret");
        assert_eq!(c.data_path, PathBuf::from("/var/lib/oum/store.json"));
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn invalid_bind_env_is_rejected() {
        let mut c = ServerConfig::default();
        let err = c
            .apply_vars(|k| (k == ENV_BIND).then(|| "not-an-addr".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_BIND));
    }
}
