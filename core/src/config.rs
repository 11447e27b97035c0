use crate::{
    dataset::CollectionSizes,
    error::{ConsoleError, ConsoleResult},
    export::CsvMode,
    types::{Pixels, Timestamp},
};
use serde::{Deserialize, Serialize};

/// Geometry shared by every virtualized table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Estimated height of one row, in pixels.
    pub row_height: Pixels,
    /// Height of the scroll container, in pixels.
    pub viewport_height: Pixels,
    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height:      60.0,
            viewport_height: 600.0,
            overscan:        10,
        }
    }
}

/// Everything a session needs, constructed once at startup and passed
/// explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Seed for every generated collection.
    pub seed:       u64,
    pub sizes:      CollectionSizes,
    pub table:      TableConfig,
    pub csv_mode:   CsvMode,
    /// Actor recorded on bulk-action reports.
    pub operator:   String,
    /// Pin the session clock here; None means the live wall clock.
    pub started_at: Option<Timestamp>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            seed:       42,
            sizes:      CollectionSizes::default(),
            table:      TableConfig::default(),
            csv_mode:   CsvMode::Raw,
            operator:   "analyst1@ff.com".to_string(),
            started_at: None,
        }
    }
}

impl ConsoleConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ConsoleConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        let t = &self.table;
        if !(t.row_height.is_finite() && t.row_height > 0.0) {
            return Err(ConsoleError::InvalidConfig {
                reason: format!("table.row_height must be > 0, got {}", t.row_height),
            });
        }
        if !(t.viewport_height.is_finite() && t.viewport_height >= 0.0) {
            return Err(ConsoleError::InvalidConfig {
                reason: format!("table.viewport_height must be >= 0, got {}", t.viewport_height),
            });
        }
        if self.operator.trim().is_empty() {
            return Err(ConsoleError::InvalidConfig {
                reason: "operator must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Small, fully deterministic config for unit tests.
    pub fn default_test() -> Self {
        use chrono::TimeZone;
        Self {
            seed: 0xC0FF_EE00,
            sizes: CollectionSizes {
                transactions:   400,
                kyc_profiles:   60,
                investigations: 20,
                audit_logs:     120,
            },
            started_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_takes_defaults() {
        let cfg: ConsoleConfig =
            serde_json::from_str(r#"{ "seed": 7, "table": { "overscan": 3 } }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.table.overscan, 3);
        assert_eq!(cfg.table.row_height, 60.0);
        assert_eq!(cfg.sizes.transactions, 10_000);
        assert_eq!(cfg.csv_mode, CsvMode::Raw);
    }

    #[test]
    fn partial_sizes_load_from_file() {
        let path = std::env::temp_dir().join(format!("console-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "sizes": { "transactions": 100 } }"#).unwrap();
        let cfg = ConsoleConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.sizes.transactions, 100);
        assert_eq!(cfg.sizes.kyc_profiles, 500);
        assert_eq!(cfg.sizes.audit_logs, 1_000);
    }

    #[test]
    fn zero_row_height_fails_validation() {
        let mut cfg = ConsoleConfig::default_test();
        cfg.table.row_height = 0.0;
        assert!(matches!(cfg.validate(), Err(ConsoleError::InvalidConfig { .. })));
    }
}
