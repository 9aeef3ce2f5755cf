use color_eyre::eyre::{WrapErr, eyre};
use cube_core::{AxisDirection, Color, CubeMap, DEFAULT_DURATION_MS, FaceletId, FaceletLedger};
use cube_solver::SolverConfig;
use log::debug;
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

/// Contents of the optional configuration file.
///
/// ```toml
/// [solver]
/// strategy = "staged"
/// max_expansions = 200000
///
/// [animation]
/// duration_ms = 250
///
/// [colors]
/// "Y+" = "purple"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub solver: SolverConfig,
    pub animation: AnimationConfig,
    pub colors: BTreeMap<AxisDirection, Color>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub duration_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(AppConfig::default());
        };
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let config = AppConfig::parse(&text)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn parse(text: &str) -> color_eyre::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Paints the configured colors over the default scheme and relinks
    /// the solved cube from them.
    pub fn apply_scheme(&self, ledger: &mut FaceletLedger) -> color_eyre::Result<()> {
        if self.colors.is_empty() {
            return Ok(());
        }

        let mut painted = CubeMap::new();
        for (&face, &color) in &self.colors {
            if face == AxisDirection::Center {
                return Err(eyre!("The center has no stickers to color"));
            }
            for id in FaceletId::on_face(face) {
                painted.insert(face, id.position(), color);
            }
        }
        ledger.set_colors(&painted);
        ledger
            .infer_links()
            .wrap_err("The configured colors do not describe a cube")
    }
}
