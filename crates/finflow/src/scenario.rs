use std::path::Path;

use color_eyre::eyre::WrapErr;
use finflow_core::ScenarioConfig;

/// Load a scenario document from a YAML file.
pub fn load_scenario(path: &Path) -> color_eyre::Result<ScenarioConfig> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read scenario file {}", path.display()))?;
    let scenario: ScenarioConfig = serde_saphyr::from_str(&content)
        .wrap_err_with(|| format!("failed to parse scenario file {}", path.display()))?;
    Ok(scenario)
}
