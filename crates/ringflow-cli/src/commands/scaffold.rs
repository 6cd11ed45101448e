use std::path::Path;

use anyhow::bail;

use ringflow_core::ScenarioConfig;

/// Write the default scenario to `path`.
pub fn scaffold(path: &Path, seed: Option<u64>, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }

    let scenario = ScenarioConfig {
        seed,
        ..ScenarioConfig::default()
    };
    std::fs::write(path, scenario.to_toml_string()?)?;
    println!("✓ Generated {}", path.display());

    Ok(())
}
