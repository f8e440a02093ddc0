//! Input, output and dispatcher setup shared by the demo jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use fox::{Fox, Row};
use fox_configuration::ConfigFox;
use fox_reqwest::ReqwestUpstream;

/// A dispatcher wired from a configuration file, plus its courtesy delay.
pub struct Job {
    /// Dispatcher with the configured store attached and defaults applied.
    pub fox: Fox<ReqwestUpstream>,
    /// Pause before live calls, if any.
    pub courtesy_delay: Option<std::time::Duration>,
}

/// Loads `config_path` and builds the dispatcher it describes.
pub fn open(config_path: &Path) -> anyhow::Result<Job> {
    let config = ConfigFox::from_path(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let courtesy_delay = config.courtesy_delay();
    let defaults = config.request_defaults();

    let upstream = ReqwestUpstream::builder().timeout(config.timeout).build()?;
    let mut fox = Fox::new(upstream);
    if let Some(cache) = config.into_backend()? {
        fox.attach_cache(cache);
    }
    fox.configure(defaults);

    Ok(Job {
        fox,
        courtesy_delay,
    })
}

/// Reads a JSON array of row objects and adds any missing `columns`.
pub fn read_rows(path: &Path, columns: &[&str]) -> anyhow::Result<Vec<Row>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut rows: Vec<Row> = serde_json::from_str(&text)?;
    for row in &mut rows {
        row.reindex(columns.iter().copied());
    }
    Ok(rows)
}

/// Writes `rows` to `outputs/<timestamp>_output.json` and returns the path.
pub fn write_rows(rows: &[Row]) -> anyhow::Result<PathBuf> {
    let outdir = PathBuf::from("outputs");
    std::fs::create_dir_all(&outdir)?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let output = outdir.join(format!("{timestamp}_output.json"));
    std::fs::write(&output, serde_json::to_string_pretty(rows)?)?;
    Ok(output)
}
