use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub endpoint: EndpointSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EndpointSettings {
    /// Base path of the aggregate endpoint, without query string.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    #[serde(default)]
    pub charts: Vec<ChartBindingConfig>,
    /// Filter values submitted at startup. May contain empty strings; those
    /// fields stay unfiltered.
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartBindingConfig {
    /// Id of the chart element this binding redraws.
    pub target: String,
    /// Zero-based metric column the chart plots.
    pub metric: usize,
}

pub fn load_endpoint_config() -> anyhow::Result<EndpointConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/endpoint"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_charts_config() -> anyhow::Result<ChartsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/charts"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
