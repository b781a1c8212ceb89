use config::Config;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    location: Location,
    elevation: Elevation,
    geocoding: Geocoding,
    analysis: Analysis,
    map: Map,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn elevation(&self) -> &Elevation {
        &self.elevation
    }

    pub fn geocoding(&self) -> &Geocoding {
        &self.geocoding
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn map(&self) -> &Map {
        &self.map
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    store_buffer_size: usize,
    #[serde(with = "humantime_serde")]
    http_timeout: Duration,
}

impl Core {
    pub fn store_buffer_size(&self) -> usize {
        self.store_buffer_size
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Location {
    gpsd_address: String,
    high_accuracy: bool,
    #[serde(with = "humantime_serde")]
    acquire_timeout: Duration,
    dead_zone_degrees: f64,
}

impl Location {
    pub fn gpsd_address(&self) -> &str {
        &self.gpsd_address
    }

    pub fn high_accuracy(&self) -> bool {
        self.high_accuracy
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    pub fn dead_zone_degrees(&self) -> f64 {
        self.dead_zone_degrees
    }
}

#[derive(Debug, Deserialize)]
pub struct Elevation {
    primary_url: String,
    fallback_url: String,
    api_key: String,
}

impl Elevation {
    pub fn primary_url(&self) -> &str {
        &self.primary_url
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[derive(Debug, Deserialize)]
pub struct Geocoding {
    url: String,
    user_agent: String,
}

impl Geocoding {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, Deserialize)]
pub struct Analysis {
    url: String,
    model: String,
    api_key: String,
}

impl Analysis {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[derive(Debug, Deserialize)]
pub struct Map {
    tile_url: String,
    subdomains: String,
    zoom: u8,
    max_zoom: u8,
}

impl Map {
    pub fn tile_url(&self) -> &str {
        &self.tile_url
    }

    pub fn subdomains(&self) -> &str {
        &self.subdomains
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    store_buffer_size: 8,
                    http_timeout: Duration::from_secs(10),
                },
                location: Location {
                    gpsd_address: "127.0.0.1:2947".to_string(),
                    high_accuracy: true,
                    acquire_timeout: Duration::from_secs(10),
                    dead_zone_degrees: 0.0001,
                },
                elevation: Elevation {
                    primary_url: "https://elevation.primary/v1/elevation".to_string(),
                    fallback_url: "https://elevation.fallback/api/v1/lookup".to_string(),
                    api_key: String::new(),
                },
                geocoding: Geocoding {
                    url: "https://geocoding.test/search".to_string(),
                    user_agent: "altimeter/0.1.0".to_string(),
                },
                analysis: Analysis {
                    url: "https://analysis.test/v1beta".to_string(),
                    model: "gemini-3-flash-preview".to_string(),
                    api_key: "key".to_string(),
                },
                map: Map {
                    tile_url: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png".to_string(),
                    subdomains: "abc".to_string(),
                    zoom: 13,
                    max_zoom: 17,
                },
            },
        }
    }

    pub fn primary_elevation_url(mut self, url: String) -> Self {
        self.config.elevation.primary_url = url;
        self
    }

    pub fn fallback_elevation_url(mut self, url: String) -> Self {
        self.config.elevation.fallback_url = url;
        self
    }

    pub fn elevation_api_key(mut self, api_key: String) -> Self {
        self.config.elevation.api_key = api_key;
        self
    }

    pub fn geocoding_url(mut self, url: String) -> Self {
        self.config.geocoding.url = url;
        self
    }

    pub fn analysis_url(mut self, url: String) -> Self {
        self.config.analysis.url = url;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.config.location.acquire_timeout = timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
