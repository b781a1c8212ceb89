use crate::app_config::AppConfig;
use reqwest::Client;

/// Shared client for the elevation and geocoding services. The geocoding
/// service requires an identifying User-Agent.
pub fn new_client(config: &AppConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.core().http_timeout())
        .user_agent(config.geocoding().user_agent())
        .build()
}
