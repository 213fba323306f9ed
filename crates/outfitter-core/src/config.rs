//! Order configuration loaded from the secrets JSON file.
//!
//! Keys keep the upper-case layout of the existing `secrets.json` files:
//!
//! ```json
//! {
//!   "DISCOUNT_CODE": "...",
//!   "BILLING_ADDR": { "FIRST_NAME": "...", "LAST_NAME": "...", "COMPANY": "...",
//!                     "ADDRESS": "...", "CITY": "...", "STATE": "CO", "ZIP_CODE": "..." },
//!   "PRODUCT_PAGES": { "Men Shirt": "https://...", "Socks": "https://..." },
//!   "RES_PAGE": "https://.../reservations/"
//! }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_STORE_URL: &str = "https://www.primalwear.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub discount_code: String,
    #[serde(rename = "BILLING_ADDR")]
    pub billing: BillingAddress,
    pub product_pages: HashMap<String, Url>,
    #[serde(rename = "RES_PAGE")]
    pub reservation_page: String,
    #[serde(default = "default_store_url")]
    pub store_url: Url,
    /// Browser used for reservation pages; the platform opener when unset
    #[serde(default)]
    pub reference_browser: Option<PathBuf>,
    #[serde(default)]
    pub timings: Timings,
    /// Lower-case country name to storefront country code
    #[serde(default = "default_countries")]
    pub countries: HashMap<String, String>,
}

/// Fixed billing address used for every order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BillingAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Delays that give the storefront time to render, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Timings {
    pub implicit_wait_secs: f64,
    pub page_load_wait_secs: f64,
    pub add_to_cart_wait_secs: f64,
    pub cart_process_wait_secs: f64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            implicit_wait_secs: 5.0,
            page_load_wait_secs: 1.0,
            add_to_cart_wait_secs: 0.5,
            cart_process_wait_secs: 0.2,
        }
    }
}

impl Timings {
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs_f64(self.implicit_wait_secs)
    }

    pub fn page_load_wait(&self) -> Duration {
        Duration::from_secs_f64(self.page_load_wait_secs)
    }

    pub fn add_to_cart_wait(&self) -> Duration {
        Duration::from_secs_f64(self.add_to_cart_wait_secs)
    }

    pub fn cart_process_wait(&self) -> Duration {
        Duration::from_secs_f64(self.cart_process_wait_secs)
    }

    fn validate(&self) -> Result<()> {
        let all = [
            ("IMPLICIT_WAIT_SECS", self.implicit_wait_secs),
            ("PAGE_LOAD_WAIT_SECS", self.page_load_wait_secs),
            ("ADD_TO_CART_WAIT_SECS", self.add_to_cart_wait_secs),
            ("CART_PROCESS_WAIT_SECS", self.cart_process_wait_secs),
        ];

        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "TIMINGS.{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn default_store_url() -> Url {
    Url::parse(DEFAULT_STORE_URL).expect("default store URL is valid")
}

fn default_countries() -> HashMap<String, String> {
    HashMap::from([
        ("usa".to_string(), "US".to_string()),
        ("canada".to_string(), "CA".to_string()),
    ])
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.timings.validate()?;

        if self.reservation_page.trim().is_empty() {
            return Err(Error::InvalidConfig("RES_PAGE must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn product_page(&self, key: &str) -> Option<&Url> {
        self.product_pages.get(key)
    }

    /// Storefront code for a roster country name ("USA", " canada ")
    pub fn country_code(&self, country: &str) -> Option<&str> {
        self.countries
            .get(&country.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn reservation_url(&self, reservation: u64) -> String {
        format!("{}{}", self.reservation_page, reservation)
    }

    pub fn cart_url(&self) -> Result<Url> {
        self.store_url
            .join("cart")
            .map_err(|e| Error::InvalidConfig(format!("STORE_URL: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "DISCOUNT_CODE": "TOUR10",
        "BILLING_ADDR": {
            "FIRST_NAME": "Ops", "LAST_NAME": "Desk", "COMPANY": "Tours Inc",
            "ADDRESS": "5 Office Park", "CITY": "Boulder", "STATE": "CO", "ZIP_CODE": "80301"
        },
        "PRODUCT_PAGES": {
            "Men Shirt": "https://shop.example.com/products/mens-tee",
            "Socks": "https://shop.example.com/products/socks"
        },
        "RES_PAGE": "https://res.example.com/booking/"
    }"#;

    #[test]
    fn test_parse_full_layout() {
        let config = Config::from_json_str(MINIMAL).unwrap();

        assert_eq!(config.discount_code, "TOUR10");
        assert_eq!(config.billing.state, "CO");
        assert_eq!(config.billing.zip_code, "80301");
        assert_eq!(
            config.product_page("Socks").unwrap().as_str(),
            "https://shop.example.com/products/socks"
        );
        assert!(config.product_page("Women Shirt").is_none());
        assert_eq!(
            config.reservation_url(4321),
            "https://res.example.com/booking/4321"
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_json_str(MINIMAL).unwrap();

        assert_eq!(config.timings, Timings::default());
        assert_eq!(config.timings.page_load_wait(), Duration::from_secs(1));
        assert_eq!(config.timings.add_to_cart_wait(), Duration::from_millis(500));
        assert_eq!(config.store_url.as_str(), "https://www.primalwear.com/");
        assert_eq!(config.cart_url().unwrap().as_str(), "https://www.primalwear.com/cart");
        assert!(config.reference_browser.is_none());
        assert_eq!(config.country_code("USA"), Some("US"));
        assert_eq!(config.country_code(" Canada "), Some("CA"));
        assert_eq!(config.country_code("Mexico"), None);
    }

    #[test]
    fn test_partial_timings_override() {
        let json = MINIMAL.replacen(
            "\"DISCOUNT_CODE\"",
            "\"TIMINGS\": { \"PAGE_LOAD_WAIT_SECS\": 2.5 }, \"DISCOUNT_CODE\"",
            1,
        );
        let config = Config::from_json_str(&json).unwrap();
        assert_eq!(config.timings.page_load_wait_secs, 2.5);
        assert_eq!(config.timings.implicit_wait_secs, 5.0);
    }

    #[test]
    fn test_negative_timing_rejected() {
        let json = MINIMAL.replacen(
            "\"DISCOUNT_CODE\"",
            "\"TIMINGS\": { \"CART_PROCESS_WAIT_SECS\": -1 }, \"DISCOUNT_CODE\"",
            1,
        );
        let err = Config::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("CART_PROCESS_WAIT_SECS"));
    }

    #[test]
    fn test_missing_key_rejected() {
        let err = Config::from_json_str(r#"{ "DISCOUNT_CODE": "X" }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.billing.company, "Tours Inc");
    }
}
