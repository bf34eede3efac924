//! # Application Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MOONLIGHT_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no locking is
//! needed; workflows clone what they use.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use moonlight_core::BusinessInfo;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trading name, printed on invoices and in reminder messages.
    pub business_name: String,

    /// Address lines for the invoice header.
    pub address_lines: Vec<String>,

    /// Contact phone for the invoice header.
    pub phone: Option<String>,

    /// Where invoices and backup dumps are written.
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            business_name: "Moonlight Scent".to_string(),
            address_lines: vec![
                "14 Admiralty Way, Lekki Phase 1".to_string(),
                "Lagos, Nigeria".to_string(),
            ],
            phone: Some("+234 803 555 0001".to_string()),
            export_dir: PathBuf::from("./exports"),
        }
    }
}

impl AppConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MOONLIGHT_BUSINESS_NAME`: Override the trading name
    /// - `MOONLIGHT_PHONE`: Override the contact phone
    /// - `MOONLIGHT_EXPORT_DIR`: Override the export directory
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(name) = std::env::var("MOONLIGHT_BUSINESS_NAME") {
            config.business_name = name;
        }

        if let Ok(phone) = std::env::var("MOONLIGHT_PHONE") {
            config.phone = Some(phone);
        }

        if let Ok(dir) = std::env::var("MOONLIGHT_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }

        config
    }

    /// The business identity block for invoice rendering.
    pub fn business_info(&self) -> BusinessInfo {
        BusinessInfo {
            name: self.business_name.clone(),
            address_lines: self.address_lines.clone(),
            phone: self.phone.clone(),
        }
    }
}
