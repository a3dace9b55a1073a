use serde::{Deserialize, Serialize};

use super::DeviceSummary;

/// ConfigForm carries every field of the configuration page.
/// Each action reads only the fields it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigForm {
    #[serde(default)]
    pub selected_device: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub vlan_number: Option<String>,
    #[serde(default)]
    pub vlan_name: Option<String>,
    #[serde(default)]
    pub vlan_number_delete: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub subnet_mask: Option<String>,
    #[serde(default)]
    pub default_gateway: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
    #[serde(default)]
    pub transport_protocol: Option<String>,
    #[serde(default)]
    pub routing_protocol: Option<String>,
    #[serde(default)]
    pub default_route: Option<String>,
    #[serde(default)]
    pub destination_network: Option<String>,
    #[serde(default)]
    pub next_hop: Option<String>,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub wildcard_mask: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// ConfigureResponse is the JSON result of a configuration run
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureResponse {
    pub device: DeviceSummary,
    pub action: String,
    pub commands: Vec<String>,
    pub output: String,
    pub cli_errors: Vec<String>,
}

/// ActionInfo describes one entry of the dispatch table
#[derive(Debug, Clone, Serialize)]
pub struct ActionInfo {
    pub action: &'static str,
    pub required: &'static [&'static str],
}

/// Canonical flash categories
pub mod flash_category {
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
}

/// Flash is a one-shot message shown on the next rendered page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: flash_category::SUCCESS.to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: flash_category::ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            category: flash_category::WARNING.to_string(),
            message: message.into(),
        }
    }
}
