use serde::{Deserialize, Serialize};

/// The only device type the configurator knows how to drive
pub const DEVICE_TYPE_CISCO_IOS: &str = "cisco_ios";

/// Device is one record of the device list file
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub hostname: String,
    pub ip: String,
    pub username: String,
    pub password: String,
    /// Enable password, when the device asks for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Device {
    pub fn cisco_ios(hostname: &str, ip: &str, username: &str, password: &str) -> Self {
        Self {
            device_type: DEVICE_TYPE_CISCO_IOS.to_string(),
            hostname: hostname.to_string(),
            ip: ip.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            secret: None,
        }
    }

    /// Routers are recognised by hostname; everything else is treated as a switch
    pub fn is_router(&self) -> bool {
        self.hostname.starts_with('R')
    }

    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            hostname: self.hostname.clone(),
            ip: self.ip.clone(),
            device_type: self.device_type.clone(),
        }
    }
}

// Credentials stay out of logs and panics.
impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("device_type", &self.device_type)
            .field("hostname", &self.hostname)
            .field("ip", &self.ip)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// DeviceSummary is the credential-free view of a device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSummary {
    pub hostname: String,
    pub ip: String,
    pub device_type: String,
}

/// DeviceForm is the add/delete form on the device page.
/// Which button was pressed is signalled by the presence of `add` or `delete`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceForm {
    #[serde(default)]
    pub add: Option<String>,
    #[serde(default)]
    pub delete: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub ipaddress: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// CreateDeviceRequest for adding devices through the JSON API
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub secret: Option<String>,
}
