use anyhow::Result;

use super::{ConflictError, NotFoundError, Store};
use crate::models::Device;

impl Store {
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.load().await
    }

    /// Look up a device by its management IP
    pub async fn get_device(&self, ip: &str) -> Result<Option<Device>> {
        let devices = self.load().await?;
        Ok(devices.into_iter().find(|d| d.ip == ip))
    }

    /// Append a device; the management IP must be unique
    pub async fn add_device(&self, device: Device) -> Result<Device> {
        let _guard = self.write_lock.lock().await;
        let mut devices = self.load().await?;

        if devices.iter().any(|d| d.ip == device.ip) {
            return Err(ConflictError::new("Device", &device.ip).into());
        }

        devices.push(device.clone());
        self.save(&devices).await?;
        Ok(device)
    }

    /// Remove every device with this IP. Returns false (and leaves the file
    /// untouched) when nothing matched.
    pub async fn delete_device(&self, ip: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut devices = self.load().await?;

        let original_len = devices.len();
        devices.retain(|d| d.ip != ip);
        if devices.len() == original_len {
            return Ok(false);
        }

        self.save(&devices).await?;
        Ok(true)
    }

    /// Re-point a device at a new management IP
    pub async fn update_device_ip(&self, old_ip: &str, new_ip: &str) -> Result<Device> {
        let _guard = self.write_lock.lock().await;
        let mut devices = self.load().await?;

        if old_ip != new_ip && devices.iter().any(|d| d.ip == new_ip) {
            return Err(ConflictError::new("Device", new_ip).into());
        }

        let device = devices
            .iter_mut()
            .find(|d| d.ip == old_ip)
            .ok_or_else(|| NotFoundError::new("Device", old_ip))?;
        device.ip = new_ip.to_string();
        let updated = device.clone();

        self.save(&devices).await?;
        Ok(updated)
    }
}
