//! Field extraction for configuration forms.
//!
//! Values are trimmed, blanks count as missing, and anything holding a
//! control character is rejected so a field can never span more than one
//! CLI line.

use super::FormError;
use crate::utils::{has_control_chars, is_valid_interface_name, is_valid_ipv4};

const MAX_VLAN_NAME_LEN: usize = 32;

pub(super) fn optional(value: &Option<String>, label: &str) -> Result<Option<String>, FormError> {
    let trimmed = match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };
    if has_control_chars(trimmed) {
        return Err(FormError::new(format!("{} contains invalid characters.", label)));
    }
    Ok(Some(trimmed.to_string()))
}

pub(super) fn require(value: &Option<String>, label: &str, action: &str) -> Result<String, FormError> {
    optional(value, label)?
        .ok_or_else(|| FormError::new(format!("{} is required for {}.", label, action)))
}

pub(super) fn require_u16_in(
    value: &Option<String>,
    label: &str,
    action: &str,
    min: u16,
    max: u16,
) -> Result<u16, FormError> {
    let raw = require(value, label, action)?;
    raw.parse::<u16>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| FormError::new(format!("{} must be between {} and {}.", label, min, max)))
}

pub(super) fn require_vlan_id(value: &Option<String>, action: &str) -> Result<u16, FormError> {
    require_u16_in(value, "VLAN ID", action, 1, 4094)
}

pub(super) fn require_vlan_name(value: &Option<String>, action: &str) -> Result<String, FormError> {
    let name = require(value, "VLAN name", action)?;
    if name.chars().count() > MAX_VLAN_NAME_LEN {
        return Err(FormError::new(format!(
            "VLAN name must be at most {} characters.",
            MAX_VLAN_NAME_LEN
        )));
    }
    Ok(name)
}

pub(super) fn require_interface(value: &Option<String>, action: &str) -> Result<String, FormError> {
    let name = require(value, "Interface", action)?;
    if !is_valid_interface_name(&name) {
        return Err(FormError::new(format!("Invalid interface name \"{}\".", name)));
    }
    Ok(name)
}

pub(super) fn require_ipv4(value: &Option<String>, label: &str, action: &str) -> Result<String, FormError> {
    let ip = require(value, label, action)?;
    if !is_valid_ipv4(&ip) {
        return Err(FormError::new(format!(
            "{} must be a dotted-quad IPv4 address, got \"{}\".",
            label, ip
        )));
    }
    Ok(ip)
}

/// Routing process keyword plus optional arguments, e.g. "eigrp 100"
pub(super) fn require_protocol(value: &Option<String>, action: &str) -> Result<String, FormError> {
    let protocol = require(value, "Routing protocol", action)?;
    let valid = protocol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ');
    if !valid {
        return Err(FormError::new(format!("Invalid routing protocol \"{}\".", protocol)));
    }
    Ok(collapse_whitespace(&protocol))
}

/// Free-form `ip route` arguments, e.g. "0.0.0.0 0.0.0.0 203.0.113.1"
pub(super) fn require_route(value: &Option<String>, action: &str) -> Result<String, FormError> {
    let route = require(value, "Default route", action)?;
    let valid = route.split_whitespace().all(|token| {
        token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | ':' | '-'))
    });
    if !valid {
        return Err(FormError::new(format!("Invalid route \"{}\".", route)));
    }
    Ok(collapse_whitespace(&route))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
