//! Dispatch table from configuration-page actions to IOS command lists.
//!
//! `ConfigAction::from_form` validates a submitted form into a typed action;
//! `ConfigAction::commands` renders the literal CLI lines sent inside
//! configuration mode. Every list ends by leaving config mode (`end`) and
//! running a `show` command so the transcript contains the resulting state.

mod fields;

use crate::models::{ActionInfo, ConfigForm, Device};

use fields::{
    optional, require, require_ipv4, require_interface, require_protocol, require_route,
    require_u16_in, require_vlan_id, require_vlan_name,
};

/// FormError carries the user-facing reason a form was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError(pub String);

impl FormError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FormError {}

/// VTY line ranges offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtyRange {
    Lines0To4,
    Lines5To15,
}

impl VtyRange {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "0 4" => Some(Self::Lines0To4),
            "5 15" => Some(Self::Lines5To15),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lines0To4 => "0 4",
            Self::Lines5To15 => "5 15",
        }
    }
}

/// Protocols accepted by `transport input`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtyTransport {
    Telnet,
    Ssh,
}

impl VtyTransport {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "telnet" => Some(Self::Telnet),
            "ssh" => Some(Self::Ssh),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telnet => "telnet",
            Self::Ssh => "ssh",
        }
    }
}

/// One validated configuration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    CreateVlan { vlan_id: u16, name: String },
    DeleteVlan { vlan_id: u16 },
    InterfaceAddress { interface: String, ip_address: String, subnet_mask: String },
    RemoveInterfaceAddress { interface: String },
    AccessVlan { interface: String, vlan_id: u16 },
    RemoveAccessVlan { interface: String },
    DefaultGateway { gateway: String },
    RemoveDefaultGateway,
    VtyLines { range: VtyRange, transport: VtyTransport },
    RoutingProtocol { protocol: String },
    RemoveRoutingProtocol { protocol: String },
    DefaultRoute { route: String },
    RemoveDefaultRoute { route: String },
    StaticRoute { destination: String, subnet_mask: String, next_hop: String },
    RemoveStaticRoute { destination: String, subnet_mask: String },
    Ospf { process_id: u16, network: String, wildcard_mask: String },
    RemoveOspf { process_id: u16 },
    Rip { version: u8, network: String },
    RemoveRip,
}

/// Action names and the form fields each one requires
pub const ACTIONS: &[ActionInfo] = &[
    ActionInfo { action: "vlan_config", required: &["vlan_number", "vlan_name"] },
    ActionInfo { action: "delete_vlan", required: &["vlan_number_delete"] },
    ActionInfo { action: "interface_config", required: &["interface", "ip_address", "subnet_mask"] },
    ActionInfo { action: "no_ipaddress", required: &["interface"] },
    ActionInfo { action: "switchport_access_vlan", required: &["interface", "vlan_number"] },
    ActionInfo { action: "no_switchport_access_vlan", required: &["interface"] },
    ActionInfo { action: "ip_default_gateway", required: &["default_gateway"] },
    ActionInfo { action: "no_ip_default_gateway", required: &[] },
    ActionInfo { action: "vty_line_config", required: &["line_type", "transport_protocol"] },
    ActionInfo { action: "routing_config", required: &["routing_protocol"] },
    ActionInfo { action: "no_routing", required: &["routing_protocol"] },
    ActionInfo { action: "default_route", required: &["default_route"] },
    ActionInfo { action: "no_default_route", required: &["default_route"] },
    ActionInfo { action: "static_routes", required: &["destination_network", "subnet_mask", "next_hop"] },
    ActionInfo { action: "no_static", required: &["destination_network", "subnet_mask"] },
    ActionInfo { action: "ospf_config", required: &["process_id", "network", "wildcard_mask"] },
    ActionInfo { action: "no_ospf", required: &["process_id"] },
    ActionInfo { action: "rip_config", required: &["version", "network"] },
    ActionInfo { action: "no_rip", required: &[] },
];

impl ConfigAction {
    /// Validate a submitted form into an action
    pub fn from_form(form: &ConfigForm) -> Result<Self, FormError> {
        let action = optional(&form.action, "Action")?
            .ok_or_else(|| FormError::new("Invalid action."))?;

        let parsed = match action.as_str() {
            "vlan_config" => Self::CreateVlan {
                vlan_id: require_vlan_id(&form.vlan_number, &action)?,
                name: require_vlan_name(&form.vlan_name, &action)?,
            },
            "delete_vlan" => Self::DeleteVlan {
                vlan_id: match optional(&form.vlan_number_delete, "VLAN ID")? {
                    Some(_) => require_vlan_id(&form.vlan_number_delete, &action)?,
                    None => return Err(FormError::new("VLAN ID is required for deletion.")),
                },
            },
            "interface_config" => Self::InterfaceAddress {
                interface: require_interface(&form.interface, &action)?,
                ip_address: require_ipv4(&form.ip_address, "IP address", &action)?,
                subnet_mask: require_ipv4(&form.subnet_mask, "Subnet mask", &action)?,
            },
            "no_ipaddress" => Self::RemoveInterfaceAddress {
                interface: require_interface(&form.interface, &action)?,
            },
            "switchport_access_vlan" => Self::AccessVlan {
                interface: require_interface(&form.interface, &action)?,
                vlan_id: require_vlan_id(&form.vlan_number, &action)?,
            },
            "no_switchport_access_vlan" => Self::RemoveAccessVlan {
                interface: require_interface(&form.interface, &action)?,
            },
            "ip_default_gateway" => Self::DefaultGateway {
                gateway: require_ipv4(&form.default_gateway, "Default gateway", &action)?,
            },
            "no_ip_default_gateway" => Self::RemoveDefaultGateway,
            "vty_line_config" => {
                let line_type = require(&form.line_type, "Line type", &action)?;
                let transport = require(&form.transport_protocol, "Transport protocol", &action)?;
                Self::VtyLines {
                    range: VtyRange::parse(&line_type).ok_or_else(|| {
                        FormError::new(format!("Line type must be \"0 4\" or \"5 15\", got \"{}\".", line_type))
                    })?,
                    transport: VtyTransport::parse(&transport).ok_or_else(|| {
                        FormError::new(format!("Transport protocol must be telnet or ssh, got \"{}\".", transport))
                    })?,
                }
            }
            "routing_config" => Self::RoutingProtocol {
                protocol: require_protocol(&form.routing_protocol, &action)?,
            },
            "no_routing" => Self::RemoveRoutingProtocol {
                protocol: require_protocol(&form.routing_protocol, &action)?,
            },
            "default_route" => Self::DefaultRoute {
                route: require_route(&form.default_route, &action)?,
            },
            "no_default_route" => Self::RemoveDefaultRoute {
                route: require_route(&form.default_route, &action)?,
            },
            "static_routes" => Self::StaticRoute {
                destination: require_ipv4(&form.destination_network, "Destination network", &action)?,
                subnet_mask: require_ipv4(&form.subnet_mask, "Subnet mask", &action)?,
                next_hop: require_ipv4(&form.next_hop, "Next hop", &action)?,
            },
            "no_static" => Self::RemoveStaticRoute {
                destination: require_ipv4(&form.destination_network, "Destination network", &action)?,
                subnet_mask: require_ipv4(&form.subnet_mask, "Subnet mask", &action)?,
            },
            "ospf_config" => Self::Ospf {
                process_id: require_u16_in(&form.process_id, "Process ID", &action, 1, u16::MAX)?,
                network: require_ipv4(&form.network, "Network", &action)?,
                wildcard_mask: require_ipv4(&form.wildcard_mask, "Wildcard mask", &action)?,
            },
            "no_ospf" => Self::RemoveOspf {
                process_id: require_u16_in(&form.process_id, "Process ID", &action, 1, u16::MAX)?,
            },
            "rip_config" => Self::Rip {
                version: require_u16_in(&form.version, "Version", &action, 1, 2)? as u8,
                network: require_ipv4(&form.network, "Network", &action)?,
            },
            "no_rip" => Self::RemoveRip,
            _ => return Err(FormError::new("Invalid action.")),
        };

        Ok(parsed)
    }

    /// The action name as submitted by the form
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateVlan { .. } => "vlan_config",
            Self::DeleteVlan { .. } => "delete_vlan",
            Self::InterfaceAddress { .. } => "interface_config",
            Self::RemoveInterfaceAddress { .. } => "no_ipaddress",
            Self::AccessVlan { .. } => "switchport_access_vlan",
            Self::RemoveAccessVlan { .. } => "no_switchport_access_vlan",
            Self::DefaultGateway { .. } => "ip_default_gateway",
            Self::RemoveDefaultGateway => "no_ip_default_gateway",
            Self::VtyLines { .. } => "vty_line_config",
            Self::RoutingProtocol { .. } => "routing_config",
            Self::RemoveRoutingProtocol { .. } => "no_routing",
            Self::DefaultRoute { .. } => "default_route",
            Self::RemoveDefaultRoute { .. } => "no_default_route",
            Self::StaticRoute { .. } => "static_routes",
            Self::RemoveStaticRoute { .. } => "no_static",
            Self::Ospf { .. } => "ospf_config",
            Self::RemoveOspf { .. } => "no_ospf",
            Self::Rip { .. } => "rip_config",
            Self::RemoveRip => "no_rip",
        }
    }

    /// New management IP to record once the action succeeds, if any
    pub fn updates_management_ip(&self) -> Option<&str> {
        match self {
            Self::InterfaceAddress { ip_address, .. } => Some(ip_address),
            _ => None,
        }
    }

    /// Render the command list for a device
    pub fn commands(&self, device: &Device) -> Vec<String> {
        match self {
            Self::CreateVlan { vlan_id, name } => vec![
                format!("vlan {}", vlan_id),
                format!("name {}", name),
                "exit".into(),
                "end".into(),
                "show vlan".into(),
            ],
            Self::DeleteVlan { vlan_id } => vec![
                format!("no vlan {}", vlan_id),
                "end".into(),
                "show vlan".into(),
            ],
            Self::InterfaceAddress { interface, ip_address, subnet_mask } => {
                let mut commands = vec![format!("interface {}", interface)];
                // Switch ports must be made routed before they take an address
                if !device.is_router() {
                    commands.push("no switchport".into());
                }
                commands.extend([
                    format!("ip address {} {}", ip_address, subnet_mask),
                    "no shutdown".into(),
                    "exit".into(),
                    "end".into(),
                    "show ip interface brief".into(),
                ]);
                commands
            }
            Self::RemoveInterfaceAddress { interface } => vec![
                format!("interface {}", interface),
                "no ip address".into(),
                "exit".into(),
                "end".into(),
                "show ip interface brief".into(),
            ],
            Self::AccessVlan { interface, vlan_id } => vec![
                format!("interface {}", interface),
                format!("switchport access vlan {}", vlan_id),
                "exit".into(),
                "end".into(),
                format!("show running-config interface {}", interface),
            ],
            Self::RemoveAccessVlan { interface } => vec![
                format!("interface {}", interface),
                "no switchport access vlan".into(),
                "exit".into(),
                "end".into(),
                format!("show running-config interface {}", interface),
            ],
            Self::DefaultGateway { gateway } => vec![
                format!("ip default-gateway {}", gateway),
                "end".into(),
                "show running-config | include ip default-gateway".into(),
            ],
            Self::RemoveDefaultGateway => vec![
                "no ip default-gateway".into(),
                "end".into(),
                "show running-config | include ip default-gateway".into(),
            ],
            Self::VtyLines { range, transport } => vec![
                format!("line vty {}", range.as_str()),
                format!("transport input {}", transport.as_str()),
                "login local".into(),
                "exit".into(),
                "end".into(),
                "show running-config | include line vty".into(),
            ],
            Self::RoutingProtocol { protocol } => vec![
                format!("router {}", protocol),
                "exit".into(),
                "end".into(),
                "show ip route".into(),
            ],
            Self::RemoveRoutingProtocol { protocol } => vec![
                format!("no router {}", protocol),
                "end".into(),
                "show ip route".into(),
            ],
            Self::DefaultRoute { route } => vec![
                format!("ip route {}", route),
                "end".into(),
                "show ip route".into(),
            ],
            Self::RemoveDefaultRoute { route } => vec![
                format!("no ip route {}", route),
                "end".into(),
                "show ip route".into(),
            ],
            Self::StaticRoute { destination, subnet_mask, next_hop } => vec![
                format!("ip route {} {} {}", destination, subnet_mask, next_hop),
                "end".into(),
                "show ip route".into(),
            ],
            Self::RemoveStaticRoute { destination, subnet_mask } => vec![
                format!("no ip route {} {}", destination, subnet_mask),
                "end".into(),
                "show ip route".into(),
            ],
            Self::Ospf { process_id, network, wildcard_mask } => vec![
                format!("router ospf {}", process_id),
                format!("network {} {} area 0", network, wildcard_mask),
                "exit".into(),
                "end".into(),
                "show ip ospf".into(),
            ],
            Self::RemoveOspf { process_id } => vec![
                format!("no router ospf {}", process_id),
                "end".into(),
                "show ip ospf".into(),
            ],
            Self::Rip { version, network } => vec![
                "router rip".into(),
                format!("version {}", version),
                format!("network {}", network),
                "exit".into(),
                "end".into(),
                "show ip route rip".into(),
            ],
            Self::RemoveRip => vec![
                "no router rip".into(),
                "end".into(),
                "show ip route rip".into(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(action: &str) -> ConfigForm {
        ConfigForm {
            action: Some(action.to_string()),
            ..Default::default()
        }
    }

    fn switch() -> Device {
        Device::cisco_ios("SW1", "10.0.0.2", "admin", "cisco")
    }

    fn router() -> Device {
        Device::cisco_ios("R1", "10.0.0.1", "admin", "cisco")
    }

    #[test]
    fn test_create_vlan() {
        let mut f = form("vlan_config");
        f.vlan_number = Some(" 10 ".into());
        f.vlan_name = Some("USERS".into());

        let action = ConfigAction::from_form(&f).unwrap();
        assert_eq!(
            action.commands(&switch()),
            vec!["vlan 10", "name USERS", "exit", "end", "show vlan"]
        );
        assert_eq!(action.name(), "vlan_config");
    }

    #[test]
    fn test_delete_vlan_requires_id() {
        let err = ConfigAction::from_form(&form("delete_vlan")).unwrap_err();
        assert_eq!(err.to_string(), "VLAN ID is required for deletion.");

        let mut f = form("delete_vlan");
        f.vlan_number_delete = Some("20".into());
        let action = ConfigAction::from_form(&f).unwrap();
        assert_eq!(action.commands(&switch()), vec!["no vlan 20", "end", "show vlan"]);
    }

    #[test]
    fn test_vlan_id_range() {
        for bad in ["0", "4095", "abc", "-1"] {
            let mut f = form("delete_vlan");
            f.vlan_number_delete = Some(bad.into());
            assert!(ConfigAction::from_form(&f).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_interface_address_on_switch_adds_no_switchport() {
        let mut f = form("interface_config");
        f.interface = Some("Vlan1".into());
        f.ip_address = Some("192.168.1.2".into());
        f.subnet_mask = Some("255.255.255.0".into());

        let action = ConfigAction::from_form(&f).unwrap();
        assert_eq!(
            action.commands(&switch()),
            vec![
                "interface Vlan1",
                "no switchport",
                "ip address 192.168.1.2 255.255.255.0",
                "no shutdown",
                "exit",
                "end",
                "show ip interface brief",
            ]
        );
        assert_eq!(action.updates_management_ip(), Some("192.168.1.2"));
    }

    #[test]
    fn test_interface_address_on_router_skips_no_switchport() {
        let mut f = form("interface_config");
        f.interface = Some("GigabitEthernet0/0".into());
        f.ip_address = Some("10.1.1.1".into());
        f.subnet_mask = Some("255.255.255.252".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(commands[0], "interface GigabitEthernet0/0");
        assert_eq!(commands[1], "ip address 10.1.1.1 255.255.255.252");
        assert!(!commands.iter().any(|c| c == "no switchport"));
    }

    #[test]
    fn test_remove_interface_address() {
        let mut f = form("no_ipaddress");
        f.interface = Some("GigabitEthernet0/1".into());

        let action = ConfigAction::from_form(&f).unwrap();
        assert_eq!(
            action.commands(&router()),
            vec![
                "interface GigabitEthernet0/1",
                "no ip address",
                "exit",
                "end",
                "show ip interface brief",
            ]
        );
        assert_eq!(action.updates_management_ip(), None);
    }

    #[test]
    fn test_access_vlan_shows_interface() {
        let mut f = form("switchport_access_vlan");
        f.interface = Some("FastEthernet0/5".into());
        f.vlan_number = Some("30".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&switch());
        assert_eq!(commands[1], "switchport access vlan 30");
        assert_eq!(commands.last().unwrap(), "show running-config interface FastEthernet0/5");
    }

    #[test]
    fn test_no_default_gateway_needs_no_fields() {
        let commands = ConfigAction::from_form(&form("no_ip_default_gateway"))
            .unwrap()
            .commands(&switch());
        assert_eq!(
            commands,
            vec![
                "no ip default-gateway",
                "end",
                "show running-config | include ip default-gateway",
            ]
        );
    }

    #[test]
    fn test_vty_lines() {
        let mut f = form("vty_line_config");
        f.line_type = Some("5 15".into());
        f.transport_protocol = Some("ssh".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(
            commands,
            vec![
                "line vty 5 15",
                "transport input ssh",
                "login local",
                "exit",
                "end",
                "show running-config | include line vty",
            ]
        );

        f.line_type = Some("0 15".into());
        assert!(ConfigAction::from_form(&f).is_err());

        f.line_type = Some("0 4".into());
        f.transport_protocol = Some("all".into());
        assert!(ConfigAction::from_form(&f).is_err());
    }

    #[test]
    fn test_routing_protocol_collapses_whitespace() {
        let mut f = form("routing_config");
        f.routing_protocol = Some("eigrp   100".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(commands, vec!["router eigrp 100", "exit", "end", "show ip route"]);
    }

    #[test]
    fn test_default_route() {
        let mut f = form("default_route");
        f.default_route = Some("0.0.0.0 0.0.0.0 203.0.113.1".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(
            commands,
            vec!["ip route 0.0.0.0 0.0.0.0 203.0.113.1", "end", "show ip route"]
        );

        f.action = Some("no_default_route".into());
        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(commands[0], "no ip route 0.0.0.0 0.0.0.0 203.0.113.1");
    }

    #[test]
    fn test_static_routes() {
        let mut f = form("static_routes");
        f.destination_network = Some("172.16.0.0".into());
        f.subnet_mask = Some("255.255.0.0".into());
        f.next_hop = Some("10.0.0.2".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(commands[0], "ip route 172.16.0.0 255.255.0.0 10.0.0.2");

        f.action = Some("no_static".into());
        f.next_hop = None;
        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(commands, vec!["no ip route 172.16.0.0 255.255.0.0", "end", "show ip route"]);
    }

    #[test]
    fn test_ospf_uses_area_zero() {
        let mut f = form("ospf_config");
        f.process_id = Some("1".into());
        f.network = Some("10.0.0.0".into());
        f.wildcard_mask = Some("0.0.0.255".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(
            commands,
            vec![
                "router ospf 1",
                "network 10.0.0.0 0.0.0.255 area 0",
                "exit",
                "end",
                "show ip ospf",
            ]
        );

        f.process_id = Some("0".into());
        assert!(ConfigAction::from_form(&f).is_err());
    }

    #[test]
    fn test_rip() {
        let mut f = form("rip_config");
        f.version = Some("2".into());
        f.network = Some("192.168.10.0".into());

        let commands = ConfigAction::from_form(&f).unwrap().commands(&router());
        assert_eq!(
            commands,
            vec![
                "router rip",
                "version 2",
                "network 192.168.10.0",
                "exit",
                "end",
                "show ip route rip",
            ]
        );

        f.version = Some("3".into());
        assert!(ConfigAction::from_form(&f).is_err());

        let commands = ConfigAction::from_form(&form("no_rip")).unwrap().commands(&router());
        assert_eq!(commands, vec!["no router rip", "end", "show ip route rip"]);
    }

    #[test]
    fn test_unknown_or_missing_action() {
        assert_eq!(
            ConfigAction::from_form(&form("reload")).unwrap_err().to_string(),
            "Invalid action."
        );
        assert_eq!(
            ConfigAction::from_form(&ConfigForm::default()).unwrap_err().to_string(),
            "Invalid action."
        );
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut f = form("vlan_config");
        f.vlan_number = Some("10".into());
        f.vlan_name = Some("   ".into());

        let err = ConfigAction::from_form(&f).unwrap_err();
        assert_eq!(err.to_string(), "VLAN name is required for vlan_config.");
    }

    #[test]
    fn test_newlines_cannot_smuggle_commands() {
        let mut f = form("routing_config");
        f.routing_protocol = Some("rip\nno router ospf 1".into());
        assert!(ConfigAction::from_form(&f).is_err());

        let mut f = form("vlan_config");
        f.vlan_number = Some("10".into());
        f.vlan_name = Some("USERS\r\nend".into());
        assert!(ConfigAction::from_form(&f).is_err());
    }

    fn form_with(fields: serde_json::Value) -> ConfigForm {
        serde_json::from_value(fields).unwrap()
    }

    #[test]
    fn test_every_action_renders_its_full_command_list() {
        let cases: Vec<(serde_json::Value, Vec<&str>)> = vec![
            (
                serde_json::json!({"action": "vlan_config", "vlan_number": "10", "vlan_name": "USERS"}),
                vec!["vlan 10", "name USERS", "exit", "end", "show vlan"],
            ),
            (
                serde_json::json!({"action": "delete_vlan", "vlan_number_delete": "10"}),
                vec!["no vlan 10", "end", "show vlan"],
            ),
            (
                serde_json::json!({
                    "action": "interface_config",
                    "interface": "Vlan1",
                    "ip_address": "10.0.0.20",
                    "subnet_mask": "255.255.255.0",
                }),
                vec![
                    "interface Vlan1",
                    "no switchport",
                    "ip address 10.0.0.20 255.255.255.0",
                    "no shutdown",
                    "exit",
                    "end",
                    "show ip interface brief",
                ],
            ),
            (
                serde_json::json!({"action": "no_ipaddress", "interface": "Vlan1"}),
                vec!["interface Vlan1", "no ip address", "exit", "end", "show ip interface brief"],
            ),
            (
                serde_json::json!({"action": "switchport_access_vlan", "interface": "Fa0/1", "vlan_number": "20"}),
                vec![
                    "interface Fa0/1",
                    "switchport access vlan 20",
                    "exit",
                    "end",
                    "show running-config interface Fa0/1",
                ],
            ),
            (
                serde_json::json!({"action": "no_switchport_access_vlan", "interface": "Fa0/1"}),
                vec![
                    "interface Fa0/1",
                    "no switchport access vlan",
                    "exit",
                    "end",
                    "show running-config interface Fa0/1",
                ],
            ),
            (
                serde_json::json!({"action": "ip_default_gateway", "default_gateway": "10.0.0.1"}),
                vec![
                    "ip default-gateway 10.0.0.1",
                    "end",
                    "show running-config | include ip default-gateway",
                ],
            ),
            (
                serde_json::json!({"action": "no_ip_default_gateway"}),
                vec![
                    "no ip default-gateway",
                    "end",
                    "show running-config | include ip default-gateway",
                ],
            ),
            (
                serde_json::json!({"action": "vty_line_config", "line_type": "0 4", "transport_protocol": "telnet"}),
                vec![
                    "line vty 0 4",
                    "transport input telnet",
                    "login local",
                    "exit",
                    "end",
                    "show running-config | include line vty",
                ],
            ),
            (
                serde_json::json!({"action": "routing_config", "routing_protocol": "eigrp 100"}),
                vec!["router eigrp 100", "exit", "end", "show ip route"],
            ),
            (
                serde_json::json!({"action": "no_routing", "routing_protocol": "eigrp 100"}),
                vec!["no router eigrp 100", "end", "show ip route"],
            ),
            (
                serde_json::json!({"action": "default_route", "default_route": "0.0.0.0 0.0.0.0 10.0.0.1"}),
                vec!["ip route 0.0.0.0 0.0.0.0 10.0.0.1", "end", "show ip route"],
            ),
            (
                serde_json::json!({"action": "no_default_route", "default_route": "0.0.0.0 0.0.0.0 10.0.0.1"}),
                vec!["no ip route 0.0.0.0 0.0.0.0 10.0.0.1", "end", "show ip route"],
            ),
            (
                serde_json::json!({
                    "action": "static_routes",
                    "destination_network": "192.168.10.0",
                    "subnet_mask": "255.255.255.0",
                    "next_hop": "10.0.0.1",
                }),
                vec!["ip route 192.168.10.0 255.255.255.0 10.0.0.1", "end", "show ip route"],
            ),
            (
                serde_json::json!({
                    "action": "no_static",
                    "destination_network": "192.168.10.0",
                    "subnet_mask": "255.255.255.0",
                }),
                vec!["no ip route 192.168.10.0 255.255.255.0", "end", "show ip route"],
            ),
            (
                serde_json::json!({
                    "action": "ospf_config",
                    "process_id": "1",
                    "network": "10.0.0.0",
                    "wildcard_mask": "0.0.0.255",
                }),
                vec!["router ospf 1", "network 10.0.0.0 0.0.0.255 area 0", "exit", "end", "show ip ospf"],
            ),
            (
                serde_json::json!({"action": "no_ospf", "process_id": "1"}),
                vec!["no router ospf 1", "end", "show ip ospf"],
            ),
            (
                serde_json::json!({"action": "rip_config", "version": "2", "network": "10.0.0.0"}),
                vec!["router rip", "version 2", "network 10.0.0.0", "exit", "end", "show ip route rip"],
            ),
            (
                serde_json::json!({"action": "no_rip"}),
                vec!["no router rip", "end", "show ip route rip"],
            ),
        ];
        assert_eq!(cases.len(), ACTIONS.len());

        for (fields, expected) in cases {
            let name = fields["action"].as_str().unwrap().to_string();
            let action = ConfigAction::from_form(&form_with(fields))
                .unwrap_or_else(|e| panic!("{} rejected: {}", name, e));
            assert_eq!(action.name(), name);
            assert_eq!(action.commands(&switch()), expected, "{}", name);
        }
    }

    #[test]
    fn test_action_table_covers_every_action() {
        assert_eq!(ACTIONS.len(), 19);
        let no_field_actions: Vec<&str> = ACTIONS
            .iter()
            .filter(|a| a.required.is_empty())
            .map(|a| a.action)
            .collect();
        for name in no_field_actions {
            let action = ConfigAction::from_form(&form(name)).unwrap();
            assert_eq!(action.name(), name);
        }
    }
}
