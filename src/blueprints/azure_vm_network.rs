//! Azure VM network blueprint.
//!
//! A virtual network with a security group, one security rule per record in
//! [`SECURITY_RULES`], one subnet per CIDR in [`SUBNET_CIDRS`], a dynamic
//! public IP, a NIC, and an Ubuntu VM bootstrapped through base64-encoded
//! custom data. The administrator password is a secret reference resolved by
//! the engine; it is never embedded as a literal.

use serde_json::json;
use tracing::debug;

use super::Blueprint;
use crate::encoding::encode_custom_data;
use crate::error::Result;
use crate::graph::ResourceGraph;
use crate::naming::indexed_name;
use crate::resource::{AttrValue, Declaration};
use crate::stack::StackContext;
use crate::tags::TagSet;

/// Address space of the virtual network.
pub const VNET_CIDRS: [&str; 1] = ["10.11.0.0/16"];

/// One subnet is declared per CIDR, in order.
pub const SUBNET_CIDRS: [&str; 2] = ["10.11.0.0/24", "10.110.1.0/24"];

/// A fixed-shape security rule record. Ordering in [`SECURITY_RULES`] maps
/// to declaration index suffixes.
#[derive(Debug, Clone)]
pub struct SecurityRule {
    pub access: &'static str,
    pub direction: &'static str,
    pub priority: u32,
    pub protocol: &'static str,
    pub source_address_prefix: &'static str,
    pub source_port_range: &'static str,
    pub destination_address_prefix: &'static str,
    pub destination_port_range: &'static str,
}

/// Inbound HTTP from the internet.
pub const SECURITY_RULES: [SecurityRule; 1] = [SecurityRule {
    access: "Allow",
    direction: "Inbound",
    priority: 100,
    protocol: "*",
    source_address_prefix: "Internet",
    source_port_range: "*",
    destination_address_prefix: "*",
    destination_port_range: "80",
}];

/// Boot script installing and starting apache. ASCII only; the encoder
/// rejects anything else.
const INIT_SCRIPT: &str = r#"#!/bin/bash
sudo apt-get update
sudo apt-get install -y apache2
sudo systemctl start apache2
sudo systemctl enable apache2
echo "<h1>Bootstrapped virtual machine</h1>" | sudo tee /var/www/html/index.html"#;

/// The Azure VM network blueprint.
pub struct AzureVmNetwork;

impl Blueprint for AzureVmNetwork {
    fn name(&self) -> &'static str {
        "azure-vm-network"
    }

    fn description(&self) -> &'static str {
        "Virtual network with security rules, subnets, and a bootstrapped web server VM"
    }

    fn build(&self, ctx: &StackContext) -> Result<ResourceGraph> {
        debug!(stack = ctx.stack(), "building azure-vm-network");
        let mut graph = ResourceGraph::new();
        let resource_group = ctx.require("resource_group")?;

        let mut tags = TagSet::new(ctx, ctx.get_or("team", "DA"));
        if let Some(owner) = ctx.get("owner") {
            tags = tags.with_owner(owner);
        }

        let vnet = graph.insert(
            Declaration::new(
                format!("virtualNetwork{}", ctx.stack()),
                "azure:network:VirtualNetwork",
            )
            .attr("resource_group_name", resource_group.as_str())
            .attr(
                "address_space",
                AttrValue::object([("address_prefixes", json!(VNET_CIDRS).into())]),
            )
            .tagged(tags.clone()),
        )?;

        let nsg = graph.insert(
            Declaration::new(
                format!("networkSecurityGroup{}", ctx.stack()),
                "azure:network:NetworkSecurityGroup",
            )
            .attr("resource_group_name", resource_group.as_str())
            .tagged(tags.clone()),
        )?;

        for (index, rule) in SECURITY_RULES.iter().enumerate() {
            graph.insert(
                Declaration::new(
                    indexed_name("networkSecurityRules", ctx.stack(), index),
                    "azure:network:SecurityRule",
                )
                .attr("rule_name", format!("rule{}{}", ctx.stack(), index))
                .attr("resource_group_name", resource_group.as_str())
                .attr("network_security_group_name", nsg.output("name"))
                .attr("access", rule.access)
                .attr("direction", rule.direction)
                .attr("priority", rule.priority)
                .attr("protocol", rule.protocol)
                .attr("source_address_prefix", rule.source_address_prefix)
                .attr("source_port_range", rule.source_port_range)
                .attr(
                    "destination_address_prefix",
                    rule.destination_address_prefix,
                )
                .attr("destination_port_range", rule.destination_port_range)
                .depends_on(&nsg),
            )?;
        }

        let mut subnets = Vec::with_capacity(SUBNET_CIDRS.len());
        for (index, cidr) in SUBNET_CIDRS.iter().enumerate() {
            let subnet = graph.insert(
                Declaration::new(
                    indexed_name("subnet", ctx.stack(), index),
                    "azure:network:Subnet",
                )
                .attr("address_prefix", *cidr)
                .attr("resource_group_name", resource_group.as_str())
                .attr("virtual_network_name", vnet.output("name"))
                .attr(
                    "network_security_group",
                    AttrValue::object([("id", nsg.output("id"))]),
                )
                .depends_on(&nsg),
            )?;
            subnets.push(subnet);
        }

        let public_ip = graph.insert(
            Declaration::new("publicIp", "azure:network:PublicIPAddress")
                .attr("resource_group_name", resource_group.as_str())
                .attr("public_ip_allocation_method", "Dynamic")
                .tagged(tags.clone()),
        )?;

        let mut nic_decl = Declaration::new("networkInterface", "azure:network:NetworkInterface")
            .attr("resource_group_name", resource_group.as_str())
            .attr("enable_accelerated_networking", true)
            .attr(
                "ip_configurations",
                AttrValue::array(vec![AttrValue::object([
                    ("name", "webserveripconfig".into()),
                    (
                        "public_ip_address",
                        AttrValue::object([("id", public_ip.output("id"))]),
                    ),
                    (
                        "subnet",
                        AttrValue::object([("id", subnets[0].output("id"))]),
                    ),
                ])]),
            )
            .tagged(tags.clone());
        for subnet in &subnets {
            nic_decl = nic_decl.depends_on(subnet);
        }
        let nic = graph.insert(nic_decl.depends_on(&public_ip))?;

        let admin_username = ctx.get_or("admin_username", "azureuser");
        let admin_password = ctx.secret("adminPassword")?;
        let custom_data = encode_custom_data(INIT_SCRIPT)?;

        let vm = graph.insert(
            Declaration::new("serverVm", "azure:compute:VirtualMachine")
                .attr("resource_group_name", resource_group.as_str())
                .attr(
                    "hardware_profile",
                    AttrValue::object([("vm_size", "Standard_DS1_v2".into())]),
                )
                .attr(
                    "network_profile",
                    AttrValue::object([(
                        "network_interfaces",
                        AttrValue::array(vec![AttrValue::object([
                            ("id", nic.output("id")),
                            ("primary", true.into()),
                        ])]),
                    )]),
                )
                .attr(
                    "os_profile",
                    AttrValue::object([
                        ("computer_name", "webserver".into()),
                        ("admin_username", admin_username.into()),
                        ("admin_password", admin_password),
                        ("custom_data", custom_data.into()),
                        (
                            "linux_configuration",
                            AttrValue::object([
                                ("provision_vm_agent", true.into()),
                                ("disable_password_authentication", false.into()),
                                (
                                    "patch_settings",
                                    AttrValue::object([(
                                        "assessment_mode",
                                        "ImageDefault".into(),
                                    )]),
                                ),
                            ]),
                        ),
                    ]),
                )
                .attr(
                    "storage_profile",
                    json!({
                        "image_reference": {
                            "publisher": "Canonical",
                            "offer": "UbuntuServer",
                            "sku": "18.04-LTS",
                            "version": "latest",
                        },
                        "os_disk": {
                            "name": "osdisk",
                            "caching": "ReadWrite",
                            "create_option": "FromImage",
                            "delete_option": "Delete",
                            "managed_disk": { "storage_account_type": "Premium_LRS" },
                        },
                    }),
                )
                .depends_on(&nic)
                .tagged(tags),
        )?;

        graph.export("vmName", vm.output("name"));
        graph.export("publicIpAddress", public_ip.output("ip_address"));

        Ok(graph)
    }
}
