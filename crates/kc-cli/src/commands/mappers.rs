//! Protocol mapper listing commands.

use kc_protocol_oidc::{
    ConfigProperty, ConfigPropertyType, MapperDescriptor, ProtocolMapper, ProtocolMapperRegistry,
};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{MappersCommand, OutputFormat};
use crate::output::{output, output_single};

/// Mapper type representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MapperDisplay {
    /// Mapper type ID.
    pub id: String,
    /// Display name.
    pub display_name: String,
    /// Category.
    pub category: String,
    /// Help text.
    pub help_text: String,
}

impl From<&MapperDescriptor> for MapperDisplay {
    fn from(descriptor: &MapperDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            display_name: descriptor.display_name.clone(),
            category: descriptor.category.clone(),
            help_text: descriptor.help_text.clone(),
        }
    }
}

/// Configuration option representation for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PropertyDisplay {
    /// Config key.
    pub name: String,
    /// Label.
    pub label: String,
    /// Option type.
    #[tabled(rename = "type")]
    pub property_type: String,
    /// Default value.
    pub default: String,
}

impl From<&ConfigProperty> for PropertyDisplay {
    fn from(property: &ConfigProperty) -> Self {
        let property_type = match property.property_type {
            ConfigPropertyType::String => "String",
            ConfigPropertyType::Boolean => "boolean",
        };
        Self {
            name: property.name.clone(),
            label: property.label.clone(),
            property_type: property_type.to_string(),
            default: property.default_value.clone().unwrap_or_default(),
        }
    }
}

/// Runs a mappers command.
///
/// # Errors
///
/// Returns an error if the mapper type is unknown or output fails.
pub fn run_mappers(
    cmd: MappersCommand,
    registry: &ProtocolMapperRegistry,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    match cmd {
        MappersCommand::List => list_mappers(registry, output_format),
        MappersCommand::Show { id } => show_mapper(registry, &id, output_format),
    }
}

/// Lists registered mapper types.
fn list_mappers(
    registry: &ProtocolMapperRegistry,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let rows: Vec<MapperDisplay> = registry
        .descriptors()
        .iter()
        .map(MapperDisplay::from)
        .collect();
    output(&rows, output_format)
}

/// Shows one mapper type and its options.
fn show_mapper(
    registry: &ProtocolMapperRegistry,
    id: &str,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let descriptor = describe(registry, id)?;

    match output_format {
        OutputFormat::Table => {
            println!("{} ({})", descriptor.display_name, descriptor.id);
            println!("{}", descriptor.help_text);
            let rows: Vec<PropertyDisplay> = descriptor
                .properties
                .iter()
                .map(PropertyDisplay::from)
                .collect();
            output(&rows, output_format)
        }
        OutputFormat::Json | OutputFormat::Yaml => output_single(&descriptor, output_format),
    }
}

/// Looks up the metadata of a mapper type.
fn describe(registry: &ProtocolMapperRegistry, id: &str) -> crate::CliResult<MapperDescriptor> {
    registry
        .get(id)
        .map(|mapper| mapper.descriptor())
        .ok_or_else(|| crate::CliError::NotFound {
            resource_type: "protocol mapper".to_string(),
            id: id.to_string(),
        })
}
