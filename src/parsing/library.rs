//! Library parsing
//!
//! Packages are parsed before symbols and symbols before device sets, so a
//! device's package can be resolved against the finished package map.

use super::attrs::{description, flag, i32_or, optional_string, point, required};
use super::geometry::parse_geometry;
use crate::error::Result;
use crate::model::{
    Attribute, Connect, Device, DeviceSet, Gate, Library, Package, PackageRef, Symbol, SymbolRef,
    Technology,
};
use crate::names::NamedMap;
use crate::parse_xml::XmlNode;
use tracing::{debug, warn};

pub(crate) fn parse_library(node: &XmlNode) -> Result<Library> {
    let mut library = Library::new(optional_string(node, "name"), description(node));

    for package in node.select("packages/package") {
        let package = parse_package(package)?;
        library.packages.insert_unique(package.name.clone(), package)?;
    }
    for symbol in node.select("symbols/symbol") {
        let symbol = parse_symbol(symbol)?;
        library.symbols.insert_unique(symbol.name.clone(), symbol)?;
    }
    for device_set in node.select("devicesets/deviceset") {
        let device_set = parse_device_set(device_set, &library.packages)?;
        library.device_sets.insert_unique(device_set.name.clone(), device_set)?;
    }

    debug!(
        library = library.name.as_deref().unwrap_or("<file>"),
        packages = library.packages.len(),
        symbols = library.symbols.len(),
        device_sets = library.device_sets.len(),
        "parsed library"
    );
    Ok(library)
}

fn parse_package(node: &XmlNode) -> Result<Package> {
    Ok(Package::new(
        required(node, "name")?,
        description(node),
        parse_geometry(node)?,
    ))
}

fn parse_symbol(node: &XmlNode) -> Result<Symbol> {
    Ok(Symbol::new(
        required(node, "name")?,
        description(node),
        parse_geometry(node)?,
    ))
}

fn parse_device_set(node: &XmlNode, packages: &NamedMap<Package>) -> Result<DeviceSet> {
    let mut device_set = DeviceSet::new(required(node, "name")?);
    device_set.prefix = optional_string(node, "prefix");
    device_set.uservalue = flag(node, "uservalue", false);
    device_set.description = description(node);

    for gate in node.select("gates/gate") {
        let gate = parse_gate(gate)?;
        device_set.gates.insert_unique(gate.name.clone(), gate)?;
    }
    for device in node.select("devices/device") {
        let device = parse_device(device, &device_set.name, packages)?;
        device_set.devices.insert_unique(device.name.clone(), device)?;
    }
    Ok(device_set)
}

fn parse_gate(node: &XmlNode) -> Result<Gate> {
    Ok(Gate {
        name: required(node, "name")?.to_string(),
        symbol: SymbolRef::Unresolved {
            name: required(node, "symbol")?.to_string(),
        },
        position: point(node, "x", "y")?,
        add_level: optional_string(node, "addlevel"),
        swap_level: i32_or(node, "swaplevel", 0)?,
    })
}

fn parse_device(node: &XmlNode, device_set: &str, packages: &NamedMap<Package>) -> Result<Device> {
    // EAGLE allows an unnamed default variant
    let name = node.attr("name").unwrap_or_default().to_string();

    let package = match node.attr("package") {
        Some(requested) if packages.contains_key(requested) => PackageRef::Resolved {
            name: requested.to_string(),
        },
        requested => {
            warn!(
                device_set,
                device = %name,
                package = requested.unwrap_or("<none>"),
                "package not found in library, using empty placeholder"
            );
            PackageRef::Placeholder {
                requested: requested.map(str::to_string),
            }
        }
    };

    let connects = node
        .select("connects/connect")
        .into_iter()
        .map(|c| {
            Ok(Connect {
                gate: required(c, "gate")?.to_string(),
                pin: required(c, "pin")?.to_string(),
                pad: required(c, "pad")?.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut technologies = NamedMap::new("technology");
    for tech in node.select("technologies/technology") {
        let technology = parse_technology(tech)?;
        technologies.insert_unique(technology.name.clone(), technology)?;
    }

    Ok(Device {
        name,
        package,
        connects,
        technologies,
    })
}

fn parse_technology(node: &XmlNode) -> Result<Technology> {
    let mut attributes = NamedMap::new("attribute");
    for attr in node.children_named("attribute") {
        let attribute = Attribute {
            name: required(attr, "name")?.to_string(),
            value: optional_string(attr, "value"),
            constant: flag(attr, "constant", false),
        };
        attributes.insert_unique(attribute.name.clone(), attribute)?;
    }
    Ok(Technology {
        name: node.attr("name").unwrap_or_default().to_string(),
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EagleError;
    use crate::parse_xml::parse_xml_str;

    const LIBRARY: &str = r#"<library>
        <description>Test parts</description>
        <packages>
            <package name="TO92"><pad name="1" x="-1.27" y="0" drill="0.8"/></package>
        </packages>
        <symbols>
            <symbol name="NPN"><pin name="B" x="-5.08" y="0" length="short"/></symbol>
        </symbols>
        <devicesets>
            <deviceset name="BC547" prefix="Q" uservalue="yes">
                <gates><gate name="G$1" symbol="NPN" x="0" y="0"/></gates>
                <devices>
                    <device name="" package="TO92">
                        <connects><connect gate="G$1" pin="B" pad="1"/></connects>
                        <technologies>
                            <technology name="">
                                <attribute name="MF" value="ON" constant="no"/>
                            </technology>
                        </technologies>
                    </device>
                    <device name="SMD" package="SOT23"/>
                </devices>
            </deviceset>
        </devicesets>
    </library>"#;

    #[test]
    fn test_library_structure() {
        let library = parse_library(&parse_xml_str(LIBRARY).unwrap()).unwrap();
        assert_eq!(library.description.as_deref(), Some("Test parts"));
        let ds = library.device_set("BC547").unwrap();
        assert_eq!(ds.prefix.as_deref(), Some("Q"));
        assert!(ds.uservalue);
        assert_eq!(ds.gate("G$1").unwrap().symbol.name(), "NPN");

        let device = ds.device("").unwrap();
        assert_eq!(device.package, PackageRef::Resolved { name: "TO92".into() });
        assert_eq!(device.connects[0].pad, "1");
        let attr = device.technology("").unwrap().attribute("MF").unwrap();
        assert_eq!(attr.value.as_deref(), Some("ON"));
        assert!(!attr.constant);
    }

    #[test]
    fn test_missing_package_degrades() {
        let library = parse_library(&parse_xml_str(LIBRARY).unwrap()).unwrap();
        let device = library.device_set("BC547").unwrap().device("SMD").unwrap();
        assert_eq!(
            device.package,
            PackageRef::Placeholder {
                requested: Some("SOT23".into())
            }
        );
        assert!(library.device_package(device).is_placeholder());
    }

    #[test]
    fn test_duplicate_package_is_an_error() {
        let xml = r#"<library><packages>
            <package name="A"/><package name="A"/>
        </packages></library>"#;
        let err = parse_library(&parse_xml_str(xml).unwrap()).unwrap_err();
        assert!(matches!(err, EagleError::DuplicateName { kind: "package", .. }));
    }

    #[test]
    fn test_duplicate_technology_attribute_is_an_error() {
        let xml = r#"<technology name="">
            <attribute name="MF" value="ON"/>
            <attribute name="MF" value="TI"/>
        </technology>"#;
        let err = parse_technology(&parse_xml_str(xml).unwrap()).unwrap_err();
        assert!(matches!(err, EagleError::DuplicateName { kind: "attribute", ref name } if name == "MF"));
    }
}
