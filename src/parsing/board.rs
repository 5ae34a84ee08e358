//! Board parsing

use super::attrs::{attribute_map, description, flag, i32_or, optional_string, point, required, rotation};
use super::geometry::parse_geometry;
use super::schematic::{parse_classes, parse_embedded_libraries};
use crate::draw::geometry::Geometry;
use crate::error::{EagleError, Result};
use crate::model::{AutorouterPass, AutorouterRules, Board, ContactRef, DesignRules, Element, Library, Signal};
use crate::names::{collect_unique, NamedMap};
use crate::parse_xml::XmlNode;
use indexmap::IndexMap;
use tracing::debug;

pub(crate) fn parse_board(node: &XmlNode) -> Result<Board> {
    let libraries = parse_embedded_libraries(node)?;
    let classes = parse_classes(node)?;

    let plain = match node.child("plain") {
        Some(plain) => parse_geometry(plain)?,
        None => Geometry::default(),
    };

    let design_rules = match node.child("designrules") {
        Some(rules) => parse_design_rules(rules)?,
        None => DesignRules::default(),
    };
    let autorouter = match node.child("autorouter") {
        Some(rules) => parse_autorouter(rules)?,
        None => AutorouterRules::default(),
    };

    let mut elements = NamedMap::new("element");
    for element in node.select("elements/element") {
        let element = parse_element(element, &libraries)?;
        elements.insert_unique(element.name.clone(), element)?;
    }

    let mut signals = NamedMap::new("signal");
    for signal in node.select("signals/signal") {
        let signal = parse_signal(signal)?;
        signals.insert_unique(signal.name.clone(), signal)?;
    }

    debug!(
        libraries = libraries.len(),
        elements = elements.len(),
        signals = signals.len(),
        design_params = design_rules.params.len(),
        autorouter_passes = autorouter.passes.len(),
        "parsed board"
    );

    Ok(Board {
        description: description(node),
        plain,
        libraries,
        classes,
        design_rules,
        autorouter,
        elements,
        signals,
    })
}

/// `<param name=".." value=".."/>` children
fn params(node: &XmlNode) -> Result<IndexMap<String, String>> {
    let pairs = node
        .children_named("param")
        .map(|p| Ok((required(p, "name")?.to_string(), required(p, "value")?.to_string())))
        .collect::<Result<Vec<_>>>()?;
    collect_unique("param", pairs)
}

fn parse_design_rules(node: &XmlNode) -> Result<DesignRules> {
    let descriptions = collect_unique(
        "description language",
        node.children_named("description").map(|d| {
            let language = d.attr("language").unwrap_or("en").to_string();
            (language, d.text_content.clone())
        }),
    )?;
    Ok(DesignRules {
        name: optional_string(node, "name"),
        descriptions,
        params: params(node)?,
    })
}

fn parse_autorouter(node: &XmlNode) -> Result<AutorouterRules> {
    let passes = node
        .children_named("pass")
        .map(|pass| {
            Ok(AutorouterPass {
                name: required(pass, "name")?.to_string(),
                refer: optional_string(pass, "refer"),
                active: flag(pass, "active", true),
                params: params(pass)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(AutorouterRules { passes })
}

fn parse_element(node: &XmlNode, libraries: &NamedMap<Library>) -> Result<Element> {
    let name = required(node, "name")?;
    let library = required(node, "library")?;
    let package = required(node, "package")?;
    let scope = || format!("element {name}");

    let lib = libraries
        .get(library)
        .ok_or_else(|| EagleError::unresolved("library", library, scope()))?;
    if lib.package(package).is_none() {
        return Err(EagleError::unresolved("package", package, scope()));
    }

    Ok(Element {
        name: name.to_string(),
        library: library.to_string(),
        package: package.to_string(),
        value: optional_string(node, "value"),
        position: point(node, "x", "y")?,
        rotation: rotation(node)?,
        locked: flag(node, "locked", false),
        smashed: flag(node, "smashed", false),
        attributes: attribute_map(node)?,
    })
}

fn parse_signal(node: &XmlNode) -> Result<Signal> {
    let contact_refs = node
        .children_named("contactref")
        .map(|c| {
            Ok(ContactRef {
                element: required(c, "element")?.to_string(),
                pad: required(c, "pad")?.to_string(),
                route: optional_string(c, "route"),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Signal {
        name: required(node, "name")?.to_string(),
        class: i32_or(node, "class", 0)?,
        airwires_hidden: flag(node, "airwireshidden", false),
        contact_refs,
        geometry: parse_geometry(node)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::Primitive;
    use crate::parse_xml::parse_xml_str;

    #[test]
    fn test_design_rules_and_autorouter() {
        let node = parse_xml_str(
            r#"<board>
                <designrules name="default">
                    <description language="de">Standard</description>
                    <description language="en">Default rules</description>
                    <param name="mdWireWire" value="8mil"/>
                </designrules>
                <autorouter>
                    <pass name="Default"><param name="RoutingGrid" value="50mil"/></pass>
                    <pass name="Follow-me" refer="Default" active="no"/>
                </autorouter>
            </board>"#,
        )
        .unwrap();
        let board = parse_board(&node).unwrap();
        assert_eq!(board.design_rules.name.as_deref(), Some("default"));
        assert_eq!(board.design_rules.descriptions.len(), 2);
        assert_eq!(board.design_rules.param("mdWireWire"), Some("8mil"));
        let follow = board.autorouter.pass("Follow-me").unwrap();
        assert_eq!(follow.refer.as_deref(), Some("Default"));
        assert!(!follow.active);
        assert!(board.autorouter.pass("Default").unwrap().active);
    }

    #[test]
    fn test_repeated_rule_entries_are_errors() {
        let param = parse_xml_str(
            r#"<board><designrules>
                <param name="a" value="1"/>
                <param name="a" value="2"/>
            </designrules></board>"#,
        )
        .unwrap();
        assert!(matches!(
            parse_board(&param),
            Err(EagleError::DuplicateName { kind: "param", ref name }) if name == "a"
        ));

        let pass_param = parse_xml_str(
            r#"<board><autorouter><pass name="Default">
                <param name="Bus" value="1"/>
                <param name="Bus" value="0"/>
            </pass></autorouter></board>"#,
        )
        .unwrap();
        assert!(matches!(
            parse_board(&pass_param),
            Err(EagleError::DuplicateName { kind: "param", .. })
        ));

        let language = parse_xml_str(
            r#"<board><designrules>
                <description language="en">One</description>
                <description>Two</description>
            </designrules></board>"#,
        )
        .unwrap();
        assert!(matches!(
            parse_board(&language),
            Err(EagleError::DuplicateName { kind: "description language", ref name }) if name == "en"
        ));
    }

    #[test]
    fn test_signal_contents() {
        let node = parse_xml_str(
            r#"<signal name="GND" class="1">
                <contactref element="R1" pad="2"/>
                <wire x1="0" y1="0" x2="3" y2="0" width="0.4" layer="1"/>
                <via x="3" y="0" extent="1-16" drill="0.35"/>
            </signal>"#,
        )
        .unwrap();
        let signal = parse_signal(&node).unwrap();
        assert_eq!(signal.class, 1);
        assert_eq!(signal.contact_refs[0].element, "R1");
        assert!(matches!(signal.geometry.primitives()[1], Primitive::Via(_)));
    }

    #[test]
    fn test_element_with_unknown_package_is_fatal() {
        let node = parse_xml_str(
            r#"<board>
                <libraries><library name="lib"><packages><package name="0603"/></packages></library></libraries>
                <elements><element name="R1" library="lib" package="0805" x="0" y="0"/></elements>
            </board>"#,
        )
        .unwrap();
        assert!(matches!(
            parse_board(&node),
            Err(EagleError::UnresolvedReference { kind: "package", .. })
        ));
    }
}
