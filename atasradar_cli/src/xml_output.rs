use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Cursor;

use atasradar_lib::types::{Adhesion, Arp, ArpItem};

/// Singularize array field names for XML child elements.
fn singular(field: &str) -> &str {
    match field {
        "itens" => "item",
        "sources" => "source",
        _ => field,
    }
}

/// Element name for a JSON key. Display-row keys may contain spaces.
fn tag_name(key: &str) -> String {
    key.replace(' ', "_")
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        // Omit null fields entirely
        serde_json::Value::Null => {}
        serde_json::Value::Bool(b) => write_text(writer, tag, if *b { "true" } else { "false" })?,
        serde_json::Value::Number(n) => write_text(writer, tag, &n.to_string())?,
        serde_json::Value::String(s) => write_text(writer, tag, s)?,
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            let child_tag = singular(tag);
            for item in arr {
                write_value(writer, child_tag, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, &tag_name(key), val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

/// Serialize a slice of Serialize items into an XML string.
pub fn items_to_xml<T: Serialize>(
    root_tag: &str,
    item_tag: &str,
    items: &[T],
) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if items.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root_tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root_tag)))?;
        for item in items {
            let val = serde_json::to_value(item)?;
            write_value(&mut writer, item_tag, &val)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root_tag)))?;
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

pub fn arps_to_xml(arps: &[Arp]) -> anyhow::Result<String> {
    items_to_xml("atas", "ata", arps)
}

pub fn items_xml(items: &[ArpItem]) -> anyhow::Result<String> {
    items_to_xml("items", "item", items)
}

pub fn adhesions_to_xml(adhesions: &[Adhesion]) -> anyhow::Result<String> {
    items_to_xml("adhesions", "adhesion", adhesions)
}
