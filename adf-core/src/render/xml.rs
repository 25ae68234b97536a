use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::decode::{DecodeEvent, DecodedInstance};
use crate::error::Result;

/// Writes the tagged tree:
///
/// ```xml
/// <adf>
///     <instances>
///         <instance root="NAME">
///             <struct type="T" name="NAME" id="#0">
///                 <member name="count">3</member>
///                 <member name="items">#1</member>
///             </struct>
///             <array id="#1">1 2 3 </array>
///         </instance>
///     </instances>
/// </adf>
/// ```
pub struct XmlRenderer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlRenderer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 4),
        }
    }

    /// Write a complete document and hand back the sink.
    pub fn render(mut self, instances: &[DecodedInstance]) -> Result<W> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.writer.write_event(Event::Start(BytesStart::new("adf")))?;

        if !instances.is_empty() {
            self.writer
                .write_event(Event::Start(BytesStart::new("instances")))?;
            for instance in instances {
                let mut start = BytesStart::new("instance");
                start.push_attribute(("root", instance.name.as_str()));
                self.writer.write_event(Event::Start(start))?;
                self.write_events(&instance.events)?;
                self.writer
                    .write_event(Event::End(BytesEnd::new("instance")))?;
            }
            self.writer
                .write_event(Event::End(BytesEnd::new("instances")))?;
        }

        self.writer.write_event(Event::End(BytesEnd::new("adf")))?;
        Ok(self.writer.into_inner())
    }

    pub fn write_events(&mut self, events: &[DecodeEvent]) -> Result<()> {
        let mut iter = events.iter().peekable();
        while let Some(event) = iter.next() {
            match event {
                DecodeEvent::StructStart {
                    type_name,
                    name,
                    ref_id,
                } => {
                    let mut el = BytesStart::new("struct");
                    el.push_attribute(("type", type_name.as_str()));
                    if let Some(name) = name {
                        el.push_attribute(("name", name.as_str()));
                    }
                    if let Some(id) = ref_id {
                        el.push_attribute(("id", id.to_string().as_str()));
                    }
                    if matches!(iter.peek(), Some(DecodeEvent::StructEnd)) {
                        iter.next();
                        self.writer.write_event(Event::Empty(el))?;
                    } else {
                        self.writer.write_event(Event::Start(el))?;
                    }
                }
                DecodeEvent::StructEnd => {
                    self.writer.write_event(Event::End(BytesEnd::new("struct")))?;
                }
                DecodeEvent::Member { name, value } => {
                    let mut el = BytesStart::new("member");
                    el.push_attribute(("name", name.as_str()));
                    self.write_text_element(el, "member", value)?;
                }
                DecodeEvent::MemberStart { name } => {
                    let mut el = BytesStart::new("member");
                    el.push_attribute(("name", name.as_str()));
                    self.writer.write_event(Event::Start(el))?;
                }
                DecodeEvent::MemberEnd => {
                    self.writer.write_event(Event::End(BytesEnd::new("member")))?;
                }
                DecodeEvent::ArrayStart { ref_id } => {
                    let mut el = BytesStart::new("array");
                    if let Some(id) = ref_id {
                        el.push_attribute(("id", id.to_string().as_str()));
                    }
                    match iter.peek() {
                        Some(DecodeEvent::ArrayEnd) => {
                            iter.next();
                            self.writer.write_event(Event::Empty(el))?;
                        }
                        Some(DecodeEvent::ArrayValues(text)) => {
                            iter.next();
                            // values are the whole body of a primitive array
                            if matches!(iter.peek(), Some(DecodeEvent::ArrayEnd)) {
                                iter.next();
                            }
                            self.write_text_element(el, "array", text)?;
                        }
                        _ => {
                            self.writer.write_event(Event::Start(el))?;
                        }
                    }
                }
                DecodeEvent::ArrayValues(text) => {
                    self.writer.write_event(Event::Text(BytesText::new(text)))?;
                }
                DecodeEvent::ArrayEnd => {
                    self.writer.write_event(Event::End(BytesEnd::new("array")))?;
                }
            }
        }
        Ok(())
    }

    /// Always written as start/text/end, so empty text gives `<tag></tag>`.
    fn write_text_element(&mut self, el: BytesStart<'_>, tag: &str, text: &str) -> Result<()> {
        self.writer.write_event(Event::Start(el))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }
}
