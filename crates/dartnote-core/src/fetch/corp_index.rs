use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::DartError;

/// One company in the DART corporation index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpEntry {
    pub corp_code: String,
    pub corp_name: String,
}

/// Unpack the `corpCode.xml` download (a zip holding `CORPCODE.xml`).
pub fn unzip_corp_index(bytes: &[u8]) -> Result<String, DartError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name("CORPCODE.xml")?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

#[derive(Clone, Copy)]
enum Field {
    Code,
    Name,
}

/// Parse `<list><corp_code>..</corp_code><corp_name>..</corp_name>..</list>`
/// entries out of the corporation index XML.
pub fn parse_corp_index(xml: &str) -> Result<Vec<CorpEntry>, DartError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut code: Option<String> = None;
    let mut name: Option<String> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader
            .read_event()
            .map_err(|e| DartError::Xml(e.to_string()))?
        {
            Event::Start(e) => match e.name().as_ref() {
                b"list" => {
                    code = None;
                    name = None;
                }
                b"corp_code" => field = Some(Field::Code),
                b"corp_name" => field = Some(Field::Name),
                _ => field = None,
            },
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| DartError::Xml(e.to_string()))?
                    .trim()
                    .to_string();
                match field {
                    Some(Field::Code) => code = Some(text),
                    Some(Field::Name) => name = Some(text),
                    None => {}
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"list" => {
                    if let (Some(code), Some(name)) = (code.take(), name.take()) {
                        entries.push(CorpEntry {
                            corp_code: code,
                            corp_name: name,
                        });
                    }
                }
                b"corp_code" | b"corp_name" => field = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

/// Exact company-name match, as the index holds many near-identical names.
pub fn find_exact<'a>(entries: &'a [CorpEntry], company: &str) -> Option<&'a CorpEntry> {
    let wanted = company.trim();
    entries.iter().find(|e| e.corp_name == wanted)
}
