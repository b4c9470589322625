//! XML document codec
//!
//! The persisted document looks like:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <root>
//!   <row>
//!     <name>Ada</name>
//!     <lastname>Lovelace</lastname>
//!     <email>ada@example.com</email>
//!     <salary>100</salary>
//!     <phone>555</phone>
//!   </row>
//! </root>
//! ```
//!
//! Ids are never written; decode renumbers rows by position.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};

use super::errors::{StorageError, StorageResult};
use super::record::{number_records, Record, RecordFields};

/// Name of the document's root element
pub const ROOT_ELEMENT: &str = "root";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "row", default)]
    rows: Vec<RecordFields>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "root")]
struct DocumentRef<'a> {
    #[serde(rename = "row")]
    rows: Vec<&'a RecordFields>,
}

/// Decode raw document bytes into records numbered 1..N.
///
/// # Errors
///
/// Returns `StorageError::MalformedDocument` if the bytes are not UTF-8,
/// the root element is missing or misnamed, or a row lacks a field.
pub fn decode(bytes: &[u8]) -> StorageResult<Vec<Record>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| StorageError::malformed(format!("document is not valid UTF-8: {}", e)))?;

    check_root(text)?;

    let document: Document =
        quick_xml::de::from_str(text).map_err(|e| StorageError::malformed(e.to_string()))?;

    Ok(number_records(document.rows))
}

/// Encode records into a full document. The `id` of each record is dropped.
pub fn encode(records: &[Record]) -> StorageResult<Vec<u8>> {
    let document = DocumentRef {
        rows: records.iter().map(|record| &record.fields).collect(),
    };

    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;

    let mut output = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
    output.push_str(XML_DECLARATION);
    output.push('\n');
    output.push_str(&body);
    output.push('\n');

    Ok(output.into_bytes())
}

/// Encode an empty collection.
pub fn empty_document() -> StorageResult<Vec<u8>> {
    encode(&[])
}

/// The serde layer does not look at the root element's name, so check it
/// before handing the text over.
fn check_root(text: &str) -> StorageResult<()> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.name();
                if name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Ok(());
                }
                return Err(StorageError::malformed(format!(
                    "expected <{}> root element, found <{}>",
                    ROOT_ELEMENT,
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Eof) => {
                return Err(StorageError::malformed(format!(
                    "document has no <{}> element",
                    ROOT_ELEMENT
                )))
            }
            Ok(_) => {}
            Err(e) => {
                return Err(StorageError::malformed(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }
}
