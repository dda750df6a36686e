//! # Protocol Codec
//!
//! Pure translation between domain requests and the authority's XML.
//!
//! - Encoding: [`encode_new_declaration`], [`encode_update`],
//!   [`encode_correlation`]
//! - Decoding: [`decode_response`], [`decode_client_list`]
//!
//! Timestamps are written as UTC ISO-8601 with millisecond precision.
//! Decoded ids and amounts stay numeric.

pub mod decode;
pub mod encode;
pub mod xml_tree;

pub use decode::{
    AadeErrorDetail, AadeResponse, ClientDeclaration, ClientList, ResponseId, decode_client_list,
    decode_response,
};
pub use encode::{encode_correlation, encode_new_declaration, encode_update};
pub use xml_tree::{XmlElement, parse_document, to_array};

/// Prolog written before every request document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
