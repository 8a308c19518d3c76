//! Enumerations and response types shared by the request schema.
//!
//! Enumeration values are protocol-significant: the strings (and integers for
//! [`HandwrittenSignatureMode`]) are sent to the service exactly as listed.

use crate::error::{Result, UniversignError};
use crate::validation::FieldRule;
use crate::xmlrpc::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! protocol_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every permitted value, in protocol order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The protocol string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UniversignError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UniversignError::Validation {
                        entity: stringify!($name),
                        field: other.to_string(),
                        reason: format!(
                            "must be one of [{}]",
                            [$($value),+].join(", ")
                        ),
                    }),
                }
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::String(value.as_str().to_string())
            }
        }

        impl FieldRule for $name {}
    };
}

protocol_enum! {
    /// The type of a transaction document.
    DocumentType {
        /// A PDF to sign. Every document member except the SEPA data applies.
        Pdf => "pdf",
        /// A view-only PDF.
        PdfForPresentation => "pdf-for-presentation",
        /// A PDF any signer may refuse without cancelling the transaction.
        PdfOptional => "pdf-optional",
        /// No PDF is supplied; the service generates a SEPA mandate from the
        /// document's SEPA data.
        Sepa => "sepa",
    }
}

protocol_enum! {
    /// The certificate used to produce a signature, and therefore the kind
    /// of signature performed.
    CertificateType {
        /// Local certificate.
        Local => "local",
        /// Certified signature.
        Certified => "certified",
        /// Advanced signature, with the same requirements as a certified one.
        Advanced => "advanced",
        /// Simple signature.
        Simple => "simple",
    }
}

protocol_enum! {
    /// Interface language.
    Language {
        Bulgarian => "bg",
        Catalan => "ca",
        German => "de",
        English => "en",
        Spanish => "es",
        French => "fr",
        Italian => "it",
        Dutch => "nl",
        Polish => "pl",
        Portuguese => "pt",
        Romanian => "ro",
    }
}

protocol_enum! {
    /// How signers are chained during the signing process.
    ChainingMode {
        /// No invitation email is sent; the requester contacts each signer.
        None => "none",
        /// Signers receive an invitation email.
        Email => "email",
        /// Linked signature: all signers sign one after the other in the
        /// same browser session.
        Web => "web",
    }
}

protocol_enum! {
    /// The role of a transaction actor.
    Role {
        /// Views and signs the documents.
        Signer => "Signer",
        /// Only views the documents.
        Observer => "Observer",
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Pdf
    }
}

impl Default for CertificateType {
    fn default() -> Self {
        CertificateType::Simple
    }
}

impl Default for ChainingMode {
    fn default() -> Self {
        ChainingMode::Email
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Signer
    }
}

/// The mode enabling the handwritten signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum HandwrittenSignatureMode {
    /// Handwritten signature disabled.
    Disabled,
    /// Handwritten signature enabled.
    Enabled,
    /// Enabled only on touch interfaces.
    EnabledForTouchInterfaceOnly,
}

impl HandwrittenSignatureMode {
    /// Every permitted value, in protocol order.
    pub const ALL: &'static [HandwrittenSignatureMode] = &[
        HandwrittenSignatureMode::Disabled,
        HandwrittenSignatureMode::Enabled,
        HandwrittenSignatureMode::EnabledForTouchInterfaceOnly,
    ];

    /// The protocol integer for this mode.
    pub fn as_i32(&self) -> i32 {
        match self {
            HandwrittenSignatureMode::Disabled => 0,
            HandwrittenSignatureMode::Enabled => 1,
            HandwrittenSignatureMode::EnabledForTouchInterfaceOnly => 2,
        }
    }
}

impl TryFrom<i32> for HandwrittenSignatureMode {
    type Error = UniversignError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(HandwrittenSignatureMode::Disabled),
            1 => Ok(HandwrittenSignatureMode::Enabled),
            2 => Ok(HandwrittenSignatureMode::EnabledForTouchInterfaceOnly),
            other => Err(UniversignError::Validation {
                entity: "HandwrittenSignatureMode",
                field: other.to_string(),
                reason: "must be one of [0, 1, 2]".to_string(),
            }),
        }
    }
}

impl From<HandwrittenSignatureMode> for i32 {
    fn from(value: HandwrittenSignatureMode) -> Self {
        value.as_i32()
    }
}

impl From<HandwrittenSignatureMode> for Value {
    fn from(value: HandwrittenSignatureMode) -> Self {
        Value::Int(value.as_i32())
    }
}

impl FieldRule for HandwrittenSignatureMode {}

/// Result of `requester.requestTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    /// Transaction identifier, used by the follow-up calls.
    pub id: String,
    /// URL of the signature page for the first signer.
    pub url: String,
}

impl TryFrom<Value> for TransactionResponse {
    type Error = UniversignError;

    fn try_from(value: Value) -> Result<Self> {
        let id = value.require_str("id")?.to_string();
        let url = value.require_str("url")?.to_string();
        Ok(Self { id, url })
    }
}

/// A document returned by `requester.getDocuments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDocument {
    /// Document identifier, when the service provides one.
    pub id: Option<String>,
    /// File name of the document.
    pub file_name: Option<String>,
    /// Raw PDF bytes.
    pub content: Vec<u8>,
}

impl TryFrom<Value> for SignedDocument {
    type Error = UniversignError;

    fn try_from(value: Value) -> Result<Self> {
        let content = value
            .get("content")
            .and_then(Value::as_bytes)
            .ok_or_else(|| UniversignError::Decode("document has no content".to_string()))?
            .to_vec();

        Ok(Self {
            id: value.get("id").and_then(Value::as_str).map(str::to_string),
            file_name: value
                .get("fileName")
                .and_then(Value::as_str)
                .map(str::to_string),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_protocol_strings() {
        assert_eq!(DocumentType::Sepa.as_str(), "sepa");
        assert_eq!(DocumentType::PdfForPresentation.as_str(), "pdf-for-presentation");
        assert_eq!(Role::Observer.to_string(), "Observer");
        assert_eq!(Language::ALL.len(), 11);
        assert_eq!(ChainingMode::None.as_str(), "none");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DocumentType::default(), DocumentType::Pdf);
        assert_eq!(CertificateType::default(), CertificateType::Simple);
        assert_eq!(ChainingMode::default(), ChainingMode::Email);
        assert_eq!(Role::default(), Role::Signer);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ro".parse::<Language>().unwrap(), Language::Romanian);

        let err = "xx".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("must be one of"));

        // Role values are case sensitive on the wire
        assert!("signer".parse::<Role>().is_err());
    }

    #[test]
    fn test_handwritten_mode_serde() {
        let mode: HandwrittenSignatureMode = serde_json::from_str("2").unwrap();
        assert_eq!(mode, HandwrittenSignatureMode::EnabledForTouchInterfaceOnly);
        assert_eq!(serde_json::to_string(&mode).unwrap(), "2");

        assert!(serde_json::from_str::<HandwrittenSignatureMode>("3").is_err());
        assert!(serde_json::from_str::<HandwrittenSignatureMode>("\"1\"").is_err());
    }

    #[test]
    fn test_enum_deserialization_rejects_unknown() {
        assert!(serde_json::from_str::<CertificateType>("\"certified\"").is_ok());
        assert!(serde_json::from_str::<CertificateType>("\"qualified\"").is_err());
    }

    #[test]
    fn test_transaction_response_decoding() {
        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), Value::from("tx-1"));
        fields.insert("url".to_string(), Value::from("https://sign.example/tx-1"));

        let response = TransactionResponse::try_from(Value::Struct(fields)).unwrap();
        assert_eq!(response.id, "tx-1");
        assert_eq!(response.url, "https://sign.example/tx-1");

        assert!(TransactionResponse::try_from(Value::Nil).is_err());
    }

    #[test]
    fn test_signed_document_decoding() {
        let mut fields = BTreeMap::new();
        fields.insert("id".to_string(), Value::from("doc-1"));
        fields.insert("content".to_string(), Value::Base64(b"%PDF".to_vec()));

        let document = SignedDocument::try_from(Value::Struct(fields)).unwrap();
        assert_eq!(document.id.as_deref(), Some("doc-1"));
        assert!(document.file_name.is_none());
        assert_eq!(document.content, b"%PDF");
    }
}
