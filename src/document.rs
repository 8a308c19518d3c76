//! Transaction documents.

use crate::error::{Result, UniversignError};
use crate::sepa::SEPAData;
use crate::signature_field::DocumentField;
use crate::types::DocumentType;
use crate::validation::{FieldRule, Schema, Validate};
use crate::xmlrpc::{StructBuilder, Value};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A simple metadata value attached to a document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Int(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<&MetaValue> for Value {
    fn from(value: &MetaValue) -> Self {
        match value {
            MetaValue::Bool(b) => Value::Bool(*b),
            MetaValue::Int(i) => Value::Int(*i),
            MetaValue::Double(d) => Value::Double(*d),
            MetaValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl FieldRule for BTreeMap<String, MetaValue> {}

/// Options for [`TransactionDocument::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDocumentOptions {
    /// Document type; the service treats an absent value as `pdf`.
    pub document_type: Option<DocumentType>,
    /// Raw PDF content. In a JSON bag this is a base64 string.
    #[serde(default, deserialize_with = "base64_content")]
    pub content: Option<Vec<u8>>,
    /// URL the service downloads the PDF from when no content is given.
    pub url: Option<String>,
    pub file_name: Option<String>,
    pub signature_fields: Option<Vec<DocumentField>>,
    /// Agreement checkbox texts. The last one relates to the signature
    /// field labels agreement.
    pub check_box_texts: Option<Vec<String>>,
    pub meta_data: Option<BTreeMap<String, MetaValue>>,
    /// Title used for display.
    pub title: Option<String>,
    /// Mandate data, required for `sepa` documents.
    #[serde(rename = "SEPAData", alias = "sepaData")]
    pub sepa_data: Option<SEPAData>,
}

fn base64_content<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|encoded| BASE64.decode(encoded).map_err(serde::de::Error::custom))
        .transpose()
}

/// A document of a transaction.
///
/// Unless it is a SEPA mandate, a document carries either its content or the
/// URL to download it from. A SEPA mandate carries its [`SEPAData`] instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TransactionDocumentOptions")]
pub struct TransactionDocument {
    document_type: Option<DocumentType>,
    content: Option<Vec<u8>>,
    url: Option<String>,
    file_name: String,
    signature_fields: Option<Vec<DocumentField>>,
    check_box_texts: Option<Vec<String>>,
    meta_data: Option<BTreeMap<String, MetaValue>>,
    title: Option<String>,
    sepa_data: Option<SEPAData>,
}

impl TransactionDocument {
    /// Validate the options and build the document.
    ///
    /// The content/url/SEPA rules are checked before any field rule, so a
    /// document missing both its source and its file name reports the
    /// missing source.
    ///
    /// ```rust
    /// use universign::{TransactionDocument, TransactionDocumentOptions};
    ///
    /// let document = TransactionDocument::new(TransactionDocumentOptions {
    ///     file_name: Some("contract.pdf".to_string()),
    ///     url: Some("https://example.com/contract.pdf".to_string()),
    ///     ..Default::default()
    /// }).unwrap();
    /// assert!(document.content().is_none());
    /// ```
    pub fn new(options: TransactionDocumentOptions) -> Result<Self> {
        Self::validate(options)
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    /// Raw PDF bytes, when the document is sent inline.
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Location the service downloads the PDF from.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// File name shown to signers.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn signature_fields(&self) -> Option<&[DocumentField]> {
        self.signature_fields.as_deref()
    }

    /// Texts of the check boxes the signer must tick.
    pub fn check_box_texts(&self) -> Option<&[String]> {
        self.check_box_texts.as_deref()
    }

    /// Caller metadata stored with the document.
    pub fn meta_data(&self) -> Option<&BTreeMap<String, MetaValue>> {
        self.meta_data.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn sepa_data(&self) -> Option<&SEPAData> {
        self.sepa_data.as_ref()
    }
}

impl Validate for TransactionDocument {
    const ENTITY: &'static str = "TransactionDocument";
    type Options = TransactionDocumentOptions;

    fn validate(options: TransactionDocumentOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);

        let is_sepa = options.document_type == Some(DocumentType::Sepa);
        let has_url = options.url.as_deref().is_some_and(|url| !url.is_empty());
        if !is_sepa && !has_url && options.content.is_none() {
            return Err(schema.business_rule(
                "You must define the \"content\" or the \"url\" of the PDF file to download",
            ));
        }
        if is_sepa && options.sepa_data.is_none() {
            return Err(schema.business_rule(
                "You must define the \"SEPAData\" since documentType is defined as SEPA",
            ));
        }

        Ok(Self {
            document_type: schema.optional("documentType", options.document_type)?,
            content: schema.optional("content", options.content)?,
            url: schema.optional("url", options.url)?,
            file_name: schema.required("fileName", options.file_name)?,
            signature_fields: schema.optional("signatureFields", options.signature_fields)?,
            check_box_texts: schema.optional("checkBoxTexts", options.check_box_texts)?,
            meta_data: schema.optional("metaData", options.meta_data)?,
            title: schema.optional("title", options.title)?,
            sepa_data: schema.optional("SEPAData", options.sepa_data)?,
        })
    }
}

impl TryFrom<TransactionDocumentOptions> for TransactionDocument {
    type Error = UniversignError;

    fn try_from(options: TransactionDocumentOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl FieldRule for TransactionDocument {}

impl From<&TransactionDocument> for Value {
    fn from(document: &TransactionDocument) -> Self {
        let signature_fields = document
            .signature_fields
            .as_ref()
            .map(|fields| fields.iter().map(Value::from).collect::<Vec<_>>());
        let meta_data = document.meta_data.as_ref().map(|entries| {
            Value::Struct(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            )
        });

        StructBuilder::new()
            .optional("documentType", document.document_type)
            .optional("content", document.content.clone().map(Value::Base64))
            .optional("url", document.url.as_deref())
            .member("fileName", document.file_name.as_str())
            .optional("signatureFields", signature_fields)
            .optional("checkBoxTexts", document.check_box_texts.clone())
            .optional("metaData", meta_data)
            .optional("title", document.title.as_deref())
            .optional("SEPAData", document.sepa_data.as_ref())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature_field::{SignatureField, SignatureFieldOptions};

    #[test]
    fn test_fails_without_url_nor_content() {
        let err = TransactionDocument::new(TransactionDocumentOptions {
            file_name: Some("test".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UniversignError::BusinessRule { .. }));
        assert!(err.to_string().contains("\"content\" or the \"url\""));
    }

    #[test]
    fn test_fails_without_sepa_data_for_sepa_type() {
        let err = TransactionDocument::new(TransactionDocumentOptions {
            file_name: Some("test".to_string()),
            document_type: Some(DocumentType::Sepa),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UniversignError::BusinessRule { .. }));
        assert!(err.to_string().contains("\"SEPAData\""));
    }

    #[test]
    fn test_business_rules_run_before_schema() {
        // fileName is missing too, but the source rule is reported first
        let err = TransactionDocument::new(TransactionDocumentOptions::default()).unwrap_err();
        assert!(matches!(err, UniversignError::BusinessRule { .. }));

        let err = TransactionDocument::new(TransactionDocumentOptions {
            url: Some("https://example.com/a.pdf".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "TransactionDocument - \"fileName\" is required"
        );
    }

    #[test]
    fn test_empty_url_is_not_a_source() {
        let err = TransactionDocument::new(TransactionDocumentOptions {
            file_name: Some("test".to_string()),
            url: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UniversignError::BusinessRule { .. }));
    }

    #[test]
    fn test_content_document_value() {
        let field = SignatureField::new(SignatureFieldOptions {
            page: Some(1),
            x: Some(0),
            y: Some(0),
            ..Default::default()
        })
        .unwrap();

        let mut meta = BTreeMap::new();
        meta.insert("contractId".to_string(), MetaValue::from(42));

        let document = TransactionDocument::new(TransactionDocumentOptions {
            content: Some(b"%PDF-1.4".to_vec()),
            file_name: Some("contract.pdf".to_string()),
            signature_fields: Some(vec![field.into()]),
            meta_data: Some(meta),
            ..Default::default()
        })
        .unwrap();

        assert!(document.document_type().is_none());
        let value = Value::from(&document);
        let members = value.as_struct().unwrap();
        assert_eq!(members.len(), 4);
        assert_eq!(value.get("content").and_then(Value::as_bytes), Some(&b"%PDF-1.4"[..]));
        assert_eq!(
            value.get("metaData").and_then(|m| m.get("contractId")),
            Some(&Value::Int(42))
        );
        assert_eq!(value.get("signatureFields").and_then(Value::as_array).map(<[Value]>::len), Some(1));
    }

    #[test]
    fn test_from_json() {
        let document = TransactionDocument::from_json(serde_json::json!({
            "documentType": "pdf-optional",
            "content": "JVBERg==",
            "fileName": "annex.pdf",
            "checkBoxTexts": ["I agree"],
            "metaData": { "ref": "A-1", "pages": 3, "signed": false },
            "unknownKey": "ignored"
        }))
        .unwrap();

        assert_eq!(document.document_type(), Some(DocumentType::PdfOptional));
        assert_eq!(document.content(), Some(&b"%PDF"[..]));
        let meta = document.meta_data().unwrap();
        assert_eq!(meta.get("pages"), Some(&MetaValue::Int(3)));
        assert_eq!(meta.get("signed"), Some(&MetaValue::Bool(false)));
    }

    #[test]
    fn test_from_json_keeps_signer_bound_fields() {
        let document = TransactionDocument::from_json(serde_json::json!({
            "url": "https://example.com/a.pdf",
            "fileName": "a.pdf",
            "signatureFields": [
                { "page": 1, "x": 0, "y": 0, "signerIndex": 1 },
                { "page": 2, "x": 0, "y": 0 }
            ]
        }))
        .unwrap();

        let fields = document.signature_fields().unwrap();
        assert!(matches!(&fields[0], DocumentField::Signer(field) if field.signer_index() == 1));
        assert!(matches!(fields[1], DocumentField::Placement(_)));
    }

    #[test]
    fn test_from_json_rejects_invalid_signer_bound_field() {
        for field in [
            serde_json::json!({ "page": 1, "x": 0, "y": 0, "signerIndex": "1" }),
            serde_json::json!({ "page": 1, "x": 0, "y": 0, "signerIndex": 0, "label": "" }),
        ] {
            let err = TransactionDocument::from_json(serde_json::json!({
                "url": "https://example.com/a.pdf",
                "fileName": "a.pdf",
                "signatureFields": [field]
            }))
            .unwrap_err();
            assert!(matches!(
                err,
                UniversignError::InvalidOptions {
                    entity: "TransactionDocument",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_from_json_names_nested_field_error() {
        let err = TransactionDocument::from_json(serde_json::json!({
            "url": "https://example.com/a.pdf",
            "fileName": "a.pdf",
            "signatureFields": [{ "x": 0, "y": 0 }]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("SignatureField - \"page\" is required"));
    }

    #[test]
    fn test_from_json_rejects_unknown_document_type() {
        let err = TransactionDocument::from_json(serde_json::json!({
            "documentType": "docx",
            "url": "https://example.com/a.docx",
            "fileName": "a.docx"
        }))
        .unwrap_err();
        assert!(matches!(err, UniversignError::InvalidOptions { .. }));
    }
}
