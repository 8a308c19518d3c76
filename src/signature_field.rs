//! Signature field placements.
//!
//! A [`SignatureField`] places a visible signature on a page. A
//! [`DocSignatureField`] is the same placement bound to one signer of the
//! transaction.

use crate::error::Result;
use crate::validation::{FieldRule, Schema, Validate};
use crate::xmlrpc::{StructBuilder, Value};
use serde::{Deserialize, Deserializer, de};

/// Options for [`SignatureField::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureFieldOptions {
    /// Name of an existing signature field in the PDF. When the document
    /// holds a field with this name the coordinates are ignored.
    pub name: Option<String>,
    /// Page number, starting at 1. `-1` is the last page.
    pub page: Option<i32>,
    /// Horizontal coordinate on the page.
    pub x: Option<i32>,
    /// Vertical coordinate on the page.
    pub y: Option<i32>,
}

/// A validated signature placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SignatureFieldOptions")]
pub struct SignatureField {
    name: Option<String>,
    page: i32,
    x: i32,
    y: i32,
}

impl SignatureField {
    /// Page value pointing at the last page of the document.
    pub const LAST_PAGE: i32 = -1;

    /// Validate the options and build the field.
    ///
    /// ```rust
    /// use universign::{SignatureField, SignatureFieldOptions};
    ///
    /// let field = SignatureField::new(SignatureFieldOptions {
    ///     page: Some(SignatureField::LAST_PAGE),
    ///     x: Some(100),
    ///     y: Some(200),
    ///     ..Default::default()
    /// }).unwrap();
    /// assert!(field.name().is_none());
    /// ```
    pub fn new(options: SignatureFieldOptions) -> Result<Self> {
        Self::validate(options)
    }

    /// Name of the existing PDF field, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Page number, starting at 1. [`Self::LAST_PAGE`] is the last page.
    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    fn members(&self, builder: StructBuilder) -> StructBuilder {
        builder
            .optional("name", self.name.as_deref())
            .member("page", self.page)
            .member("x", self.x)
            .member("y", self.y)
    }
}

impl Validate for SignatureField {
    const ENTITY: &'static str = "SignatureField";
    type Options = SignatureFieldOptions;

    fn validate(options: SignatureFieldOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            name: schema.optional("name", options.name)?,
            page: schema.required("page", options.page)?,
            x: schema.required("x", options.x)?,
            y: schema.required("y", options.y)?,
        })
    }
}

impl TryFrom<SignatureFieldOptions> for SignatureField {
    type Error = crate::error::UniversignError;

    fn try_from(options: SignatureFieldOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl FieldRule for SignatureField {}

impl From<&SignatureField> for Value {
    fn from(field: &SignatureField) -> Self {
        field.members(StructBuilder::new()).build()
    }
}

/// Options specific to [`DocSignatureField`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSignatureFieldOptions {
    /// Index of the signer using this field, starting at 0.
    pub signer_index: Option<i32>,
    /// Signature pattern. [`DocSignatureField::INVISIBLE_PATTERN`] hides the
    /// field in the PDF.
    pub pattern_name: Option<String>,
    /// Label printed on the signature page. Mandatory on the service side
    /// when a signer has several fields in the same document.
    pub label: Option<String>,
}

/// Flat JSON shape of a [`DocSignatureField`]: placement and signer options
/// side by side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocSignatureFieldInput {
    #[serde(flatten)]
    pub options: DocSignatureFieldOptions,
    #[serde(flatten)]
    pub field: SignatureFieldOptions,
}

/// A signature placement bound to a signer.
///
/// The placement is validated first; the signer options are only looked at
/// once it is known to be valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DocSignatureFieldInput")]
pub struct DocSignatureField {
    field: SignatureField,
    signer_index: i32,
    pattern_name: Option<String>,
    label: Option<String>,
}

impl DocSignatureField {
    /// Pattern name that makes the field invisible in the PDF.
    pub const INVISIBLE_PATTERN: &'static str = "invisible";

    /// Validate the placement, then the signer options, and build the field.
    pub fn new(options: DocSignatureFieldOptions, field: SignatureFieldOptions) -> Result<Self> {
        Self::validate(DocSignatureFieldInput { options, field })
    }

    /// The underlying placement.
    pub fn field(&self) -> &SignatureField {
        &self.field
    }

    pub fn name(&self) -> Option<&str> {
        self.field.name()
    }

    pub fn page(&self) -> i32 {
        self.field.page()
    }

    pub fn x(&self) -> i32 {
        self.field.x()
    }

    pub fn y(&self) -> i32 {
        self.field.y()
    }

    /// Index of the bound signer in the transaction, starting at 0.
    pub fn signer_index(&self) -> i32 {
        self.signer_index
    }

    pub fn pattern_name(&self) -> Option<&str> {
        self.pattern_name.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the field uses [`Self::INVISIBLE_PATTERN`].
    pub fn is_invisible(&self) -> bool {
        self.pattern_name() == Some(Self::INVISIBLE_PATTERN)
    }
}

impl Validate for DocSignatureField {
    const ENTITY: &'static str = "DocSignatureField";
    type Options = DocSignatureFieldInput;

    fn validate(input: DocSignatureFieldInput) -> Result<Self> {
        let field = SignatureField::validate(input.field)?;

        let schema = Schema::new(Self::ENTITY);
        let options = input.options;
        Ok(Self {
            field,
            pattern_name: schema.optional("patternName", options.pattern_name)?,
            label: schema.optional("label", options.label)?,
            signer_index: schema.required("signerIndex", options.signer_index)?,
        })
    }
}

impl TryFrom<DocSignatureFieldInput> for DocSignatureField {
    type Error = crate::error::UniversignError;

    fn try_from(input: DocSignatureFieldInput) -> Result<Self> {
        Self::validate(input)
    }
}

impl FieldRule for DocSignatureField {}

impl From<&DocSignatureField> for Value {
    fn from(field: &DocSignatureField) -> Self {
        field
            .field
            .members(StructBuilder::new())
            .member("signerIndex", field.signer_index)
            .optional("patternName", field.pattern_name.as_deref())
            .optional("label", field.label.as_deref())
            .build()
    }
}

/// A signature field attached to a document.
///
/// In a JSON options bag, an object carrying a `signerIndex` key is a
/// [`DocSignatureField`]; any other object is a plain [`SignatureField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentField {
    /// Placement bound to a signer.
    Signer(DocSignatureField),
    /// Plain placement.
    Placement(SignatureField),
}

impl DocumentField {
    /// The placement, whichever the variant.
    pub fn signature_field(&self) -> &SignatureField {
        match self {
            DocumentField::Signer(field) => field.field(),
            DocumentField::Placement(field) => field,
        }
    }
}

impl From<SignatureField> for DocumentField {
    fn from(field: SignatureField) -> Self {
        DocumentField::Placement(field)
    }
}

impl From<DocSignatureField> for DocumentField {
    fn from(field: DocSignatureField) -> Self {
        DocumentField::Signer(field)
    }
}

impl<'de> Deserialize<'de> for DocumentField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let members: serde_json::Map<String, serde_json::Value> =
            Deserialize::deserialize(deserializer)?;
        let signer_bound = members.contains_key("signerIndex");
        let object = serde_json::Value::Object(members);

        if signer_bound {
            DocSignatureField::deserialize(object)
                .map(DocumentField::Signer)
                .map_err(de::Error::custom)
        } else {
            SignatureField::deserialize(object)
                .map(DocumentField::Placement)
                .map_err(de::Error::custom)
        }
    }
}

impl FieldRule for DocumentField {}

impl From<&DocumentField> for Value {
    fn from(field: &DocumentField) -> Self {
        match field {
            DocumentField::Signer(field) => field.into(),
            DocumentField::Placement(field) => field.into(),
        }
    }
}
