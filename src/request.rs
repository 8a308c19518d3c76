//! The transaction request, root of the request schema.
//!
//! A [`TransactionRequest`] is the whole unit of work sent with
//! `requester.requestTransaction`: at least one signer, at least one document,
//! and the transaction-wide options.

use crate::document::TransactionDocument;
use crate::error::{Result, UniversignError};
use crate::signer::TransactionSigner;
use crate::types::{CertificateType, ChainingMode, HandwrittenSignatureMode, Language};
use crate::validation::{Schema, Validate};
use crate::xmlrpc::{StructBuilder, Value};
use serde::Deserialize;

/// Options for [`TransactionRequest::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequestOptions {
    /// Signature profile to use.
    pub profile: Option<String>,
    /// Requester-set unique identifier of the transaction.
    pub custom_id: Option<String>,
    /// Must hold at least one signer.
    pub signers: Option<Vec<TransactionSigner>>,
    /// Must hold at least one document.
    pub documents: Option<Vec<TransactionDocument>>,
    /// Invite the first signer by email as soon as the transaction is
    /// requested. False by default.
    pub must_contact_first_signer: Option<bool>,
    /// Send the signed documents to every signer. False by default.
    pub final_doc_sent: Option<bool>,
    /// Send the signed documents to the requester. False by default.
    pub final_doc_requester_sent: Option<bool>,
    /// Send the signed documents to the observers. Defaults to
    /// `final_doc_sent`.
    pub final_doc_observer_sent: Option<bool>,
    pub description: Option<String>,
    pub certificate_type: Option<CertificateType>,
    pub language: Option<Language>,
    pub handwritten_signature_mode: Option<HandwrittenSignatureMode>,
    pub chaining_mode: Option<ChainingMode>,
    /// Addresses copied on every final document email. Only honored when
    /// `final_doc_sent` is true.
    #[serde(rename = "finalDocCCeMails")]
    pub final_doc_cc_emails: Option<Vec<String>>,
    /// Register unknown signers in two steps.
    pub two_steps_registration: Option<bool>,
}

/// A validated transaction request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TransactionRequestOptions")]
pub struct TransactionRequest {
    profile: Option<String>,
    custom_id: Option<String>,
    signers: Vec<TransactionSigner>,
    documents: Vec<TransactionDocument>,
    must_contact_first_signer: Option<bool>,
    final_doc_sent: Option<bool>,
    final_doc_requester_sent: Option<bool>,
    final_doc_observer_sent: Option<bool>,
    description: Option<String>,
    certificate_type: Option<CertificateType>,
    language: Option<Language>,
    handwritten_signature_mode: Option<HandwrittenSignatureMode>,
    chaining_mode: Option<ChainingMode>,
    final_doc_cc_emails: Option<Vec<String>>,
    two_steps_registration: Option<bool>,
}

impl TransactionRequest {
    /// Validate the options and build the request.
    ///
    /// ```rust
    /// use universign::{
    ///     TransactionDocument, TransactionDocumentOptions, TransactionRequest,
    ///     TransactionRequestOptions, TransactionSigner, TransactionSignerOptions,
    /// };
    ///
    /// # fn main() -> universign::Result<()> {
    /// let request = TransactionRequest::new(TransactionRequestOptions {
    ///     signers: Some(vec![TransactionSigner::new(TransactionSignerOptions {
    ///         email_address: Some("john@doe.com".to_string()),
    ///         ..Default::default()
    ///     })?]),
    ///     documents: Some(vec![TransactionDocument::new(TransactionDocumentOptions {
    ///         url: Some("https://example.com/contract.pdf".to_string()),
    ///         file_name: Some("contract.pdf".to_string()),
    ///         ..Default::default()
    ///     })?]),
    ///     must_contact_first_signer: Some(true),
    ///     ..Default::default()
    /// })?;
    /// assert_eq!(request.signers().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(options: TransactionRequestOptions) -> Result<Self> {
        Self::validate(options)
    }

    /// Name of the signature profile to use, if any.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Caller-supplied transaction identifier.
    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    pub fn signers(&self) -> &[TransactionSigner] {
        &self.signers
    }

    pub fn documents(&self) -> &[TransactionDocument] {
        &self.documents
    }

    /// Whether the first signer is invited by e-mail as soon as the transaction is requested.
    pub fn must_contact_first_signer(&self) -> Option<bool> {
        self.must_contact_first_signer
    }

    /// Whether signers receive the signed documents.
    pub fn final_doc_sent(&self) -> Option<bool> {
        self.final_doc_sent
    }

    /// Whether the requester receives the signed documents.
    pub fn final_doc_requester_sent(&self) -> Option<bool> {
        self.final_doc_requester_sent
    }

    /// Whether observers receive the signed documents.
    pub fn final_doc_observer_sent(&self) -> Option<bool> {
        self.final_doc_observer_sent
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn certificate_type(&self) -> Option<CertificateType> {
        self.certificate_type
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// When a handwritten signature is collected.
    pub fn handwritten_signature_mode(&self) -> Option<HandwrittenSignatureMode> {
        self.handwritten_signature_mode
    }

    /// How signers are chained after one another.
    pub fn chaining_mode(&self) -> Option<ChainingMode> {
        self.chaining_mode
    }

    /// Extra addresses receiving the signed documents.
    pub fn final_doc_cc_emails(&self) -> Option<&[String]> {
        self.final_doc_cc_emails.as_deref()
    }

    /// Whether signer registration is split from signing.
    pub fn two_steps_registration(&self) -> Option<bool> {
        self.two_steps_registration
    }
}

impl Validate for TransactionRequest {
    const ENTITY: &'static str = "TransactionRequest";
    type Options = TransactionRequestOptions;

    fn validate(options: TransactionRequestOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            profile: schema.optional("profile", options.profile)?,
            custom_id: schema.optional("customId", options.custom_id)?,
            signers: schema.non_empty("signers", options.signers)?,
            documents: schema.non_empty("documents", options.documents)?,
            must_contact_first_signer: schema
                .optional("mustContactFirstSigner", options.must_contact_first_signer)?,
            final_doc_sent: schema.optional("finalDocSent", options.final_doc_sent)?,
            final_doc_requester_sent: schema
                .optional("finalDocRequesterSent", options.final_doc_requester_sent)?,
            final_doc_observer_sent: schema
                .optional("finalDocObserverSent", options.final_doc_observer_sent)?,
            description: schema.optional("description", options.description)?,
            certificate_type: schema.optional("certificateType", options.certificate_type)?,
            language: schema.optional("language", options.language)?,
            handwritten_signature_mode: schema
                .optional("handwrittenSignatureMode", options.handwritten_signature_mode)?,
            chaining_mode: schema.optional("chainingMode", options.chaining_mode)?,
            final_doc_cc_emails: schema.optional("finalDocCCeMails", options.final_doc_cc_emails)?,
            two_steps_registration: schema
                .optional("twoStepsRegistration", options.two_steps_registration)?,
        })
    }
}

impl TryFrom<TransactionRequestOptions> for TransactionRequest {
    type Error = UniversignError;

    fn try_from(options: TransactionRequestOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl From<&TransactionRequest> for Value {
    fn from(request: &TransactionRequest) -> Self {
        let signers: Vec<Value> = request.signers.iter().map(Value::from).collect();
        let documents: Vec<Value> = request.documents.iter().map(Value::from).collect();

        StructBuilder::new()
            .optional("profile", request.profile.as_deref())
            .optional("customId", request.custom_id.as_deref())
            .member("signers", signers)
            .member("documents", documents)
            .optional("mustContactFirstSigner", request.must_contact_first_signer)
            .optional("finalDocSent", request.final_doc_sent)
            .optional("finalDocRequesterSent", request.final_doc_requester_sent)
            .optional("finalDocObserverSent", request.final_doc_observer_sent)
            .optional("description", request.description.as_deref())
            .optional("certificateType", request.certificate_type)
            .optional("language", request.language)
            .optional("handwrittenSignatureMode", request.handwritten_signature_mode)
            .optional("chainingMode", request.chaining_mode)
            .optional("finalDocCCeMails", request.final_doc_cc_emails.clone())
            .optional("twoStepsRegistration", request.two_steps_registration)
            .build()
    }
}
