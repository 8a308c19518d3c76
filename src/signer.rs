//! Transaction signers.

use crate::error::{Result, UniversignError};
use crate::types::{CertificateType, Language, Role};
use crate::validation::{FieldRule, Schema, Validate};
use crate::xmlrpc::{StructBuilder, Value};
use serde::Deserialize;

/// Options for [`TransactionSigner::new`].
///
/// Redirection URLs fall back, on the service side, to the transaction
/// values and then to the service defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSignerOptions {
    pub email_address: Option<String>,
    /// Mandatory on the service side for a self-signed certificate.
    pub firstname: Option<String>,
    /// Mandatory on the service side for a self-signed certificate.
    pub lastname: Option<String>,
    pub organization: Option<String>,
    /// Signer profile, set up by the service operator.
    pub profile: Option<String>,
    /// Mobile number in international format, without the leading `+`.
    pub phone_num: Option<String>,
    pub language: Option<Language>,
    pub birth_date: Option<String>,
    /// External identifier of the signer within the organization.
    pub universign_id: Option<String>,
    pub role: Option<Role>,
    #[serde(rename = "successURL")]
    pub success_url: Option<String>,
    #[serde(rename = "cancelURL")]
    pub cancel_url: Option<String>,
    #[serde(rename = "failURL")]
    pub fail_url: Option<String>,
    pub certificate_type: Option<CertificateType>,
}

/// A signer or observer of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TransactionSignerOptions")]
pub struct TransactionSigner {
    email_address: String,
    firstname: Option<String>,
    lastname: Option<String>,
    organization: Option<String>,
    profile: Option<String>,
    phone_num: Option<String>,
    language: Option<Language>,
    birth_date: Option<String>,
    universign_id: Option<String>,
    role: Option<Role>,
    success_url: Option<String>,
    cancel_url: Option<String>,
    fail_url: Option<String>,
    certificate_type: Option<CertificateType>,
}

impl TransactionSigner {
    /// Validate the options and build the signer. Only the email address is
    /// mandatory; its format is left to the service.
    pub fn new(options: TransactionSignerOptions) -> Result<Self> {
        Self::validate(options)
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn firstname(&self) -> Option<&str> {
        self.firstname.as_deref()
    }

    pub fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Name of a signer profile set up by Universign, if any.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Mobile number receiving the SMS one-time password.
    pub fn phone_num(&self) -> Option<&str> {
        self.phone_num.as_deref()
    }

    /// Language of the signing interface and e-mails.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Birth date as sent to the service, used for identity checks.
    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }

    /// External identifier the organization gives this signer.
    pub fn universign_id(&self) -> Option<&str> {
        self.universign_id.as_deref()
    }

    /// Signer or observer. Observers receive notifications but do not sign.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Redirect URL after a successful signature.
    pub fn success_url(&self) -> Option<&str> {
        self.success_url.as_deref()
    }

    /// Redirect URL when the signer cancels.
    pub fn cancel_url(&self) -> Option<&str> {
        self.cancel_url.as_deref()
    }

    /// Redirect URL when the signature fails.
    pub fn fail_url(&self) -> Option<&str> {
        self.fail_url.as_deref()
    }

    /// Certificate level used for this signer.
    pub fn certificate_type(&self) -> Option<CertificateType> {
        self.certificate_type
    }
}

impl Validate for TransactionSigner {
    const ENTITY: &'static str = "TransactionSigner";
    type Options = TransactionSignerOptions;

    fn validate(options: TransactionSignerOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            email_address: schema.required("emailAddress", options.email_address)?,
            firstname: schema.optional("firstname", options.firstname)?,
            lastname: schema.optional("lastname", options.lastname)?,
            organization: schema.optional("organization", options.organization)?,
            profile: schema.optional("profile", options.profile)?,
            phone_num: schema.optional("phoneNum", options.phone_num)?,
            language: schema.optional("language", options.language)?,
            birth_date: schema.optional("birthDate", options.birth_date)?,
            universign_id: schema.optional("universignId", options.universign_id)?,
            role: schema.optional("role", options.role)?,
            success_url: schema.optional("successURL", options.success_url)?,
            cancel_url: schema.optional("cancelURL", options.cancel_url)?,
            fail_url: schema.optional("failURL", options.fail_url)?,
            certificate_type: schema.optional("certificateType", options.certificate_type)?,
        })
    }
}

impl TryFrom<TransactionSignerOptions> for TransactionSigner {
    type Error = UniversignError;

    fn try_from(options: TransactionSignerOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl FieldRule for TransactionSigner {}

impl From<&TransactionSigner> for Value {
    fn from(signer: &TransactionSigner) -> Self {
        StructBuilder::new()
            .member("emailAddress", signer.email_address.as_str())
            .optional("firstname", signer.firstname.as_deref())
            .optional("lastname", signer.lastname.as_deref())
            .optional("organization", signer.organization.as_deref())
            .optional("profile", signer.profile.as_deref())
            .optional("phoneNum", signer.phone_num.as_deref())
            .optional("language", signer.language)
            .optional("birthDate", signer.birth_date.as_deref())
            .optional("universignId", signer.universign_id.as_deref())
            .optional("role", signer.role)
            .optional("successURL", signer.success_url.as_deref())
            .optional("cancelURL", signer.cancel_url.as_deref())
            .optional("failURL", signer.fail_url.as_deref())
            .optional("certificateType", signer.certificate_type)
            .build()
    }
}
