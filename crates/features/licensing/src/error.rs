use std::borrow::Cow;

/// Error types specific to the licensing feature.
///
/// Entitlement queries never fail; these cover persistence and parsing of user input.
#[drill_derive::drill_error]
pub enum LicenseError {
    /// The settings store rejected a read or write.
    #[error("License storage error{}: {source}", format_context(.context))]
    Store { source: drill_store::StoreError, context: Option<Cow<'static, str>> },

    #[error("License serialization error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Unknown plan or add-on keys, and other logic errors.
    #[error("Internal licensing error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
