use std::borrow::Cow;

#[drill_derive::drill_error]
pub enum IntegrationError {
    #[error("HTTP request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    /// The remote answered with a non-success status.
    #[error("{message}{}", format_context(.context))]
    Status { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    MissingCredentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Credential store error{}: {source}", format_context(.context))]
    Store { source: drill_store::StoreError, context: Option<Cow<'static, str>> },

    #[error("Serialization error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal integration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IntegrationError {
    pub(crate) fn status(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Status { message: message.into(), context: None }
    }

    pub(crate) fn missing(message: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingCredentials { message: message.into(), context: None }
    }
}
