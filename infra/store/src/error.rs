use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[drill_derive::drill_error]
pub enum StoreError {
    #[error("Store I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Store serialization failure{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
