use std::borrow::Cow;

#[drill_derive::drill_error]
pub enum ScenarioError {
    #[error("Scenario catalog I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Scenario catalog is malformed{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// Two scenarios share an id.
    #[error("Duplicate scenario id{}: {message}", format_context(.context))]
    DuplicateId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal scenario error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
