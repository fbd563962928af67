use std::borrow::Cow;

#[drill_derive::drill_error]
pub enum ConsoleError {
    #[error("Settings store error{}: {source}", format_context(.context))]
    Store { source: drill_store::StoreError, context: Option<Cow<'static, str>> },

    #[error("Scenario catalog error{}: {source}", format_context(.context))]
    Scenario { source: drill_scenarios::ScenarioError, context: Option<Cow<'static, str>> },

    #[error("Integration error{}: {source}", format_context(.context))]
    Integration {
        source: drill_integrations::IntegrationError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal console error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
