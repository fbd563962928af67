use drill_derive::drill_error;
use std::borrow::Cow;

#[drill_error]
pub enum DemoError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Not configured{}: {message}", format_context(.context))]
    MissingCredentials { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<Vec<u8>, DemoError> {
    std::fs::read("/definitely/not/here").context("reading snapshot")
}

fn reject() -> Result<(), DemoError> {
    Err(DemoError::from("boom")).context("while rejecting")
}

fn main() {
    let err = read_missing().unwrap_err();
    assert!(err.to_string().starts_with("I/O failure (reading snapshot)"));

    let err = reject().unwrap_err();
    assert_eq!(err.to_string(), "Internal error (while rejecting): boom");

    let owned: DemoError = String::from("owned").into();
    assert!(matches!(owned, DemoError::Internal { .. }));

    let io: DemoError = std::io::Error::other("disk").into();
    assert!(matches!(io, DemoError::Io { context: None, .. }));
}
