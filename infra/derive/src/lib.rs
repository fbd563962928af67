#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the Drill Console workspace.
//!
//! Today this crate carries a single attribute, [`macro@drill_error`], which wires an error
//! enum into `thiserror` and generates the `.context(..)` plumbing every slice relies on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro that turns an enum into a slice error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` on the enum (do not derive them yourself).
/// * `<ErrorName>Ext` trait with `.context(..)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a `source`.
/// * `From<SourceError>` for every variant with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper rendering ` (context)` for use in `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a `source` field must also have `context: Option<Cow<'static, str>>`.
/// 4. Two variants must not wrap the same source type.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[drill_derive::drill_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("reading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn drill_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
