use anyhow::{Result, bail};
use drill::Console;
use drill::domain::constants::PAGERDUTY_DIRECT;
use drill::integrations::CREDENTIAL_PROVIDERS;

/// Splits `field=value`. The value may itself contain `=`.
///
/// # Errors
/// Returns an error when there is no `=` or the field name is empty.
pub fn parse_field(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => bail!("Expected `field=value`, got `{raw}`"),
    }
}

/// Prints the stored fields of `provider`, secrets masked.
///
/// # Errors
/// Returns an error for unknown providers.
pub fn show_credentials(console: &Console, provider: &str) -> Result<()> {
    ensure_known(provider)?;
    let fields = console.credentials().masked(provider);
    if fields.is_empty() {
        println!("ℹ️ No credentials stored for '{provider}'.");
        return Ok(());
    }

    let state =
        if console.credentials().is_configured(provider) { "configured" } else { "incomplete" };
    println!("{provider} ({state})");
    for (field, value) in fields {
        println!("  {field:<20} {value}");
    }
    Ok(())
}

/// # Errors
/// Returns an error for malformed pairs, unknown providers or fields, or if saving fails.
pub fn set_credentials(console: &Console, provider: &str, raw: &[String]) -> Result<()> {
    let fields = raw.iter().map(|pair| parse_field(pair)).collect::<Result<Vec<_>>>()?;
    console.credentials().set_fields(provider, fields)?;
    println!("✅ Saved {provider} credentials.");
    show_credentials(console, provider)
}

/// # Errors
/// Returns an error for unknown providers or if the removal cannot be persisted.
pub fn clear_credentials(console: &Console, provider: &str) -> Result<()> {
    console.credentials().clear(provider)?;
    println!("✅ Cleared {provider} credentials.");
    Ok(())
}

fn ensure_known(provider: &str) -> Result<()> {
    if provider == PAGERDUTY_DIRECT || CREDENTIAL_PROVIDERS.contains(&provider) {
        return Ok(());
    }
    bail!("Unknown provider '{provider}'. Known: {}", CREDENTIAL_PROVIDERS.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_first_equals_sign() {
        assert_eq!(parse_field("api_key=abc").unwrap(), ("api_key", "abc"));
        assert_eq!(parse_field("url=https://x.example.com/?a=b").unwrap().1, "https://x.example.com/?a=b");
        assert_eq!(parse_field("api_key=").unwrap(), ("api_key", ""));
    }

    #[test]
    fn rejects_pairs_without_a_field() {
        assert!(parse_field("api_key").is_err());
        assert!(parse_field("=abc").is_err());
    }

    #[test]
    fn direct_alias_is_known() {
        assert!(ensure_known("pagerduty_direct").is_ok());
        assert!(ensure_known("grafana").is_ok());
        assert!(ensure_known("pingdom").is_err());
    }
}
