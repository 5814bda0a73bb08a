// Turns a human-readable SNS domain into the account that owns it.

use solana_program::pubkey::Pubkey;

use crate::domain::connection::Connection;
use crate::error::{ImbibeError, LogOnError};

pub const SOL_SUFFIX: &str = ".sol";

/// Strips surrounding whitespace and a trailing `.sol`.
///
/// Returns `None` when nothing is left to look up.
pub fn normalize_domain(domain: &str) -> Option<&str> {
    let trimmed = domain.trim();
    let name = trimmed.strip_suffix(SOL_SUFFIX).unwrap_or(trimmed);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Resolves `domain` (with or without `.sol`) to its owner through `connection`.
///
/// Any failure is reported as `ResolutionFailure` carrying the domain exactly as it was
/// passed in.
pub async fn resolve_sns_domain(
    connection: &dyn Connection,
    domain: &str,
) -> Result<Pubkey, ImbibeError> {
    let result: Result<Pubkey, ImbibeError> = async {
        let name = normalize_domain(domain)
            .ok_or_else(|| ImbibeError::resolution(domain, "domain must not be empty"))?;

        match connection.lookup_owner(name).await {
            Ok(Some(owner)) => Ok(owner),
            Ok(None) => Err(ImbibeError::resolution(
                domain,
                format!("no owner registered for {}", name),
            )),
            Err(e) => Err(ImbibeError::resolution(domain, e)),
        }
    }
    .await;

    result.log_on_error("Error resolving SNS domain")
}
