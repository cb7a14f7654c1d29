//! Asset size extraction from build-tool output
//!
//! The production build prints one line per generated asset, of the form
//! `<name>…assets/<prefix>-<fingerprint>.<ext>: <number> <unit>`. This module
//! scans that text for the first matching fragment and converts it to a byte
//! count. The pattern is a fixed external wire format: any drift in it is a
//! hard failure, never a silent default, because a wrong silent size would
//! corrupt the comparison.

use regex::Regex;

use crate::error::BundleDeltaError;

/// Multiplier for a recognized unit token. Units are decimal, as the build
/// tool reports them.
fn unit_factor(unit: &str) -> Option<u64> {
    match unit {
        "B" => Some(1),
        "KB" => Some(1000),
        "MB" => Some(1_000_000),
        _ => None,
    }
}

/// Find the byte size of the first asset matching `<prefix>…<extension>` in
/// a block of build output.
///
/// # Examples
///
/// ```
/// use bundle_delta::extract::extract_size;
///
/// let size = extract_size("vendor-abc123.js: 123.45 KB", "vendor", "js")?;
/// assert_eq!(size, 123_450);
/// # Ok::<(), bundle_delta::error::BundleDeltaError>(())
/// ```
///
/// # Errors
///
/// [`BundleDeltaError::SizeNotFound`] when no line matches (the error carries
/// the full output block), [`BundleDeltaError::UnknownUnit`] when a line
/// matches but its unit token is not one of `B`, `KB`, `MB`.
pub fn extract_size(
    output: &str,
    prefix: &str,
    extension: &str,
) -> Result<u64, BundleDeltaError> {
    let pattern = format!(
        r"{}.+\.{}: ([\d.]+) ([A-Za-z]+)",
        regex::escape(prefix),
        regex::escape(extension)
    );
    let re = Regex::new(&pattern).expect("escaped asset pattern is always a valid regex");

    let captures = re
        .captures(output)
        .ok_or_else(|| BundleDeltaError::SizeNotFound {
            asset: format!("{}.{}", prefix, extension),
            output: output.to_string(),
        })?;

    let number: f64 =
        captures[1]
            .parse()
            .map_err(|_| BundleDeltaError::SizeNotFound {
                asset: format!("{}.{}", prefix, extension),
                output: output.to_string(),
            })?;

    let unit = &captures[2];
    let factor = unit_factor(unit).ok_or_else(|| BundleDeltaError::UnknownUnit {
        unit: unit.to_string(),
    })?;

    Ok((number * factor as f64).round() as u64)
}
