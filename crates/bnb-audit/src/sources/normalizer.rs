/// Width of the zero-padded city account number in the business registry.
pub const ACCOUNT_NUMBER_WIDTH: usize = 9;

/// Canonicalizes a business-registry city account number so it compares
/// directly with a rental's business license number.
///
/// Keeps at most the first [`ACCOUNT_NUMBER_WIDTH`] characters and strips
/// leading zeros. Shorter inputs are used as-is.
///
/// ```
/// use bnb_audit::sources::normalize_account_number;
///
/// assert_eq!(normalize_account_number("000071766"), "71766");
/// assert_eq!(normalize_account_number("71766"), "71766");
/// ```
pub fn normalize_account_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let head = match trimmed.char_indices().nth(ACCOUNT_NUMBER_WIDTH) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };
    head.trim_start_matches('0').to_string()
}

/// Join key for a rental's business license number. Rentals already carry the
/// unpadded form; stray zero padding is tolerated so equality stays numeric.
pub fn normalize_license_number(raw: &str) -> &str {
    raw.trim().trim_start_matches('0')
}
