//! Scrubbers for the noisy string fields carrier reports arrive with.

/// Parse a currency string into a float. Strips `$`, commas, quotes and
/// whitespace; a parenthesized value is negative. Unparsable input is 0.0,
/// never an error.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return -inner.trim().parse::<f64>().unwrap_or(0.0).abs();
    }
    s.parse().unwrap_or(0.0)
}

const MONTHS: &[(&str, u32)] = &[
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

fn iso(y: i32, m: u32, d: u32) -> Option<String> {
    chrono::NaiveDate::from_ymd_opt(y, m, d).map(|dt| dt.format("%Y-%m-%d").to_string())
}

fn parse_mdy(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].trim().parse().ok()?;
    let d: u32 = parts[1].trim().parse().ok()?;
    let y: i32 = parts[2].trim().parse().ok()?;
    iso(y, m, d)
}

fn parse_ymd(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    let y: i32 = parts[0].trim().parse().ok()?;
    if parts[0].trim().len() != 4 {
        return None;
    }
    let m: u32 = parts[1].trim().parse().ok()?;
    let d: u32 = parts[2].trim().parse().ok()?;
    iso(y, m, d)
}

fn parse_month_year(raw: &str) -> Option<String> {
    // MM/YYYY or YYYY-MM, day defaults to the 1st
    if let Some((a, b)) = raw.split_once('/') {
        let m: u32 = a.trim().parse().ok()?;
        let y: i32 = b.trim().parse().ok()?;
        if b.trim().len() == 4 {
            return iso(y, m, 1);
        }
        return None;
    }
    if let Some((a, b)) = raw.split_once('-') {
        if a.trim().len() == 4 {
            let y: i32 = a.trim().parse().ok()?;
            let m: u32 = b.trim().parse().ok()?;
            return iso(y, m, 1);
        }
    }
    None
}

fn parse_name_year(raw: &str) -> Option<String> {
    // "Nov 2025" / "November 2025", day defaults to the 1st
    let mut parts = raw.split_whitespace();
    let name = parts.next()?.to_uppercase();
    let y: i32 = parts.next()?.trim_matches(',').parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let m = MONTHS
        .iter()
        .find(|(abbr, _)| name.starts_with(abbr))
        .map(|(_, m)| *m)?;
    iso(y, m, 1)
}

/// Last-resort calendar formats seen in the wild across carrier exports.
const FALLBACK_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%m-%d-%Y", "%d %b %Y"];

fn parse_fallback(raw: &str) -> Option<String> {
    for fmt in FALLBACK_FORMATS {
        if let Ok(dt) = chrono::NaiveDate::parse_from_str(raw, fmt) {
            return Some(dt.format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// Normalize a billing-cycle label into an ISO date. Cycle strings are not
/// validated calendar dates; `None` means "date unknown", never an error.
pub fn parse_cycle_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_mdy(raw)
        .or_else(|| parse_ymd(raw))
        .or_else(|| parse_month_year(raw))
        .or_else(|| parse_name_year(raw))
        .or_else(|| parse_fallback(raw))
}

/// Pull a 10-digit service number out of an account identifier field.
/// Carriers pad these with prefixes, dashes and suffix codes; an 11-digit
/// number starting with 1 carries the US country code, which is not part of
/// the MDN. Fewer than ten digits means the row is unusable.
pub fn extract_mdn(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    digits.truncate(10);
    if digits.len() == 10 {
        Some(digits)
    } else {
        None
    }
}

/// Trim a customer name and drop the stray trailing commas some exports
/// leave behind ("DOE, JANE,,").
pub fn clean_customer(raw: &str) -> String {
    raw.trim().trim_end_matches(',').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("$1,234.50"), 1234.50);
        assert_eq!(parse_amount("\"500.00\""), 500.0);
        assert_eq!(parse_amount("  -42.50  "), -42.5);
        assert_eq!(parse_amount("0"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("not_a_number"), 0.0);
    }

    #[test]
    fn test_parse_amount_parenthesized_negatives() {
        assert_eq!(parse_amount("(12.00)"), -12.0);
        assert_eq!(parse_amount("($1,234.56)"), -1234.56);
        assert_eq!(parse_amount("\"(50.00)\""), -50.0);
    }

    #[test]
    fn test_parse_cycle_date_full_dates() {
        assert_eq!(parse_cycle_date("11/15/2025"), Some("2025-11-15".to_string()));
        assert_eq!(parse_cycle_date("2025-11-15"), Some("2025-11-15".to_string()));
    }

    #[test]
    fn test_parse_cycle_date_month_year() {
        assert_eq!(parse_cycle_date("11/2025"), Some("2025-11-01".to_string()));
        assert_eq!(parse_cycle_date("2025-11"), Some("2025-11-01".to_string()));
        assert_eq!(parse_cycle_date("Nov 2025"), Some("2025-11-01".to_string()));
        assert_eq!(parse_cycle_date("November 2025"), Some("2025-11-01".to_string()));
    }

    #[test]
    fn test_parse_cycle_date_fallback_formats() {
        assert_eq!(parse_cycle_date("November 3, 2025"), Some("2025-11-03".to_string()));
        assert_eq!(parse_cycle_date("03 Nov 2025"), Some("2025-11-03".to_string()));
    }

    #[test]
    fn test_parse_cycle_date_unknown() {
        assert_eq!(parse_cycle_date("not a date"), None);
        assert_eq!(parse_cycle_date(""), None);
        assert_eq!(parse_cycle_date("13/2025"), None); // month 13
        assert_eq!(parse_cycle_date("02/30/2025"), None); // Feb 30
    }

    #[test]
    fn test_extract_mdn() {
        assert_eq!(extract_mdn("12025551234"), Some("2025551234".to_string()));
        assert_eq!(extract_mdn("202-555-1234"), Some("2025551234".to_string()));
        assert_eq!(extract_mdn("MDN: (202) 555-1234 / SUB01"), Some("2025551234".to_string()));
        assert_eq!(extract_mdn("555-1234"), None);
        assert_eq!(extract_mdn(""), None);
    }

    #[test]
    fn test_clean_customer() {
        assert_eq!(clean_customer("  Jane Doe  "), "Jane Doe");
        assert_eq!(clean_customer("DOE, JANE,,"), "DOE, JANE");
        assert_eq!(clean_customer("ACME WIRELESS,"), "ACME WIRELESS");
    }
}
