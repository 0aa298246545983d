//! Sequential identifier generation for fund entities.
//!
//! Identifiers are a fixed prefix followed by a zero-padded counter
//! (`SH001`, `B0001`, ...). Generation is a pure function of the last
//! issued identifier; uniqueness holds only as long as the caller
//! supplies the true last id.

/// Identifier schemes used by the fund book, as `(prefix, width)` pairs.
pub const SHAREHOLDER_ID: (&str, usize) = ("SH", 3);
pub const BORROWING_ID: (&str, usize) = ("B", 4);
pub const REPAYMENT_ID: (&str, usize) = ("R", 4);
pub const DEPOSIT_ID: (&str, usize) = ("D", 4);
pub const INVESTMENT_ID: (&str, usize) = ("INV", 3);
pub const PENALTY_ID: (&str, usize) = ("PEN", 3);

/// Derives the next identifier in a sequence.
///
/// Strips `prefix` from `last`, parses the numeric remainder (treating a
/// missing or unparsable suffix as 0), increments, and re-pads to
/// `width` digits. Counters that outgrow `width` keep their natural
/// length rather than truncating.
pub fn next_id(last: Option<&str>, prefix: &str, width: usize) -> String {
    let current = last
        .and_then(|id| id.trim().strip_prefix(prefix))
        .and_then(|suffix| suffix.parse::<u64>().ok())
        .unwrap_or(0);
    format!("{}{:0>width$}", prefix, current + 1, width = width)
}

/// Parses the numeric suffix of an identifier, used to locate the last
/// issued id within a collection.
pub fn id_counter(id: &str, prefix: &str) -> Option<u64> {
    id.trim().strip_prefix(prefix)?.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_and_pads() {
        assert_eq!(next_id(Some("SH002"), "SH", 3), "SH003");
        assert_eq!(next_id(Some("B0019"), "B", 4), "B0020");
    }

    #[test]
    fn missing_last_id_starts_at_one() {
        assert_eq!(next_id(None, "SH", 3), "SH001");
    }

    #[test]
    fn unparsable_suffix_falls_back_to_one() {
        assert_eq!(next_id(Some("SH-old"), "SH", 3), "SH001");
        assert_eq!(next_id(Some("garbage"), "SH", 3), "SH001");
    }

    #[test]
    fn counter_outgrows_width_without_truncation() {
        assert_eq!(next_id(Some("SH999"), "SH", 3), "SH1000");
    }

    #[test]
    fn id_counter_extracts_suffix() {
        assert_eq!(id_counter("INV007", "INV"), Some(7));
        assert_eq!(id_counter("INV-x", "INV"), None);
    }
}
