//! Text-encoding repair
//!
//! Some providers occasionally return Portuguese text that was UTF-8 encoded
//! twice, so "Você" arrives as "VocÃª". The repair re-reads each char as a
//! Latin-1 byte and decodes the byte sequence as UTF-8. Repair is best
//! effort: if the text does not look mojibake'd, or the re-decode fails, the
//! caller keeps the original.

/// Try to undo one round of UTF-8 double encoding.
///
/// Returns `None` when the text shows no mojibake markers or cannot be
/// repaired; callers fall back to the input.
pub fn repair_mojibake(text: &str) -> Option<String> {
    // 'Ã' and 'Â' are the telltale lead bytes (0xC3/0xC2 read as Latin-1).
    if !text.chars().any(|c| c == 'Ã' || c == 'Â') {
        return None;
    }

    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = u32::from(c);
        if code > 0xFF {
            // Genuine non-Latin-1 chars mean this was never double-encoded.
            return None;
        }
        bytes.push(code as u8);
    }

    String::from_utf8(bytes).ok()
}
