use std::fmt;

/// Placeholder shown in the device column when a meter has no device id.
pub const DEVICE_PLACEHOLDER: &str = "-";

/// Classification of a meter row in an invoice page's reading table.
///
/// The known types are matched by case-insensitive substring against the
/// row's room/device label. Rows that match none of them but carry a real
/// device id fall back to a type derived from the label itself.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MeterType {
    /// Heat cost meter (kalorimetre)
    Kalorimetre,
    /// Hot water meter (sıcak su)
    SicakSu,
    /// Heat cost allocator (pay ölçer)
    PayOlcer,
    /// Cold water meter (soğuk su)
    SogukSu,
    /// Unrecognized label, carried title-cased
    Other(String),
}

impl fmt::Display for MeterType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MeterType::Kalorimetre => write!(f, "Kalorimetre"),
            MeterType::SicakSu => write!(f, "Sıcak Su"),
            MeterType::PayOlcer => write!(f, "Pay Ölçer"),
            MeterType::SogukSu => write!(f, "Soğuk Su"),
            MeterType::Other(label) => write!(f, "{}", label),
        }
    }
}

impl MeterType {
    /// Classifies a meter row from its room label and device id.
    ///
    /// Known types win regardless of the device id. An unknown label only
    /// produces a fallback type when the device id is present and not the
    /// "-" placeholder; otherwise the row carries no meter record and `None`
    /// is returned.
    pub fn classify(room: &str, device_no: &str) -> Option<MeterType> {
        let room_lower = room.to_lowercase();

        if room_lower.contains("kalorimetre") {
            Some(MeterType::Kalorimetre)
        } else if room_lower.contains("sıcak su") || room_lower.contains("sicak su") {
            Some(MeterType::SicakSu)
        } else if room_lower.contains("pay ölçer")
            || room_lower.contains("payölçer")
            || room_lower.contains("pay olcer")
        {
            Some(MeterType::PayOlcer)
        } else if room_lower.contains("soğuk su") || room_lower.contains("soguk su") {
            Some(MeterType::SogukSu)
        } else if !device_no.is_empty() && device_no != DEVICE_PLACEHOLDER {
            Some(MeterType::Other(title_case(room)))
        } else {
            None
        }
    }
}

/// Uppercases the first letter of every word and lowercases the rest, with
/// any non-alphabetic character acting as a word boundary.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
                at_word_start = false;
            } else {
                out.extend(ch.to_lowercase());
            }
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
