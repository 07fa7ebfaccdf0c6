//! Comment sanitation for guest-submitted text.

/// Words masked out of guest comments and usernames, lowercase, with both
/// accented and plain spellings.
const BANNED_WORDS: &[&str] = &[
    "cặc",
    "lồn",
    "địt",
    "đù má mày",
    "đụ mẹ mày",
    "địt mẹ mày",
    "đù mẹ",
    "đụ mẹ",
    "má mày",
    "mẹ mày",
    "du ma may",
    "du me may",
    "dit me may",
    "du me",
    "ma may",
    "me may",
    "cac",
    "lon",
    "dit",
];

/// Replaces every banned word with an equal-length run of `*`,
/// case-insensitively. Longer phrases are listed first so they win over
/// their substrings.
pub fn mask_banned(input: &str) -> String {
    let mut result: Vec<char> = input.chars().collect();
    let lowered: Vec<char> = input.to_lowercase().chars().collect();

    // Lowercasing can change the char count for some scripts; fall back to
    // plain substring replacement when the two no longer line up.
    if lowered.len() != result.len() {
        let mut out = input.to_string();
        for banned in BANNED_WORDS {
            let mask: String = "*".repeat(banned.chars().count());
            out = out.replace(banned, &mask);
        }
        return out;
    }

    for banned in BANNED_WORDS {
        let needle: Vec<char> = banned.chars().collect();
        if needle.is_empty() || needle.len() > lowered.len() {
            continue;
        }
        let mut i = 0;
        while i + needle.len() <= lowered.len() {
            if lowered[i..i + needle.len()] == needle[..] {
                for slot in &mut result[i..i + needle.len()] {
                    *slot = '*';
                }
                i += needle.len();
            } else {
                i += 1;
            }
        }
    }

    result.into_iter().collect()
}
