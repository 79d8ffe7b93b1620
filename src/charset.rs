//! Character-set normalisation of display names before they are
//! embedded in game files.
//!
//! Data-driven and pure: a replacement table maps characters outside
//! the target repertoire to their closest representable form, and a
//! final guard substitutes `?` for anything the table missed, so the
//! file encoder can never fail downstream.

use encoding_rs::WINDOWS_1252;

/// The character repertoire a target game's engine can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Full Unicode target; names pass through unchanged.
    Utf8,
    /// Legacy 8-bit target (CK2 and other classic engines).
    Windows1252,
}

/// Closest windows-1252 forms for letters the table games commonly
/// need. Letters already in windows-1252 (š, ž, œ, the latin-1 block)
/// are not listed; they pass through.
const WINDOWS_1252_REPLACEMENTS: &[(char, &str)] = &[
    ('Ā', "A"),
    ('ā', "a"),
    ('Ă', "A"),
    ('ă', "a"),
    ('Ą', "A"),
    ('ą', "a"),
    ('Ć', "C"),
    ('ć', "c"),
    ('Č', "C"),
    ('č', "c"),
    ('Ď', "D"),
    ('ď', "d"),
    ('Đ', "D"),
    ('đ', "d"),
    ('Ē', "E"),
    ('ē', "e"),
    ('Ė', "E"),
    ('ė', "e"),
    ('Ę', "E"),
    ('ę', "e"),
    ('Ě', "E"),
    ('ě', "e"),
    ('Ğ', "G"),
    ('ğ', "g"),
    ('Ģ', "G"),
    ('ģ', "g"),
    ('Ī', "I"),
    ('ī', "i"),
    ('Į', "I"),
    ('į', "i"),
    ('İ', "I"),
    ('ı', "i"),
    ('Ķ', "K"),
    ('ķ', "k"),
    ('Ĺ', "L"),
    ('ĺ', "l"),
    ('Ļ', "L"),
    ('ļ', "l"),
    ('Ľ', "L"),
    ('ľ', "l"),
    ('Ł', "L"),
    ('ł', "l"),
    ('Ń', "N"),
    ('ń', "n"),
    ('Ņ', "N"),
    ('ņ', "n"),
    ('Ň', "N"),
    ('ň', "n"),
    ('Ō', "O"),
    ('ō', "o"),
    ('Ő', "Ö"),
    ('ő', "ö"),
    ('Ŕ', "R"),
    ('ŕ', "r"),
    ('Ŗ', "R"),
    ('ŗ', "r"),
    ('Ř', "R"),
    ('ř', "r"),
    ('Ś', "S"),
    ('ś', "s"),
    ('Ş', "S"),
    ('ş', "s"),
    ('Ș', "S"),
    ('ș', "s"),
    ('Ť', "T"),
    ('ť', "t"),
    ('Ț', "T"),
    ('ț', "t"),
    ('Ū', "U"),
    ('ū', "u"),
    ('Ů', "U"),
    ('ů', "u"),
    ('Ű', "Ü"),
    ('ű', "ü"),
    ('Ų', "U"),
    ('ų', "u"),
    ('Ź', "Z"),
    ('ź', "z"),
    ('Ż', "Z"),
    ('ż', "z"),
    ('ʻ', "'"),
    ('’', "'"),
    ('‘', "'"),
];

/// Normalise a raw display name into `charset`.
///
/// Deterministic, never fails for well-formed input, and returns the
/// empty string for blank input.
pub fn normalise(raw: &str, charset: Charset) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match charset {
        Charset::Utf8 => raw.to_string(),
        Charset::Windows1252 => {
            let mut out = String::with_capacity(raw.len());
            for c in raw.chars() {
                if in_windows_1252(c) {
                    out.push(c);
                } else if let Some((_, repl)) =
                    WINDOWS_1252_REPLACEMENTS.iter().find(|(from, _)| *from == c)
                {
                    out.push_str(repl);
                } else {
                    out.push('?');
                }
            }
            out
        }
    }
}

fn in_windows_1252(c: char) -> bool {
    let mut buf = [0_u8; 4];
    let (_, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    !had_errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_gives_empty_string() {
        assert_eq!(normalise("", Charset::Windows1252), "");
        assert_eq!(normalise("   \t ", Charset::Windows1252), "");
        assert_eq!(normalise("", Charset::Utf8), "");
    }

    #[test]
    fn utf8_passes_through_trimmed() {
        assert_eq!(normalise(" Jórvík ", Charset::Utf8), "Jórvík");
        assert_eq!(normalise("București", Charset::Utf8), "București");
    }

    #[test]
    fn windows_1252_keeps_its_own_repertoire() {
        assert_eq!(normalise("Jórvík", Charset::Windows1252), "Jórvík");
        // š and œ are in windows-1252 even though they are not latin-1.
        assert_eq!(normalise("Šibenik", Charset::Windows1252), "Šibenik");
    }

    #[test]
    fn windows_1252_replaces_outside_letters() {
        assert_eq!(normalise("București", Charset::Windows1252), "Bucuresti");
        assert_eq!(normalise("Łódź", Charset::Windows1252), "Lódz");
        assert_eq!(normalise("Kraków", Charset::Windows1252), "Kraków");
    }

    #[test]
    fn output_always_encodes_cleanly() {
        for raw in ["Москва", "北京", "Āĸ’humāi"] {
            let out = normalise(raw, Charset::Windows1252);
            let (_, _, had_errors) = WINDOWS_1252.encode(&out);
            assert!(!had_errors, "unencodable output for {raw}: {out}");
        }
    }
}
