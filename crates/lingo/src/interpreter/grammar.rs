//! Per-language grammatical inflection for `{{grammar:form|word}}`.
//!
//! Each language with special rules has one pure function from
//! `(word, form)` to the inflected word. Languages without an entry leave
//! the word unchanged, as does any form a language does not know.

use unicode_segmentation::UnicodeSegmentation;

use crate::fallback::truncations;

/// A grammar rule: `(word, form) -> inflected word`.
pub type GrammarFn = fn(&str, &str) -> String;

/// Rule table, keyed by language code.
const RULES: &[(&str, GrammarFn)] = &[
    ("bs", bosnian),
    ("dsb", sorbian),
    ("fi", finnish),
    ("ga", irish),
    ("he", hebrew),
    ("hsb", sorbian),
    ("hu", hungarian),
    ("hy", armenian),
    ("la", latin),
    ("os", ossetian),
    ("ru", russian),
    ("sl", slovenian),
    ("uk", ukrainian),
];

/// Find the grammar rule for a tag, trying progressively shorter prefixes.
pub fn grammar_rule(tag: &str) -> Option<GrammarFn> {
    truncations(tag).find_map(|prefix| {
        let prefix = prefix.to_ascii_lowercase();
        RULES
            .iter()
            .find(|(code, _)| *code == prefix)
            .map(|(_, rule)| *rule)
    })
}

/// Inflect `word` into `form` for `tag`. Identity when no rule applies.
///
/// # Example
///
/// ```
/// use lingo::interpreter::convert_grammar;
///
/// assert_eq!(convert_grammar("fi", "talo", "elative"), "talosta");
/// assert_eq!(convert_grammar("en", "house", "elative"), "house");
/// ```
pub fn convert_grammar(tag: &str, word: &str, form: &str) -> String {
    match grammar_rule(tag) {
        Some(rule) => rule(word, form),
        None => word.to_string(),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// `word` with `suffix` replaced, if it ends with it.
fn replace_suffix(word: &str, suffix: &str, replacement: &str) -> Option<String> {
    word.strip_suffix(suffix)
        .map(|stem| format!("{stem}{replacement}"))
}

/// Apply the first matching suffix rule.
fn first_suffix_rule(word: &str, rules: &[(&str, &str)]) -> Option<String> {
    rules
        .iter()
        .find_map(|(suffix, replacement)| replace_suffix(word, suffix, replacement))
}

/// Case-insensitive ASCII suffix replacement.
fn replace_suffix_ignore_case(word: &str, suffix: &str, replacement: &str) -> Option<String> {
    let split = word.len().checked_sub(suffix.len())?;
    let (stem, tail) = (word.get(..split)?, word.get(split..)?);
    tail.eq_ignore_ascii_case(suffix)
        .then(|| format!("{stem}{replacement}"))
}

/// The last user-perceived character.
fn last_grapheme(word: &str) -> Option<&str> {
    word.graphemes(true).next_back()
}

// =============================================================================
// Prepositional phrases
// =============================================================================

fn bosnian(word: &str, form: &str) -> String {
    match form {
        "instrumental" => format!("s {word}"),
        "lokativ" => format!("o {word}"),
        _ => word.to_string(),
    }
}

/// Lower and Upper Sorbian share their rules.
fn sorbian(word: &str, form: &str) -> String {
    match form {
        "instrumental" => format!("z {word}"),
        "lokatiw" => format!("wo {word}"),
        _ => word.to_string(),
    }
}

fn slovenian(word: &str, form: &str) -> String {
    match form {
        "mestnik" => format!("o {word}"),
        "orodnik" => format!("z {word}"),
        _ => word.to_string(),
    }
}

fn hungarian(word: &str, form: &str) -> String {
    match form {
        "rol" => format!("{word}ról"),
        "ba" => format!("{word}ba"),
        "k" => format!("{word}k"),
        _ => word.to_string(),
    }
}

// =============================================================================
// Suffix tables
// =============================================================================

fn armenian(word: &str, form: &str) -> String {
    match form {
        "genitive" => first_suffix_rule(word, &[("ա", "այի"), ("ո", "ոյի"), ("գիրք", "գրքի")])
            .unwrap_or_else(|| format!("{word}ի")),
        _ => word.to_string(),
    }
}

fn russian(word: &str, form: &str) -> String {
    match form {
        "genitive" => first_suffix_rule(
            word,
            &[
                ("ь", "я"),
                ("ия", "ии"),
                ("ка", "ки"),
                ("ти", "тей"),
                ("ды", "дов"),
                ("ник", "ника"),
            ],
        )
        .unwrap_or_else(|| word.to_string()),
        _ => word.to_string(),
    }
}

fn ukrainian(word: &str, form: &str) -> String {
    let rules: &[(&str, &str)] = match form {
        "genitive" => &[
            ("ь", "я"),
            ("ія", "ії"),
            ("ка", "ки"),
            ("ти", "тей"),
            ("ды", "дов"),
            ("ник", "ника"),
        ],
        "accusative" => &[("ія", "ію")],
        _ => &[],
    };
    first_suffix_rule(word, rules).unwrap_or_else(|| word.to_string())
}

/// Latin declensions. Rules are applied in sequence to the running word;
/// `|` separates alternative suffixes within one step.
fn latin(word: &str, form: &str) -> String {
    let steps: &[(&str, &str)] = match form {
        "genitive" => &[
            ("um|us", "i"),
            ("ommunia", "ommunium"),
            ("a", "ae"),
            ("libri", "librorum"),
            ("nuntii", "nuntiorum"),
            ("tio", "tionis"),
            ("ns", "ntis"),
            ("as", "atis"),
            ("es", "ei"),
        ],
        "accusative" => &[
            ("um|us", "um"),
            ("a", "am"),
            ("ommunia", "ommunia"),
            ("libri", "libros"),
            ("nuntii", "nuntios"),
            ("tio", "tionem"),
            ("ns", "ntem"),
            ("as", "atem"),
            ("es", "em"),
        ],
        "ablative" => &[
            ("um|us", "o"),
            ("ommunia", "ommunibus"),
            ("a", "a"),
            ("libri", "libris"),
            ("nuntii", "nuntiis"),
            ("tio", "tione"),
            ("ns", "nte"),
            ("as", "ate"),
            ("es", "e"),
        ],
        _ => &[],
    };

    steps
        .iter()
        .fold(word.to_string(), |current, (suffixes, replacement)| {
            suffixes
                .split('|')
                .find_map(|suffix| replace_suffix_ignore_case(&current, suffix, replacement))
                .unwrap_or(current)
        })
}

// =============================================================================
// Special cases
// =============================================================================

/// Finnish case endings with vowel harmony.
fn finnish(word: &str, form: &str) -> String {
    // Back vowel harmony when the last harmony vowel is a, o or u.
    let back = !word.to_lowercase().ends_with("wiki")
        && word
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| matches!(c, 'a' | 'o' | 'u' | 'ä' | 'ö' | 'y'))
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'o' | 'u'));

    let mut stem = word.to_string();
    if word
        .chars()
        .next_back()
        .is_some_and(|c| "bcdfghjklmnpqrstvwxz".contains(c.to_ascii_lowercase()))
    {
        stem.push('i');
    }

    let harmonic = |back_form: &str, front_form: &str| {
        format!("{stem}{}", if back { back_form } else { front_form })
    };
    match form {
        "genitive" => format!("{stem}n"),
        "elative" => harmonic("sta", "stä"),
        "partitive" => harmonic("a", "ä"),
        "illative" => {
            let last = last_grapheme(&stem).unwrap_or_default();
            format!("{stem}{last}n")
        }
        "inessive" => harmonic("ssa", "ssä"),
        _ => word.to_string(),
    }
}

/// Irish weekday names after "Dé".
fn irish(word: &str, form: &str) -> String {
    if form != "ainmlae" {
        return word.to_string();
    }
    let inflected = match word {
        "an Domhnach" => "Dé Domhnaigh",
        "an Luan" => "Dé Luain",
        "an Mháirt" => "Dé Mháirt",
        "an Chéadaoin" => "Dé Chéadaoin",
        "an Déardaoin" => "Déardaoin",
        "an Aoine" => "Dé hAoine",
        "an Satharn" => "Dé Sathairn",
        _ => word,
    };
    inflected.to_string()
}

/// Hebrew prefixed form: doubled waw, dropped definite article, maqaf
/// before non-Hebrew text.
fn hebrew(word: &str, form: &str) -> String {
    if !matches!(form, "prefixed" | "תחילית") {
        return word.to_string();
    }
    let mut word = word.to_string();
    if word.starts_with('ו') && !word.starts_with("וו") {
        word.insert(0, 'ו');
    }
    if let Some(rest) = word.strip_prefix('ה') {
        word = rest.to_string();
    }
    if !word.chars().next().is_some_and(|c| ('א'..='ת').contains(&c)) {
        word.insert(0, '־');
    }
    word
}

/// Ossetian case endings, with an epenthetic `й` after vowels and a
/// hyphen after non-Ossetian words.
fn ossetian(word: &str, form: &str) -> String {
    const VOWELS: &str = "аæеёиоыэюя";
    const CONSONANTS: &str = "бвгджзйклмнопрстфхцчшщьъ";
    let lower: Vec<char> = word.chars().flat_map(char::to_lowercase).collect();
    let last = lower.last().copied();

    let mut stem = word.to_string();
    let mut allative = "мæ";
    let mut jot = "";
    let mut hyphen = "";

    if let Some(plural_stem) = ossetian_plural_stem(word) {
        stem = plural_stem;
        allative = "æм";
    } else if last.is_some_and(|c| VOWELS.contains(c)) {
        jot = "й";
    } else if last == Some('у') {
        let before = lower.iter().rev().nth(1).copied();
        if !before.is_some_and(|c| VOWELS.contains(c)) {
            jot = "й";
        }
    } else if !last.is_some_and(|c| CONSONANTS.contains(c)) {
        hyphen = "-";
    }

    let ending = match form {
        "genitive" => format!("{hyphen}{jot}ы"),
        "dative" => format!("{hyphen}{jot}æн"),
        "allative" => format!("{hyphen}{allative}"),
        "ablative" if jot == "й" => format!("{hyphen}{jot}æ"),
        "ablative" => format!("{hyphen}{jot}æй"),
        "superessive" => format!("{hyphen}{jot}ыл"),
        "equative" => format!("{hyphen}{jot}ау"),
        "comitative" => format!("{hyphen}имæ"),
        _ => return word.to_string(),
    };
    format!("{stem}{ending}")
}

/// Plural Ossetian nouns end in `тæ`; the stem keeps the `т`.
fn ossetian_plural_stem(word: &str) -> Option<String> {
    if !word.to_lowercase().ends_with("тæ") {
        return None;
    }
    let mut chars: Vec<char> = word.chars().collect();
    chars.pop();
    Some(chars.into_iter().collect())
}
