use super::syllables::SyllableRules;
use super::{LanguagePack, ReadabilityFormula};

pub(super) static PACK: LanguagePack = LanguagePack {
    code: "de",
    name: "German",
    abbreviations: &[
        "z.b", "bzw", "usw", "ca", "dr", "prof", "nr", "str", "vgl", "evtl", "ggf", "inkl",
        "d.h", "u.a", "s", "bspw", "etc", "jan", "feb", "okt", "dez",
    ],
    function_words: FUNCTION_WORDS,
    stop_words: FUNCTION_WORDS,
    transition_words: TRANSITION_WORDS,
    first_word_exceptions: &[
        "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines", "einem",
        "einen", "dieser", "diese", "dieses", "diesem", "diesen", "jene", "jener", "jenes",
        "zwei", "drei", "vier", "fünf",
    ],
    sentence_length_limit: 20,
    syllables: Some(SyllableRules {
        vowels: "aeiouyäöü",
        exceptions: &[("idee", 3), ("museum", 3), ("theater", 3), ("ideal", 3)],
        adjust: None,
    }),
    readability: Some(ReadabilityFormula::Amstad),
    passive: Some(detect_passive),
};

const FUNCTION_WORDS: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "eines", "einem", "einen",
    "und", "oder", "aber", "denn", "sondern", "doch", "dass", "weil", "wenn", "als", "ob",
    "ich", "du", "er", "sie", "es", "wir", "ihr", "mich", "dich", "sich", "uns", "euch",
    "mein", "dein", "sein", "unser", "euer", "in", "im", "an", "am", "auf", "aus", "bei",
    "mit", "nach", "von", "vom", "zu", "zum", "zur", "für", "über", "unter", "vor", "hinter",
    "neben", "zwischen", "durch", "gegen", "ohne", "um", "bis", "ist", "sind", "war", "waren",
    "bin", "bist", "hat", "haben", "hatte", "hatten", "wird", "werden", "wurde", "wurden",
    "kann", "können", "muss", "müssen", "soll", "sollen", "nicht", "kein", "keine", "auch",
    "noch", "nur", "schon", "sehr", "so", "wie", "was", "wer", "wo", "dieser", "diese",
    "dieses", "alle", "man",
];

const TRANSITION_WORDS: &[&str] = &[
    "aber", "abschließend", "allerdings", "also", "anfangs", "anschließend", "außerdem",
    "bevor", "dagegen", "daher", "damit", "danach", "dann", "darum", "dazu", "dennoch",
    "deshalb", "deswegen", "doch", "ebenfalls", "ebenso", "endlich", "entweder", "erstens",
    "folglich", "ferner", "gleichfalls", "hingegen", "insbesondere", "jedoch", "letztlich",
    "nachdem", "nämlich", "obwohl", "schließlich", "seitdem", "sodass", "sofern", "somit",
    "sowie", "später", "stattdessen", "trotzdem", "überdies", "weiterhin", "während",
    "zudem", "zuerst", "zuletzt", "zunächst", "zusätzlich", "zweitens", "auf jeden fall",
    "im gegensatz dazu", "im vergleich", "in diesem fall", "mit anderen worten",
    "zum beispiel", "zum schluss", "vor allem", "aus diesem grund", "im allgemeinen",
];

const WERDEN_FORMS: &[&str] = &[
    "werde", "wirst", "wird", "werden", "werdet", "wurde", "wurdest", "wurden", "wurdet",
    "worden", "würde", "würden", "würdest",
];

const INSEPARABLE_PREFIXES: &[&str] = &["be", "ver", "er", "ent", "zer", "emp", "miss"];

const SEPARABLE_PREFIXES: &[&str] = &[
    "ab", "an", "auf", "aus", "bei", "ein", "fest", "mit", "nach", "vor", "weg", "zu", "zurück",
];

fn is_participle(word: &str) -> bool {
    if word.chars().count() < 5 || FUNCTION_WORDS.contains(&word) {
        return false;
    }
    let ending = word.ends_with('t') || word.ends_with("en");
    let prefixed = word.starts_with("ge")
        || SEPARABLE_PREFIXES
            .iter()
            .any(|p| word.strip_prefix(p).is_some_and(|rest| rest.starts_with("ge")))
        || INSEPARABLE_PREFIXES.iter().any(|p| word.starts_with(p));
    ending && prefixed && !WERDEN_FORMS.contains(&word)
}

/// A form of "werden" together with a past participle anywhere in the clause
fn detect_passive(words: &[String]) -> Option<(usize, usize)> {
    let aux = words.iter().position(|w| WERDEN_FORMS.contains(&w.as_str()))?;
    let participle = words
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != aux)
        .find(|(_, w)| is_participle(w))
        .map(|(i, _)| i)?;
    Some((aux.min(participle), aux.max(participle)))
}
