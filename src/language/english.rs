use super::syllables::{adjust_english, SyllableRules};
use super::{LanguagePack, ReadabilityFormula};

pub(super) static PACK: LanguagePack = LanguagePack {
    code: "en",
    name: "English",
    abbreviations: ABBREVIATIONS,
    function_words: FUNCTION_WORDS,
    stop_words: STOP_WORDS,
    transition_words: TRANSITION_WORDS,
    first_word_exceptions: FIRST_WORD_EXCEPTIONS,
    sentence_length_limit: 20,
    syllables: Some(SyllableRules {
        vowels: "aeiouy",
        exceptions: SYLLABLE_EXCEPTIONS,
        adjust: Some(adjust_english),
    }),
    readability: Some(ReadabilityFormula::Flesch),
    passive: Some(detect_passive),
};

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "corp",
    "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "approx", "dept",
    "e.g", "i.e", "a.m", "p.m", "u.s", "u.k",
];

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "whose", "which", "what", "where", "when", "why", "how", "and", "or", "but", "nor", "so",
    "yet", "if", "then", "than", "because", "while", "although", "though", "as", "of", "in",
    "on", "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down", "out", "off", "over",
    "under", "again", "further", "once", "here", "there", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "not", "only", "own", "same", "too", "very",
    "can", "will", "just", "should", "would", "could", "might", "must", "shall", "may", "am",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "get", "gets", "got", "also", "many", "much", "every", "one",
    "two", "three", "first", "second", "new", "via", "per", "upon", "within", "without",
    "onto", "toward", "towards", "among", "across", "along", "around", "behind", "beside",
    "beyond", "near", "since", "until", "whether", "either", "neither", "it's", "i'm", "you're",
    "we're", "they're", "don't", "doesn't", "isn't", "aren't", "can't", "won't",
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me", "more",
    "most", "my", "myself", "nor", "of", "on", "once", "only", "or", "other", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

const TRANSITION_WORDS: &[&str] = &[
    "accordingly", "additionally", "afterward", "afterwards", "albeit", "also", "although",
    "altogether", "another", "basically", "because", "before", "besides", "but", "certainly",
    "chiefly", "comparatively", "concurrently", "consequently", "contrarily", "conversely",
    "correspondingly", "despite", "doubtedly", "during", "e g", "earlier", "emphatically",
    "equally", "especially", "eventually", "evidently", "explicitly", "finally", "firstly",
    "following", "formerly", "forthwith", "fourthly", "further", "furthermore", "generally",
    "hence", "henceforth", "however", "i e", "identically", "indeed", "instead", "last",
    "lastly", "later", "lest", "likewise", "markedly", "meanwhile", "moreover", "nevertheless",
    "nonetheless", "nor", "notwithstanding", "obviously", "occasionally", "otherwise",
    "overall", "particularly", "presently", "previously", "rather", "regardless", "secondly",
    "shortly", "significantly", "similarly", "simultaneously", "since", "so", "soon",
    "specifically", "still", "straightaway", "subsequently", "surely", "surprisingly", "than",
    "then", "thereafter", "therefore", "thereupon", "thirdly", "though", "thus", "till",
    "undeniably", "undoubtedly", "unless", "unlike", "unquestionably", "until", "when",
    "whenever", "whereas", "while", "above all", "after all", "after that", "all in all",
    "all of a sudden", "all things considered", "analogous to", "although this may be true",
    "as a consequence", "as a result", "as an illustration", "as can be seen", "as has been noted",
    "as long as", "as much as", "as soon as", "as well as", "at any rate", "at first",
    "at last", "at least", "at the same time", "because of", "by all means", "by and large",
    "by contrast", "by the same token", "by the time", "compared to", "different from",
    "due to", "even if", "even more", "even so", "even though", "first thing to remember",
    "for example", "for fear that", "for instance", "for one thing", "for that reason",
    "for the most part", "for the purpose of", "for this reason", "from time to time",
    "given that", "given these points", "important to realize", "in a word", "in addition",
    "in brief", "in case", "in conclusion", "in contrast", "in detail", "in due time",
    "in effect", "in either case", "in essence", "in fact", "in general", "in light of",
    "in like fashion", "in like manner", "in order that", "in order to", "in other words",
    "in particular", "in reality", "in short", "in similar fashion", "in spite of", "in sum",
    "in summary", "in that case", "in the event that", "in the final analysis",
    "in the first place", "in the long run", "in the meantime", "in the same fashion",
    "in the same way", "in this case", "in time", "in view of", "it is important to realize",
    "most compelling evidence", "most importantly", "must be remembered", "not only",
    "not to mention", "of course", "on account of", "on balance", "on the condition that",
    "on the contrary", "on the negative side", "on the other hand", "on the positive side",
    "on the whole", "only if", "point often overlooked", "prior to", "provided that",
    "seeing that", "so as to", "so far", "so long as", "so that", "sooner or later",
    "such as", "summing up", "take the case of", "that is", "that is to say", "then again",
    "this time", "to be sure", "to begin with", "to clarify", "to conclude", "to demonstrate",
    "to emphasize", "to enumerate", "to explain", "to illustrate", "to list", "to point out",
    "to put it another way", "to put it differently", "to repeat", "to rephrase it",
    "to say nothing of", "to sum up", "to summarize", "to that end", "to the end that",
    "to this end", "together with", "under those circumstances", "until now", "up against",
    "up to the present time", "vis a vis", "what's more", "while it may be true",
    "while this may be true", "with attention to", "with this in mind", "with this intention",
    "with this purpose in mind", "without a doubt", "without delay", "without doubt",
    "without reservation",
];

const FIRST_WORD_EXCEPTIONS: &[&str] = &[
    "the", "a", "an", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "this", "that", "these", "those",
];

const SYLLABLE_EXCEPTIONS: &[(&str, usize)] = &[
    ("business", 2),
    ("every", 2),
    ("different", 3),
    ("evening", 2),
    ("family", 3),
    ("interesting", 3),
    ("people", 2),
    ("science", 2),
    ("social", 2),
    ("special", 2),
    ("area", 3),
    ("idea", 3),
    ("being", 2),
    ("going", 2),
    ("doing", 2),
    ("create", 2),
    ("created", 3),
    ("real", 1),
    ("really", 2),
    ("somewhere", 2),
    ("someone", 2),
    ("something", 2),
    ("sometimes", 2),
    ("whole", 1),
    ("simile", 3),
    ("recipe", 3),
    ("apostrophe", 4),
];

const BE_FORMS: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "get", "gets", "got", "gotten",
    "getting", "isn't", "aren't", "wasn't", "weren't",
];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "arisen", "awoken", "beaten", "become", "begun", "bent", "bet", "bid", "bitten", "bled",
    "blown", "broken", "brought", "built", "burnt", "bought", "caught", "chosen", "come",
    "cost", "crept", "cut", "dealt", "dug", "done", "drawn", "dreamt", "drunk", "driven",
    "eaten", "fallen", "fed", "felt", "fought", "found", "fled", "flung", "flown", "forbidden",
    "forgotten", "forgiven", "frozen", "given", "gone", "ground", "grown", "hung", "heard",
    "hidden", "hit", "held", "hurt", "kept", "known", "laid", "led", "left", "lent", "let",
    "lain", "lit", "lost", "made", "meant", "met", "paid", "put", "quit", "read", "ridden",
    "rung", "risen", "run", "said", "seen", "sought", "sold", "sent", "set", "shaken", "shed",
    "shot", "shown", "shut", "sung", "sunk", "sat", "slain", "slept", "slid", "spoken",
    "spent", "spun", "spread", "stood", "stolen", "stuck", "stung", "struck", "sworn", "swept",
    "swum", "taken", "taught", "torn", "told", "thought", "thrown", "understood", "woken",
    "worn", "won", "wound", "written",
];

/// Words ending in -ed that are never participles
const NOT_PARTICIPLES: &[&str] = &[
    "bed", "red", "shed", "need", "seed", "feed", "speed", "breed", "bleed", "deed", "indeed",
    "hundred", "sacred", "wicked", "naked", "ragged", "rugged", "crooked", "embed", "shred",
];

const INTERVENING: &[&str] = &[
    "not", "never", "also", "always", "often", "just", "already", "still", "being", "been",
    "usually", "really",
];

fn is_participle(word: &str) -> bool {
    if IRREGULAR_PARTICIPLES.contains(&word) {
        return true;
    }
    word.len() > 4 && word.ends_with("ed") && !NOT_PARTICIPLES.contains(&word)
}

/// A form of "be" or "get" followed, within two adverbs, by a past participle
fn detect_passive(words: &[String]) -> Option<(usize, usize)> {
    for (i, word) in words.iter().enumerate() {
        if !BE_FORMS.contains(&word.as_str()) {
            continue;
        }
        let mut j = i + 1;
        let mut skipped = 0;
        while let Some(next) = words.get(j) {
            if is_participle(next) {
                return Some((i, j));
            }
            let adverb = INTERVENING.contains(&next.as_str()) || next.ends_with("ly");
            if !adverb || skipped == 2 {
                break;
            }
            skipped += 1;
            j += 1;
        }
    }
    None
}
