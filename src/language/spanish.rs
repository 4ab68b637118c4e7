use super::syllables::{adjust_spanish, SyllableRules};
use super::{LanguagePack, ReadabilityFormula};

pub(super) static PACK: LanguagePack = LanguagePack {
    code: "es",
    name: "Spanish",
    abbreviations: &[
        "sr", "sra", "srta", "dr", "dra", "ud", "uds", "etc", "pág", "núm", "tel", "av", "ej",
        "p.ej", "aprox", "ene", "feb", "abr", "ago", "sept", "oct", "dic",
    ],
    function_words: FUNCTION_WORDS,
    stop_words: FUNCTION_WORDS,
    transition_words: TRANSITION_WORDS,
    first_word_exceptions: &[
        "el", "la", "los", "las", "un", "una", "unos", "unas", "este", "esta", "estos", "estas",
        "ese", "esa", "esos", "esas", "uno", "dos", "tres", "cuatro", "cinco",
    ],
    sentence_length_limit: 25,
    syllables: Some(SyllableRules {
        vowels: "aeiouáéíóúü",
        exceptions: &[],
        adjust: Some(adjust_spanish),
    }),
    readability: Some(ReadabilityFormula::FernandezHuerta),
    passive: Some(detect_passive),
};

const FUNCTION_WORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "lo", "al", "del", "de", "a", "en",
    "con", "por", "para", "sin", "sobre", "entre", "hasta", "desde", "hacia", "y", "e", "o",
    "u", "pero", "sino", "que", "si", "como", "cuando", "donde", "yo", "tú", "él", "ella",
    "nosotros", "vosotros", "ellos", "ellas", "me", "te", "se", "nos", "os", "le", "les", "mi",
    "tu", "su", "sus", "mis", "tus", "es", "son", "está", "están", "fue", "ser", "estar", "ha",
    "han", "hay", "muy", "más", "menos", "no", "ya", "también", "este", "esta", "estos",
    "estas", "ese", "esa", "todo", "toda", "todos", "todas",
];

const TRANSITION_WORDS: &[&str] = &[
    "además", "adicionalmente", "análogamente", "antes", "asimismo", "así", "aunque",
    "consecuentemente", "concluyendo", "después", "entonces", "especialmente", "finalmente",
    "igualmente", "inclusive", "luego", "mientras", "obviamente", "pero", "porque",
    "posteriormente", "primero", "pues", "segundo", "sin embargo", "también", "todavía",
    "a continuación", "a pesar de", "al contrario", "al final", "con todo", "dado que",
    "de hecho", "en cambio", "en conclusión", "en consecuencia", "en efecto", "en general",
    "en primer lugar", "en resumen", "en otras palabras", "es decir", "no obstante",
    "o sea", "para concluir", "por ejemplo", "por lo tanto", "por consiguiente",
    "por otra parte", "por otro lado", "por último", "puesto que", "ya que",
];

const SER_FORMS: &[&str] = &[
    "soy", "eres", "es", "somos", "sois", "son", "fui", "fuiste", "fue", "fuimos", "fueron",
    "era", "eras", "éramos", "eran", "seré", "será", "seremos", "serán", "sería", "serían",
    "sea", "sean", "fuera", "fueran", "sido", "ser", "siendo",
];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "abierto", "cubierto", "dicho", "escrito", "hecho", "muerto", "puesto", "resuelto", "roto",
    "visto", "vuelto", "impreso", "frito", "descubierto", "devuelto", "compuesto",
];

fn is_participle(word: &str) -> bool {
    let stem = word
        .strip_suffix('s')
        .unwrap_or(word)
        .trim_end_matches(['o', 'a']);
    if IRREGULAR_PARTICIPLES.contains(&word)
        || IRREGULAR_PARTICIPLES.contains(&format!("{stem}o").as_str())
    {
        return true;
    }
    word.chars().count() >= 5 && (stem.ends_with("ad") || stem.ends_with("id"))
}

/// A form of "ser" followed, within two words, by a participle
fn detect_passive(words: &[String]) -> Option<(usize, usize)> {
    for (i, word) in words.iter().enumerate() {
        if !SER_FORMS.contains(&word.as_str()) {
            continue;
        }
        for j in i + 1..(i + 3).min(words.len()) {
            if is_participle(&words[j]) {
                return Some((i, j));
            }
        }
    }
    None
}
