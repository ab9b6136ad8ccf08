//! Centralized constants for the grammar checker
//!
//! Default values and the built-in lexicon. Settings fall back to these when
//! a file or environment variable does not override them.

/// Service endpoints
pub mod endpoints {
    /// OpenAI chat-completions base URL
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";

    /// Ollama's OpenAI-compatible base URL
    pub const OLLAMA_OPENAI_COMPAT: &str = "http://localhost:11434/v1";
}

/// Server defaults
pub mod server {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Must exceed `llm::DEFAULT_TIMEOUT_SECS`
    pub const DEFAULT_TIMEOUT_SECS: u64 = 35;
}

/// Model call defaults
pub mod llm {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Deterministic output
    pub const DEFAULT_TEMPERATURE: f32 = 0.0;

    pub const DEFAULT_MAX_TOKENS: u32 = 200;

    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
}

/// Pre-filter defaults
pub mod filters {
    /// Share of tokens that must look Filipino to override a foreign hit
    pub const MIN_NATIVE_RATIO: f32 = 0.40;

    pub const MIN_NATIVE_TOKENS: usize = 1;

    pub const MASK_TOKEN: &str = "****";

    /// Prefixes that mark a token as Filipino but have no hyphenation rule
    pub const EXTRA_NATIVE_PREFIXES: &[&str] = &[
        "nang", "mang", "pang", "naka", "maka", "paki", "ipag", "ipa", "ika",
    ];
}

/// Built-in word lists, used when no file path is configured
pub mod words {
    /// Filipino function words and pronouns
    pub const NATIVE: &[&str] = &[
        "ang", "ng", "mga", "sa", "ay", "at", "na", "si", "ni", "kay", "sina", "nina", "kina",
        "ako", "ikaw", "ka", "siya", "kami", "tayo", "kayo", "sila", "ko", "mo", "niya",
        "namin", "natin", "ninyo", "nila", "akin", "iyo", "kanya", "amin", "atin", "inyo",
        "kanila", "ito", "iyan", "iyon", "nito", "niyan", "niyon", "dito", "diyan", "doon",
        "hindi", "huwag", "oo", "opo", "po", "ho", "din", "rin", "lang", "lamang", "pa", "ba",
        "naman", "nga", "kasi", "kung", "kapag", "pag", "dahil", "para", "pero", "ngunit",
        "subalit", "o", "may", "mayroon", "meron", "wala", "nang", "mula", "hanggang", "tungkol",
        "bakit", "ano", "sino", "saan", "kailan", "paano", "ilan", "alin", "nasa", "sana",
        "talaga", "yung", "iyong", "kaya", "upang", "bilang", "lahat", "bawat",
        "isa", "dalawa", "tatlo", "ngayon", "bukas", "kahapon", "dati", "muna", "agad",
        "maging", "nasaan", "tulad", "gaya", "habang", "samantala", "tuwing",
    ];

    /// Common English words
    pub const FOREIGN: &[&str] = &[
        "the", "is", "are", "was", "were", "am", "be", "been", "being", "and", "or", "but",
        "of", "for", "with", "from", "into", "about", "this", "that", "these", "those", "what",
        "where", "when", "why", "how", "who", "which", "you", "your", "he", "she", "it", "we",
        "they", "i", "me", "my", "our", "their", "his", "her", "have", "has", "had", "do",
        "does", "did", "will", "would", "can", "could", "should", "not", "very", "there",
        "here", "hello", "please", "thank", "thanks", "yes", "because", "if", "then", "than",
        "also", "just", "like", "want", "going", "today", "tomorrow", "happy", "good",
    ];

    /// Terms that are censored or rejected
    pub const DISALLOWED: &[&str] = &[
        "putangina", "tangina", "puta", "putang", "gago", "gaga", "ulol", "tarantado",
        "punyeta", "leche", "pakyu", "kupal", "hinayupak", "bobo", "tanga", "inutil", "fuck",
        "shit",
    ];
}

/// Built-in hyphenation rules
///
/// Each entry is `(prefix, vowel_exemplars, consonant_exemplars)`.
/// Vowel exemplars are hyphenated forms that keep the hyphen even though the
/// stem starts with a consonant. Consonant exemplars are joined forms whose
/// stem only looks vowel-initial because the prefix swallowed a letter.
pub mod affixes {
    pub type RuleData = (&'static str, &'static [&'static str], &'static [&'static str]);

    pub const RULES: &[RuleData] = &[
        ("napaka", &[], &[]),
        ("pinaka", &[], &[]),
        ("nakaka", &[], &[]),
        (
            "mag",
            &["mag-tagalog", "mag-text", "mag-computer"],
            &[
                "maganda", "magandang", "magaganda", "magaling", "magagaling", "magalang",
                "magaan", "magulo", "magulang", "magara", "magastos", "magasin", "magaspang",
                "magiliw", "maging", "magiging", "magising", "magulat", "magalit", "magamit",
                "magamot", "magutom", "magagawa", "maganap", "magawa",
            ],
        ),
        (
            "nag",
            &["nag-text", "nag-tagalog"],
            &[
                "nagulat", "nagalit", "nagising", "nagamit", "nagamot", "nagawa", "nagagawa",
                "nagutom", "nagustuhan", "nagiging", "naganap",
            ],
        ),
        (
            "pag",
            &["pag-text"],
            &[
                "pagod", "pagong", "pagitan", "pagal", "pagiging", "pagamutan", "pagawaan",
            ],
        ),
    ];
}
