/// Characters stripped from token edges; interior punctuation survives, so
/// `o'clock` keeps its apostrophe while `'cause` loses the leading one.
const BOUNDARY_CHARS: &[char] = &['.', ',', '\'', ':', '(', ')'];

/// English stop words dropped from contexts and signatures.
///
/// Sorted so membership checks can binary search.
static STOP_WORDS: &[&str] = &[
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "but", "by", "can", "can't",
    "cannot", "could", "dear", "did", "do", "does", "either", "else", "ever", "every", "for",
    "from", "get", "got", "had", "has", "have", "he", "her", "hers", "him", "his", "how",
    "however", "i", "if", "in", "into", "is", "it", "it's", "its", "just", "least", "let", "like",
    "likely", "may", "me", "might", "most", "must", "my", "neither", "no", "nor", "not", "of",
    "off", "often", "on", "one", "only", "or", "other", "our", "own", "rather", "said", "say",
    "says", "she", "should", "since", "so", "some", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "tis", "to", "too", "twas", "two", "us", "wants",
    "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "would", "yet", "you", "your",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercase, split on whitespace, strip boundary punctuation, then drop
/// stop words and tokens without an ASCII letter or digit.
pub fn normalize_and_split(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c| BOUNDARY_CHARS.contains(&c)))
        .filter(|token| !is_stop_word(token))
        .filter(|token| token.chars().any(|c| c.is_ascii_alphanumeric()))
        .map(str::to_string)
        .collect()
}
