//! Whitespace tokenization helpers shared by the filters

/// Split a token into leading punctuation, word, trailing punctuation
///
/// Hyphens and apostrophes inside the word are kept; a token made only of
/// punctuation yields an empty word.
pub fn split_punctuation(token: &str) -> (&str, &str, &str) {
    let start = token
        .char_indices()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, _)| i);

    let Some(start) = start else {
        return (token, "", "");
    };

    let end = token
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(token.len());

    (&token[..start], &token[start..end], &token[end..])
}

/// Token with surrounding punctuation removed
pub fn strip_punctuation(token: &str) -> &str {
    split_punctuation(token).1
}

/// Whitespace-separated words, punctuation stripped, lowercased, blanks dropped
pub fn normalized_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(strip_punctuation)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Vowel test, accented vowels included
pub fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'a' | 'e' | 'i' | 'o' | 'u'
            | 'á' | 'é' | 'í' | 'ó' | 'ú'
            | 'à' | 'è' | 'ì' | 'ò' | 'ù'
            | 'â' | 'ê' | 'î' | 'ô' | 'û'
    )
}

/// Rewrite every whitespace-delimited token, copying whitespace verbatim
///
/// `rewrite` returns `None` to keep a token unchanged.
pub fn map_tokens<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut token_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = token_start.take() {
                push_token(&mut out, &text[start..i], &mut rewrite);
            }
            out.push(c);
        } else if token_start.is_none() {
            token_start = Some(i);
        }
    }
    if let Some(start) = token_start {
        push_token(&mut out, &text[start..], &mut rewrite);
    }
    out
}

fn push_token<F>(out: &mut String, token: &str, rewrite: &mut F)
where
    F: FnMut(&str) -> Option<String>,
{
    match rewrite(token) {
        Some(replacement) => out.push_str(&replacement),
        None => out.push_str(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_punctuation() {
        assert_eq!(split_punctuation("napakainit."), ("", "napakainit", "."));
        assert_eq!(split_punctuation("\"Mag-aral!\""), ("\"", "Mag-aral", "!\""));
        assert_eq!(split_punctuation("..."), ("...", "", ""));
        assert_eq!(split_punctuation("bahay"), ("", "bahay", ""));
    }

    #[test]
    fn test_normalized_words() {
        assert_eq!(
            normalized_words("  Ang BAHAY, ay — malaki! "),
            vec!["ang", "bahay", "ay", "malaki"]
        );
    }

    #[test]
    fn test_is_vowel() {
        assert!(is_vowel('a'));
        assert!(is_vowel('I'));
        assert!(is_vowel('ó'));
        assert!(!is_vowel('b'));
        assert!(!is_vowel('-'));
    }

    #[test]
    fn test_map_tokens_preserves_whitespace() {
        let out = map_tokens("  ako\tay\n masaya ", |t| {
            (t == "ay").then(|| "AY".to_string())
        });
        assert_eq!(out, "  ako\tAY\n masaya ");
    }

    #[test]
    fn test_map_tokens_empty() {
        assert_eq!(map_tokens("", |_| None), "");
        assert_eq!(map_tokens("   ", |_| Some("x".to_string())), "   ");
    }
}
