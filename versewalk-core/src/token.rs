//! Corpus tokenization
//!
//! Splits raw text into lowercased words, the few punctuation marks that
//! survive into generated lines, and structural breaks (sentence ends, line
//! breaks, stanza breaks). Everything else (quotes, brackets, digits-only
//! symbols, dashes) is dropped.

/// Punctuation kept as standalone tokens
pub const KEPT_PUNCTUATION: [char; 3] = [',', ';', ':'];

/// Characters that end a sentence
pub const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '…'];

/// One lexical unit of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// Lowercased word (letters/digits with internal apostrophes or hyphens)
    Word(String),
    /// Kept punctuation mark
    Punct(char),
    /// Sentence terminator run (`.`, `?!`, `...`)
    SentenceEnd,
    /// A single line break
    LineBreak,
    /// Two or more consecutive line breaks
    StanzaBreak,
}

/// Tokenizer settings that change how breaks become walk boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenizerConfig {
    /// Treat every single line break as a boundary, not only blank lines
    pub line_breaks_are_boundaries: bool,
}

/// Split text into lexemes
pub fn tokenize(text: &str) -> Vec<Lexeme> {
    let chars: Vec<char> = text.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            let mut newlines = 0;
            while i < chars.len() && chars[i].is_whitespace() {
                if chars[i] == '\n' {
                    newlines += 1;
                }
                i += 1;
            }
            match newlines {
                0 => {}
                1 => lexemes.push(Lexeme::LineBreak),
                _ => lexemes.push(Lexeme::StanzaBreak),
            }
            continue;
        }

        if ch.is_alphanumeric() {
            let start = i;
            i += 1;
            while i < chars.len() && continues_word(&chars, i) {
                i += 1;
            }
            let word: String = chars[start..i]
                .iter()
                .map(|&c| if c == '’' { '\'' } else { c })
                .flat_map(char::to_lowercase)
                .collect();
            lexemes.push(Lexeme::Word(word));
            continue;
        }

        if SENTENCE_TERMINATORS.contains(&ch) {
            while i < chars.len() && SENTENCE_TERMINATORS.contains(&chars[i]) {
                i += 1;
            }
            lexemes.push(Lexeme::SentenceEnd);
            continue;
        }

        if KEPT_PUNCTUATION.contains(&ch) {
            lexemes.push(Lexeme::Punct(ch));
        }
        i += 1;
    }

    lexemes
}

/// Whether `chars[i]` extends the word that ends at `chars[i - 1]`
fn continues_word(chars: &[char], i: usize) -> bool {
    let ch = chars[i];
    if ch.is_alphanumeric() {
        return true;
    }
    // Joiners only count between two alphanumerics: "o'er", "sun-lit"
    matches!(ch, '\'' | '’' | '-')
        && chars[i - 1].is_alphanumeric()
        && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric())
}

/// Whether a token string is a kept punctuation mark rather than a word
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if KEPT_PUNCTUATION.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter_map(|lx| match lx {
                Lexeme::Word(w) => Some(w),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_words_are_lowercased() {
        assert_eq!(words("How ARE you"), vec!["how", "are", "you"]);
    }

    #[test]
    fn test_internal_apostrophes_and_hyphens() {
        assert_eq!(
            words("O'er the sun-lit warm’d hills"),
            vec!["o'er", "the", "sun-lit", "warm'd", "hills"]
        );
    }

    #[test]
    fn test_quotes_and_dashes_dropped() {
        assert_eq!(
            words("'Tis \"strange\" -- (very) strange-"),
            vec!["tis", "strange", "very", "strange"]
        );
    }

    #[test]
    fn test_sentence_terminator_runs_collapse() {
        let lexemes = tokenize("wait... what?!");
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Word("wait".into()),
                Lexeme::SentenceEnd,
                Lexeme::Word("what".into()),
                Lexeme::SentenceEnd,
            ]
        );
    }

    #[test]
    fn test_kept_punctuation() {
        let lexemes = tokenize("love, and; death");
        assert_eq!(lexemes[1], Lexeme::Punct(','));
        assert_eq!(lexemes[3], Lexeme::Punct(';'));
    }

    #[test]
    fn test_line_and_stanza_breaks() {
        let lexemes = tokenize("one\ntwo\r\n\r\nthree");
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Word("one".into()),
                Lexeme::LineBreak,
                Lexeme::Word("two".into()),
                Lexeme::StanzaBreak,
                Lexeme::Word("three".into()),
            ]
        );
    }

    #[test]
    fn test_is_punctuation() {
        assert!(is_punctuation(","));
        assert!(is_punctuation(";"));
        assert!(!is_punctuation("a"));
        assert!(!is_punctuation(",,"));
        assert!(!is_punctuation(""));
    }

    #[test]
    fn test_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \"\" () ").is_empty());
    }
}
