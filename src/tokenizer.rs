/*!
 * Tag-aware tokenization of cue text.
 *
 * Cue text is scanned left to right into an ordered sequence of atomic
 * tokens: words and opaque formatting tags. A tag is a maximal run between
 * a delimiter pair (`<...>` or `{...}`) and contributes zero visible
 * characters; a word is a maximal non-whitespace run outside tags. The
 * scanner is an explicit two-state machine so tag boundaries and
 * unterminated tags are unambiguous.
 */

/// Atomic unit of cue text: a word or an opaque formatting tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A visible word
    Word(String),
    /// A formatting tag, preserved verbatim and invisible to length checks
    Tag(String),
}

impl Token {
    /// Raw text of the token, tag delimiters included
    pub fn text(&self) -> &str {
        match self {
            Token::Word(t) | Token::Tag(t) => t,
        }
    }

    /// Whether this token is a visible word
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    /// Whether this token is a formatting tag
    pub fn is_tag(&self) -> bool {
        matches!(self, Token::Tag(_))
    }

    /// Visible character count: tags count as zero
    pub fn visible_len(&self) -> usize {
        match self {
            Token::Word(w) => w.chars().count(),
            Token::Tag(_) => 0,
        }
    }
}

/// Scanner state: outside any tag, or inside one waiting for its closer.
enum ScanState {
    Outside,
    InsideTag(char),
}

/// Tokenize cue text into words and tags.
///
/// Whitespace separates tokens without producing empty ones; a tag opener
/// terminates the word before it. An unterminated tag is consumed to the
/// end of input as a single tag token.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Outside;

    for ch in text.chars() {
        match state {
            ScanState::Outside => {
                if ch == '<' || ch == '{' {
                    if !current.is_empty() {
                        tokens.push(Token::Word(std::mem::take(&mut current)));
                    }
                    current.push(ch);
                    state = ScanState::InsideTag(if ch == '<' { '>' } else { '}' });
                } else if ch.is_whitespace() {
                    if !current.is_empty() {
                        tokens.push(Token::Word(std::mem::take(&mut current)));
                    }
                } else {
                    current.push(ch);
                }
            }
            ScanState::InsideTag(closer) => {
                current.push(ch);
                if ch == closer {
                    tokens.push(Token::Tag(std::mem::take(&mut current)));
                    state = ScanState::Outside;
                }
            }
        }
    }

    if !current.is_empty() {
        match state {
            ScanState::Outside => tokens.push(Token::Word(current)),
            ScanState::InsideTag(_) => tokens.push(Token::Tag(current)),
        }
    }

    tokens
}

/// Rejoin a token run with single spaces.
pub fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible length of a token run: the length of the run with tag tokens
/// removed, words joined by single spaces.
pub fn visible_len(tokens: &[Token]) -> usize {
    let mut chars = 0;
    let mut words = 0;
    for token in tokens {
        if let Token::Word(w) = token {
            chars += w.chars().count();
            words += 1;
        }
    }
    if words > 0 { chars + words - 1 } else { 0 }
}

/// Visible length of a text fragment.
pub fn visible_len_str(text: &str) -> usize {
    visible_len(&tokenize(text))
}

/// First visible word of a text fragment, if any.
pub fn first_visible_word(text: &str) -> Option<String> {
    tokenize(text)
        .into_iter()
        .find(Token::is_word)
        .map(|t| t.text().to_string())
}

/// Last visible word of a text fragment, if any.
pub fn last_visible_word(text: &str) -> Option<String> {
    tokenize(text)
        .into_iter()
        .filter(Token::is_word)
        .next_back()
        .map(|t| t.text().to_string())
}

/// Number of visible words in a text fragment.
pub fn visible_word_count(text: &str) -> usize {
    tokenize(text).iter().filter(|t| t.is_word()).count()
}

/// Cut a text fragment at a visible-length boundary, never inside a tag.
///
/// The left side holds at most `limit` visible characters; a word
/// straddling the boundary is sliced at character granularity while tags
/// pass through whole to whichever side they fall on.
pub fn slice_at_visible_limit(text: &str, limit: usize) -> (String, String) {
    let mut left: Vec<String> = Vec::new();
    let mut right: Vec<String> = Vec::new();
    let mut used = 0;
    let mut left_has_word = false;

    for token in tokenize(text) {
        match token {
            Token::Tag(tag) => {
                if right.is_empty() {
                    left.push(tag);
                } else {
                    right.push(tag);
                }
            }
            Token::Word(word) => {
                if !right.is_empty() {
                    right.push(word);
                    continue;
                }
                let joiner = usize::from(left_has_word);
                let word_len = word.chars().count();
                if used + joiner + word_len <= limit {
                    used += joiner + word_len;
                    left.push(word);
                    left_has_word = true;
                } else {
                    let budget = limit.saturating_sub(used + joiner);
                    if budget == 0 {
                        right.push(word);
                    } else {
                        let cut = word
                            .char_indices()
                            .nth(budget)
                            .map(|(i, _)| i)
                            .unwrap_or(word.len());
                        left.push(word[..cut].to_string());
                        right.push(word[cut..].to_string());
                    }
                }
            }
        }
    }

    (left.join(" "), right.join(" "))
}
