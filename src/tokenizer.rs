//! UTF-8 aware (checked) and byte-oriented (unchecked) tokenization: lowercase
//! ASCII alphanumeric runs, with an optional minimum-length filter.

/// Tokens and warning count produced by scanning one book's title or
/// content region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Book {
    pub title: Vec<String>,
    pub content: Vec<String>,
    pub error_count: usize,
}

mod details {
    /// Groups raw bytes into UTF-8 "codepoint" chunks: a leading byte
    /// followed by every `10xxxxxx` continuation byte after it. Chunks are
    /// not validated here — a chunk can still be malformed (wrong length
    /// for its leading byte, or a bare continuation byte at the start).
    fn utf8_chunks(text: &[u8]) -> Vec<&[u8]> {
        let mut chunks = Vec::new();
        let mut start = 0;
        for i in 1..text.len() {
            if text[i] & 0b1100_0000 != 0b1000_0000 {
                chunks.push(&text[start..i]);
                start = i;
            }
        }
        if start < text.len() {
            chunks.push(&text[start..]);
        }
        chunks
    }

    fn is_valid_codepoint(c: &[u8]) -> bool {
        match c.len() {
            1 => c[0] & 0b1000_0000 == 0,
            2 => c[0] & 0b1110_0000 == 0b1100_0000,
            3 => c[0] & 0b1111_0000 == 0b1110_0000,
            4 => c[0] & 0b1111_1000 == 0b1111_0000,
            _ => false,
        }
    }

    /// Pushes the in-progress token onto the finished list if it clears
    /// `filter`, otherwise clears it in place and keeps accumulating into
    /// the same slot.
    fn finalize_or_drop(tokens: &mut Vec<String>, filter: Option<usize>) {
        let current = tokens.last().unwrap();
        let too_short = matches!(filter, Some(f) if current.len() < f);
        if too_short {
            tokens.last_mut().unwrap().clear();
        } else {
            tokens.push(String::new());
        }
    }

    /// Checked scan: drops malformed codepoints (counting them as errors)
    /// before applying the alphanumeric filter. Matches the upstream
    /// implementation's behavior of discarding whatever token is still
    /// being accumulated when the input ends without a trailing
    /// separator — only tokens followed by a non-alnum codepoint are ever
    /// finalized.
    pub fn tokenize(text: &[u8], filter: Option<usize>) -> (Vec<String>, usize) {
        let mut error_count = 0;
        let mut tokens: Vec<String> = vec![String::new()];
        for chunk in utf8_chunks(text) {
            if !is_valid_codepoint(chunk) {
                error_count += 1;
                continue;
            }
            if chunk.len() == 1 && chunk[0].is_ascii_alphanumeric() {
                tokens.last_mut().unwrap().push(chunk[0].to_ascii_lowercase() as char);
            } else if !tokens.last().unwrap().is_empty() {
                finalize_or_drop(&mut tokens, filter);
            }
        }
        tokens.pop();
        (tokens, error_count)
    }

    /// Unchecked scan: treats every byte as opaque, filtering only on
    /// ASCII alphanumeric ranges. Unlike `tokenize`, a trailing in-progress
    /// token that never hit a separator is kept (it just skips the filter
    /// check the separator path would have applied).
    pub fn unchecked_tokenize(text: &[u8], filter: Option<usize>) -> Vec<String> {
        let mut tokens: Vec<String> = vec![String::new()];
        for &b in text {
            if b.is_ascii_alphanumeric() {
                tokens.last_mut().unwrap().push(b.to_ascii_lowercase() as char);
            } else if !tokens.last().unwrap().is_empty() {
                finalize_or_drop(&mut tokens, filter);
            }
        }
        if tokens.last().is_some_and(String::is_empty) {
            tokens.pop();
        }
        tokens
    }
}

/// Splits `text` into a title (everything before the first `\n`) and a
/// content region (from the first `\n` onward, newline included — it's
/// non-alphanumeric so it's harmless noise to the scanner), then tokenizes
/// each independently. Returns `None` if `text` has no newline at all,
/// which means it isn't a well-formed book file.
pub fn tokenize_book(text: &[u8], filter: Option<usize>, checked: bool) -> Option<Book> {
    let split_at = text.iter().position(|&b| b == b'\n')?;
    let title_region = &text[..split_at];
    let content_region = &text[split_at..];

    if checked {
        let (title, title_errs) = details::tokenize(title_region, filter);
        let (content, content_errs) = details::tokenize(content_region, filter);
        Some(Book {
            title,
            content,
            error_count: title_errs + content_errs,
        })
    } else {
        let title = details::unchecked_tokenize(title_region, filter);
        let content = details::unchecked_tokenize(content_region, filter);
        Some(Book {
            title,
            content,
            error_count: 0,
        })
    }
}
