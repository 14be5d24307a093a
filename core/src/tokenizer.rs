use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").expect("valid regex");
}

/// Whitespace tokens of `text`, exactly as written: no case folding, no stemming.
pub fn split_terms(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Distinct query terms in first-occurrence order.
///
/// This ordering fixes the index of every term in every vector built for the query.
pub fn term_ordering(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for tok in split_terms(query) {
        if !terms.iter().any(|t| t == tok) {
            terms.push(tok.to_string());
        }
    }
    terms
}

/// Collapse every run of non-word characters in a url into a single space.
pub fn url_to_text(url: &str) -> String {
    NON_WORD.replace_all(url, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tokens() {
        let text = url_to_text("http://a.b/c-d");
        let toks: Vec<&str> = split_terms(&text).collect();
        assert_eq!(toks, vec!["http", "a", "b", "c", "d"]);
    }

    #[test]
    fn ordering_collapses_duplicates() {
        assert_eq!(term_ordering("b a b  c a"), vec!["b", "a", "c"]);
        assert!(term_ordering("   ").is_empty());
    }
}
