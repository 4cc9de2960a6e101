//! Tokenizer shared by the segment-based comparators (Composer, RubyGems, Maven)

/// One run of a version string: digits or letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(u64),
    Text(String),
}

impl Token {
    pub fn is_zero(&self) -> bool {
        matches!(self, Token::Number(0))
    }
}

/// Splits `version` at `separators` and at every digit/letter boundary.
///
/// Letters are lowercased. Returns `None` for empty input, characters outside
/// `[0-9A-Za-z]` and `separators`, or numbers that overflow.
pub fn tokenize(version: &str, separators: &[char]) -> Option<Vec<Token>> {
    if version.is_empty() {
        return None;
    }

    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in version.chars() {
        if separators.contains(&c) {
            push_token(&mut tokens, &mut current)?;
            continue;
        }
        if !c.is_ascii_alphanumeric() {
            return None;
        }
        if let Some(last) = current.chars().last()
            && last.is_ascii_digit() != c.is_ascii_digit()
        {
            push_token(&mut tokens, &mut current)?;
        }
        current.push(c.to_ascii_lowercase());
    }
    push_token(&mut tokens, &mut current)?;

    (!tokens.is_empty()).then_some(tokens)
}

fn push_token(tokens: &mut Vec<Token>, current: &mut String) -> Option<()> {
    if current.is_empty() {
        return Some(());
    }
    let token = if current.starts_with(|c: char| c.is_ascii_digit()) {
        Token::Number(current.parse().ok()?)
    } else {
        Token::Text(current.clone())
    };
    tokens.push(token);
    current.clear();
    Some(())
}

/// Drops zeros ending the leading numeric run so `1.0-beta` and
/// `1.0.0-beta` compare equal; at least one number is kept
pub fn trim_release_zeros(tokens: Vec<Token>) -> Vec<Token> {
    let release_len = tokens
        .iter()
        .position(|t| matches!(t, Token::Text(_)))
        .unwrap_or(tokens.len());

    let mut keep = release_len;
    while keep > 1 && tokens[keep - 1].is_zero() {
        keep -= 1;
    }

    tokens
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i < keep || *i >= release_len)
        .map(|(_, t)| t)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn n(value: u64) -> Token {
        Token::Number(value)
    }

    fn t(value: &str) -> Token {
        Token::Text(value.to_string())
    }

    #[rstest]
    #[case("1.2.3", vec![n(1), n(2), n(3)])]
    #[case("1.0.0-RC1", vec![n(1), n(0), n(0), t("rc"), n(1)])]
    #[case("2.0b3", vec![n(2), n(0), t("b"), n(3)])]
    #[case("1..2", vec![n(1), n(2)])]
    fn tokenize_splits_runs(#[case] input: &str, #[case] expected: Vec<Token>) {
        assert_eq!(tokenize(input, &['.', '-']), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("1.0 beta")]
    #[case("-")]
    #[case("99999999999999999999999")]
    fn tokenize_rejects_malformed_input(#[case] input: &str) {
        assert_eq!(tokenize(input, &['.', '-']), None);
    }

    #[rstest]
    #[case(vec![n(1), n(0), n(0)], vec![n(1)])]
    #[case(vec![n(0), n(0)], vec![n(0)])]
    #[case(vec![n(1), n(0), t("beta"), n(0)], vec![n(1), t("beta"), n(0)])]
    #[case(vec![t("dev"), n(0)], vec![t("dev"), n(0)])]
    fn trim_release_zeros_only_touches_the_release_run(
        #[case] input: Vec<Token>,
        #[case] expected: Vec<Token>,
    ) {
        assert_eq!(trim_release_zeros(input), expected);
    }
}
