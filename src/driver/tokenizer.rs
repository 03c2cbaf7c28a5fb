use crate::error::{CalcError, CalcResult};
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "driver/token.pest"]
struct TokenGrammar;

/// A typed token handed from the text layer to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Operator symbol or function name.
    Symbol(String),
    /// `A<digits>` style reference to an earlier answer.
    Answer(String),
}

impl From<pest::error::Error<Rule>> for CalcError {
    fn from(error: pest::error::Error<Rule>) -> Self {
        CalcError::parse(error.to_string())
    }
}

/// Splits `input` into tokens. Whitespace is skipped and `#` starts a comment
/// that runs to the end of the input.
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    debug!("Tokenizing: {}", input);
    let tokens = TokenGrammar::parse(Rule::tokens, input)?
        .next()
        .ok_or_else(|| CalcError::parse("Failed to tokenize expression"))?;

    tokens
        .into_inner()
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(build_token)
        .collect()
}

fn build_token(pair: Pair<Rule>) -> CalcResult<Token> {
    let text = pair.as_str();
    match pair.as_rule() {
        Rule::number => text
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|e| CalcError::parse(format!("Invalid number '{}': {}", text, e))),
        Rule::function | Rule::symbol => Ok(Token::Symbol(text.to_string())),
        Rule::answer => Ok(Token::Answer(text.to_string())),
        rule => Err(CalcError::parse(format!("Unexpected rule: {:?}", rule))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(text: &str) -> Token {
        Token::Symbol(text.to_string())
    }

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            tokenize("2 + 3*4").unwrap(),
            vec![
                Token::Number(2.0),
                symbol("+"),
                Token::Number(3.0),
                symbol("*"),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            tokenize("1.5 .25 3. 1e3 2.5E-2").unwrap(),
            vec![
                Token::Number(1.5),
                Token::Number(0.25),
                Token::Number(3.0),
                Token::Number(1000.0),
                Token::Number(0.025),
            ]
        );
    }

    #[test]
    fn test_tokenize_multi_character_symbols() {
        assert_eq!(
            tokenize("1<<2>=3!=4&&!0||5>>1<=2==2").unwrap(),
            vec![
                Token::Number(1.0),
                symbol("<<"),
                Token::Number(2.0),
                symbol(">="),
                Token::Number(3.0),
                symbol("!="),
                Token::Number(4.0),
                symbol("&&"),
                symbol("!"),
                Token::Number(0.0),
                symbol("||"),
                Token::Number(5.0),
                symbol(">>"),
                Token::Number(1.0),
                symbol("<="),
                Token::Number(2.0),
                symbol("=="),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_functions_longest_first() {
        assert_eq!(
            tokenize("acosec acos sinh sin log10 log 5P3 6C2").unwrap(),
            vec![
                symbol("acosec"),
                symbol("acos"),
                symbol("sinh"),
                symbol("sin"),
                symbol("log10"),
                symbol("log"),
                Token::Number(5.0),
                symbol("P"),
                Token::Number(3.0),
                Token::Number(6.0),
                symbol("C"),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_answers() {
        assert_eq!(
            tokenize("A0 + a12 * abs(A3)").unwrap(),
            vec![
                Token::Answer("A0".to_string()),
                symbol("+"),
                Token::Answer("a12".to_string()),
                symbol("*"),
                symbol("abs"),
                symbol("("),
                Token::Answer("A3".to_string()),
                symbol(")"),
            ]
        );
    }

    #[test]
    fn test_tokenize_comment() {
        assert_eq!(
            tokenize("1 + 2 # the rest is ignored ) (").unwrap(),
            vec![Token::Number(1.0), symbol("+"), Token::Number(2.0)]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_tokenize_rejects_unknown_input() {
        assert!(matches!(
            tokenize("2 $ 3"),
            Err(CalcError::ParseError { .. })
        ));
        assert!(tokenize("sqrt 4").is_err());
        assert!(tokenize("sinx").is_err());
    }
}
