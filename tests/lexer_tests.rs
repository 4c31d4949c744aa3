// tests/lexer_tests.rs

use expression_parser::ast::Token;
use expression_parser::lexer::{LexError, Lexer, Position, tokenize};

fn kinds(input: &str) -> Vec<Token> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("*", Token::Star),
        ("/", Token::Slash),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("<", Token::Lt),
        (">", Token::Gt),
        ("!", Token::Not),
        ("=", Token::EqEq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
        ("&&", Token::And),
        ("||", Token::Or),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.token, expected, "Failed for input: {}", input);
        assert_eq!(token.text, input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_two_char_operators_are_greedy() {
    assert_eq!(kinds("a>=b"), vec![
        Token::Identifier("a".into()),
        Token::GtEq,
        Token::Identifier("b".into()),
    ]);
    assert_eq!(kinds("5/5.0!=0"), vec![
        Token::Integer(5),
        Token::Slash,
        Token::Float(5.0),
        Token::NotEq,
        Token::Integer(0),
    ]);
    // Separated by whitespace they stay separate
    assert_eq!(kinds("< ="), vec![Token::Lt, Token::EqEq]);
    assert_eq!(kinds("! ="), vec![Token::Not, Token::EqEq]);
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("and", Token::And),
        ("or", Token::Or),
        ("not", Token::Not),
        ("true", Token::Boolean(true)),
        ("false", Token::Boolean(false)),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap().token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    // Keywords only match as whole words, and only in lower case
    let test_cases = vec![
        "android", "and_item", "_and", "or_gate", "order", "nothing", "truth",
        "false_positive", "AND", "True", "NOT",
    ];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        match lexer.next_token().unwrap().token {
            Token::Identifier(ident) => assert_eq!(ident, input),
            other => panic!("Expected Identifier, got {:?} for input: {}", other, input),
        }
    }
}

#[test]
fn test_identifiers() {
    assert_eq!(kinds("get_name _x9 C"), vec![
        Token::Identifier("get_name".into()),
        Token::Identifier("_x9".into()),
        Token::Identifier("C".into()),
    ]);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(kinds("42"), vec![Token::Integer(42)]);
    assert_eq!(kinds("0"), vec![Token::Integer(0)]);
    assert_eq!(kinds("3.25"), vec![Token::Float(3.25)]);
    assert_eq!(kinds("5.0"), vec![Token::Float(5.0)]);
}

#[test]
fn test_minus_is_separate_from_number() {
    assert_eq!(kinds("-5"), vec![Token::Minus, Token::Integer(5)]);
    assert_eq!(kinds("1-2"), vec![Token::Integer(1), Token::Minus, Token::Integer(2)]);
}

#[test]
fn test_strings() {
    assert_eq!(kinds("'fred'"), vec![Token::String("fred".into())]);
    assert_eq!(kinds("\"fred\""), vec![Token::String("fred".into())]);
    assert_eq!(kinds("''"), vec![Token::String(String::new())]);
    // No escapes; the other quote is an ordinary character
    assert_eq!(kinds("'say \"hi\"'"), vec![Token::String("say \"hi\"".into())]);
    assert_eq!(kinds("'a and b'"), vec![Token::String("a and b".into())]);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_token_positions_and_text() {
    let tokens = tokenize("  counter >= 10").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].position, Position { offset: 2 });
    assert_eq!(tokens[0].text, "counter");
    assert_eq!(tokens[1].position, Position { offset: 10 });
    assert_eq!(tokens[2].position, Position { offset: 13 });
    assert_eq!(tokens[2].text, "10");
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("   ");
    let eof = lexer.next_token().unwrap();
    assert_eq!(eof.token, Token::Eof);
    assert_eq!(eof.position, Position { offset: 3 });
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_stray_ampersand() {
    let err = tokenize("a & b").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '&',
            position: Position { offset: 2 }
        }
    );
    assert_eq!(err.to_string(), "Unexpected character '&' at position 2");
}

#[test]
fn test_stray_pipe_and_unknown_chars() {
    assert!(matches!(tokenize("a | b"), Err(LexError::UnexpectedChar { ch: '|', .. })));
    assert!(matches!(tokenize("a % b"), Err(LexError::UnexpectedChar { ch: '%', .. })));
    assert!(matches!(tokenize("$x"), Err(LexError::UnexpectedChar { ch: '$', .. })));
    assert!(matches!(tokenize("f(1, 2)"), Err(LexError::UnexpectedChar { ch: ',', .. })));
}

#[test]
fn test_trailing_dot_is_not_a_number() {
    let err = tokenize("5.").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            ch: '.',
            position: Position { offset: 1 }
        }
    );
    assert!(matches!(tokenize("1.2.3"), Err(LexError::UnexpectedChar { ch: '.', .. })));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("name == 'fred").unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            quote: '\'',
            position: Position { offset: 8 }
        }
    );
    assert_eq!(err.position(), Position { offset: 8 });
}

#[test]
fn test_integer_overflow_is_lex_error() {
    let err = tokenize("99999999999999999999").unwrap_err();
    assert!(matches!(err, LexError::InvalidNumber { ref text, .. } if text == "99999999999999999999"));
}

#[test]
fn test_iterator_stops_after_error() {
    let mut lexer = Lexer::new("1 & 2");
    assert_eq!(lexer.next().unwrap().unwrap().token, Token::Integer(1));
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
}
