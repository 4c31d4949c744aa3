// tests/parser_tests.rs

use expression_parser::ast::{BinOp, Expr, UnOp};
use expression_parser::lexer::{Lexer, Position};
use expression_parser::parser::{ParseError, Parser, SyntaxError};
use expression_parser::{Value, parse};

fn int(n: i64) -> Expr {
    Expr::Literal(Value::Integer(n))
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn parse_error(input: &str) -> ParseError {
    match parse(input) {
        Err(SyntaxError::Parse(e)) => e,
        other => panic!("Expected parse error for {:?}, got {:?}", input, other),
    }
}

// ============================================================================
// Simple tests
// ============================================================================

#[test]
fn test_comparison() {
    let lexer = Lexer::new("price > 100");
    let parser = Parser::new(lexer).unwrap();
    let expr = parser.parse().unwrap();

    assert_eq!(expr, Expr::binary(BinOp::GreaterThan, ident("price"), int(100)));
}

#[test]
fn test_parentheses() {
    let expr = parse("(1 + 2) * 3").unwrap();

    // Should be: Multiply(Add(1, 2), 3)
    match expr {
        Expr::BinaryOp {
            op: BinOp::Multiply,
            left,
            right,
        } => {
            assert_eq!(*left, Expr::binary(BinOp::Add, int(1), int(2)));
            assert_eq!(*right, int(3));
        }
        _ => panic!("Expected multiplication"),
    }
}

#[test]
fn test_arithmetic_precedence() {
    // Should be: Add(1, Multiply(2, 3))
    assert_eq!(
        parse("1 + 2 * 3").unwrap(),
        Expr::binary(BinOp::Add, int(1), Expr::binary(BinOp::Multiply, int(2), int(3)))
    );
}

#[test]
fn test_full_precedence_ladder() {
    // or < and < equality < relational < additive < multiplicative < unary
    let expr = parse("a or b and c == d < e + f * -g").unwrap();
    let expected = Expr::binary(
        BinOp::Or,
        ident("a"),
        Expr::binary(
            BinOp::And,
            ident("b"),
            Expr::binary(
                BinOp::Equal,
                ident("c"),
                Expr::binary(
                    BinOp::LessThan,
                    ident("d"),
                    Expr::binary(
                        BinOp::Add,
                        ident("e"),
                        Expr::binary(
                            BinOp::Multiply,
                            ident("f"),
                            Expr::unary(UnOp::Negate, ident("g")),
                        ),
                    ),
                ),
            ),
        ),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_left_associativity() {
    assert_eq!(
        parse("8 - 4 - 2").unwrap(),
        Expr::binary(BinOp::Subtract, Expr::binary(BinOp::Subtract, int(8), int(4)), int(2))
    );
    assert_eq!(
        parse("8 / 4 / 2").unwrap(),
        Expr::binary(BinOp::Divide, Expr::binary(BinOp::Divide, int(8), int(4)), int(2))
    );
    assert_eq!(
        parse("a or b or c").unwrap(),
        Expr::binary(BinOp::Or, Expr::binary(BinOp::Or, ident("a"), ident("b")), ident("c"))
    );
    assert_eq!(
        parse("1 < 2 < 3").unwrap(),
        Expr::binary(BinOp::LessThan, Expr::binary(BinOp::LessThan, int(1), int(2)), int(3))
    );
}

#[test]
fn test_unary_binds_tighter_than_and() {
    assert_eq!(
        parse("not true and false").unwrap(),
        Expr::binary(
            BinOp::And,
            Expr::unary(UnOp::Not, Expr::Literal(Value::Boolean(true))),
            Expr::Literal(Value::Boolean(false)),
        )
    );
}

#[test]
fn test_unary_binds_tighter_than_equality() {
    assert_eq!(
        parse("not a == b").unwrap(),
        Expr::binary(BinOp::Equal, Expr::unary(UnOp::Not, ident("a")), ident("b"))
    );
}

#[test]
fn test_nested_unary() {
    assert_eq!(
        parse("not not x").unwrap(),
        Expr::unary(UnOp::Not, Expr::unary(UnOp::Not, ident("x")))
    );
    assert_eq!(
        parse("--1").unwrap(),
        Expr::unary(UnOp::Negate, Expr::unary(UnOp::Negate, int(1)))
    );
}

#[test]
fn test_aliases() {
    assert_eq!(parse("a && b").unwrap(), parse("a and b").unwrap());
    assert_eq!(parse("a || b").unwrap(), parse("a or b").unwrap());
    assert_eq!(parse("!a").unwrap(), parse("not a").unwrap());
    assert_eq!(parse("a = 1").unwrap(), parse("a == 1").unwrap());
}

// ============================================================================
// Literals and Names
// ============================================================================

#[test]
fn test_parse_literals() {
    assert_eq!(parse("42").unwrap(), int(42));
    assert_eq!(parse("3.5").unwrap(), Expr::Literal(Value::Float(3.5)));
    assert_eq!(parse("'hello world'").unwrap(), Expr::Literal(Value::String("hello world".into())));
    assert_eq!(parse("true").unwrap(), Expr::Literal(Value::Boolean(true)));
    assert_eq!(parse("false").unwrap(), Expr::Literal(Value::Boolean(false)));
}

#[test]
fn test_identifier_vs_call() {
    assert_eq!(parse("counter").unwrap(), ident("counter"));
    assert_eq!(parse("get_name()").unwrap(), Expr::Call("get_name".into()));
    assert_eq!(parse("get_name ( )").unwrap(), Expr::Call("get_name".into()));
}

#[test]
fn test_redundant_parentheses() {
    assert_eq!(parse("((counter))").unwrap(), ident("counter"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_input() {
    let err = parse_error("");
    assert_eq!(err.expected, "an expression");
    assert_eq!(err.found, "end of input");
    assert_eq!(err.position, Position { offset: 0 });

    parse_error("   ");
}

#[test]
fn test_unbalanced_parentheses() {
    let err = parse_error("(1+2");
    assert_eq!(err.expected, "')'");
    assert_eq!(err.found, "end of input");
    assert_eq!(err.position, Position { offset: 4 });

    let err = parse_error("1+2)");
    assert_eq!(err.expected, "end of input");
    assert_eq!(err.found, "')'");

    parse_error("()");
}

#[test]
fn test_trailing_tokens() {
    let err = parse_error("1 2");
    assert_eq!(err.expected, "end of input");
    assert_eq!(err.found, "number 2");
    assert_eq!(err.position, Position { offset: 2 });
    assert_eq!(err.to_string(), "Expected end of input, found number 2 at position 2");
}

#[test]
fn test_missing_operand() {
    let err = parse_error("1 +");
    assert_eq!(err.found, "end of input");

    let err = parse_error("1 + * 2");
    assert_eq!(err.expected, "an expression");
    assert_eq!(err.found, "'*'");

    let err = parse_error("and x");
    assert_eq!(err.found, "'and'");

    parse_error("not");
}

#[test]
fn test_call_with_arguments_is_rejected() {
    let err = parse_error("whisky(1)");
    assert_eq!(err.found, "number 1");
    assert!(err.expected.starts_with("')'"));
}

#[test]
fn test_lex_errors_surface_from_parse() {
    match parse("a & b") {
        Err(SyntaxError::Lex(e)) => assert_eq!(e.position(), Position { offset: 2 }),
        other => panic!("Expected lex error, got {:?}", other),
    }
    assert!(matches!(parse("'open"), Err(SyntaxError::Lex(_))));
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(parse(&deep), Err(SyntaxError::Parse(_))));

    let negations = format!("{}1", "-".repeat(10_000));
    assert!(matches!(parse(&negations), Err(SyntaxError::Parse(_))));

    let fine = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(parse(&fine).unwrap(), int(1));
}

fn chain(terms: usize, op: &str) -> String {
    vec!["1"; terms].join(op)
}

#[test]
fn test_long_flat_chain_is_an_error_not_a_crash() {
    let err = parse_error(&chain(200_000, "+"));
    assert_eq!(err.expected, "shallower nesting");

    let err = parse_error(&chain(200_000, " and "));
    assert_eq!(err.expected, "shallower nesting");
}

#[test]
fn test_chain_length_limit() {
    // 256 operators
    assert!(parse(&chain(257, "+")).is_ok());
    assert!(parse(&chain(257, "*")).is_ok());

    let err = parse_error(&chain(258, "+"));
    assert_eq!(err.expected, "shallower nesting");
    assert_eq!(err.to_string().split(" found ").next(), Some("Expected shallower nesting,"));
}

#[test]
fn test_height_counts_through_parentheses_and_unary() {
    let full = chain(257, "+");

    // Grouping adds no level
    assert!(parse(&format!("(({}))", full)).is_ok());

    // Each operator on top of a full chain does
    assert_eq!(parse_error(&format!("-({})", full)).expected, "shallower nesting");
    assert_eq!(parse_error(&format!("({}) == 1", full)).expected, "shallower nesting");

    // Two shorter chains side by side stay within the limit
    let half = chain(200, "+");
    assert!(parse(&format!("({}) * ({})", half, half)).is_ok());
}

#[test]
fn test_parser_is_consumed_by_parse() {
    let parser = Parser::new(Lexer::new("a or b")).unwrap();
    assert_eq!(
        parser.parse().unwrap(),
        Expr::binary(BinOp::Or, ident("a"), ident("b"))
    );
}
