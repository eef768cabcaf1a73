use crate::location::Location;
use crate::operator::BinaryOperator;
use crate::var::Var;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token<'s> {
    /// if
    If,
    /// while
    While,
    /// end
    End,
    /// a..z
    Variable(Var),
    /// 123
    IntLit(i32),
    /// +-*/<>
    Operator(BinaryOperator),
    /// =
    Assign,
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// anything else, rejected by the grammar
    Other(&'s str),
}

impl<'s> Token<'s> {
    pub fn classify(text: &'s str) -> Self {
        match text {
            "if" => Token::If,
            "while" => Token::While,
            "end" => Token::End,
            "=" => Token::Assign,
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            _ => {
                if let Some(var) = Var::from_word(text) {
                    Token::Variable(var)
                } else if let Ok(num) = text.parse() {
                    Token::IntLit(num)
                } else {
                    let mut chars = text.chars();
                    match (chars.next().and_then(BinaryOperator::from_char), chars.next()) {
                        (Some(op), None) => Token::Operator(op),
                        _ => Token::Other(text),
                    }
                }
            }
        }
    }
}

/// A token together with the text it was read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Word<'s> {
    pub token: Token<'s>,
    pub text: &'s str,
    pub location: Location,
}

impl<'s> Word<'s> {
    pub fn new(text: &'s str, location: Location) -> Self {
        Self {
            token: Token::classify(text),
            text,
            location,
        }
    }
}

#[test]
fn classify_words() {
    use pretty_assertions::assert_eq;

    assert_eq!(Token::classify("while"), Token::While);
    assert_eq!(Token::classify("x"), Token::Variable(Var::from_char('x').unwrap()));
    assert_eq!(Token::classify("007"), Token::IntLit(7));
    assert_eq!(Token::classify("<"), Token::Operator(BinaryOperator::Less));
    assert_eq!(Token::classify("10.0"), Token::Other("10.0"));
    assert_eq!(Token::classify("99999999999"), Token::Other("99999999999"));
    assert_eq!(Token::classify("endif"), Token::Other("endif"));
}
