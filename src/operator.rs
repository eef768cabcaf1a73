#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Div,
    /// <
    Less,
    /// >
    Greater,
}

impl BinaryOperator {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Sub),
            '*' => Some(BinaryOperator::Mul),
            '/' => Some(BinaryOperator::Div),
            '<' => Some(BinaryOperator::Less),
            '>' => Some(BinaryOperator::Greater),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
        }
    }
}
