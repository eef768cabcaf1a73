//! Recursive descent parser that runs the liveness analysis while it reads.
//!
//! No syntax tree is built. Every rule returns the text of what it parsed and
//! reports variable reads and writes to the [`Tracker`] as they happen.
//! `if`/`while` nesting lives on an explicit block stack and parentheses are
//! counted, so neither statement lists nor expressions recurse.

use crate::cursor::Cursor;
use crate::error::{AnalysisError, AnalysisResult, SyntaxError};
use crate::liveness::Tracker;
use crate::location::Location;
use crate::operator::BinaryOperator;
use crate::report::DeadStoreReport;
use crate::token::{Token, Word};
use crate::var::Var;
use tracing::warn;

/// An open statement list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Block {
    If,
    While,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    Continue,
    Finished,
}

pub struct Parser<'s> {
    cursor: Cursor<'s>,
    blocks: Vec<Block>,
    tracker: Tracker,
    finished: bool,
}

impl<'s> Parser<'s> {
    pub fn new(cursor: Cursor<'s>) -> Self {
        Self {
            cursor,
            blocks: Vec::with_capacity(20),
            tracker: Tracker::new(),
            finished: false,
        }
    }

    /// Number of open `if`/`while` blocks.
    #[inline]
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    fn end_of_input(&self, expected: &'static str) -> AnalysisError {
        SyntaxError::UnexpectedEndOfInput(expected, self.cursor.end_location()).into()
    }

    fn close_block(&mut self, block: Block) {
        if block == Block::While {
            self.tracker.exit_loop();
        }
    }

    fn close_all_blocks(&mut self) {
        while let Some(block) = self.blocks.pop() {
            self.close_block(block);
        }
    }

    /// Parses one statement, or closes one block on `end`.
    ///
    /// Returns [`Step::Finished`] once the program is over: either the input
    /// ran out, which closes every open block, or an `end` appeared at top
    /// level, which ignores the rest of the input.
    pub fn step(&mut self) -> AnalysisResult<Step> {
        if self.finished {
            return Ok(Step::Finished);
        }

        let word = match self.cursor.peek(0).copied() {
            Some(word) => word,
            None => {
                self.close_all_blocks();
                self.finished = true;
                return Ok(Step::Finished);
            }
        };

        match word.token {
            Token::End => {
                self.cursor.advance();
                match self.blocks.pop() {
                    Some(block) => self.close_block(block),
                    None => {
                        let ignored = self.cursor.remaining();
                        if let Some(next) = ignored.first() {
                            warn!(
                                count = ignored.len(),
                                line = next.location.line,
                                "words after the final 'end' are ignored"
                            );
                        }
                        self.finished = true;
                        return Ok(Step::Finished);
                    }
                }
            }
            Token::Variable(var) => self.parse_assignment(var, word.location)?,
            Token::If => {
                self.cursor.advance();
                self.parse_condition()?;
                self.blocks.push(Block::If);
            }
            Token::While => {
                self.cursor.advance();
                self.parse_condition()?;
                self.tracker.enter_loop();
                self.blocks.push(Block::While);
            }
            _ => {
                return Err(SyntaxError::UnexpectedStatement(
                    word.text.to_string(),
                    word.location,
                )
                .into())
            }
        }

        Ok(Step::Continue)
    }

    fn parse_assignment(&mut self, var: Var, location: Location) -> AnalysisResult<()> {
        self.cursor.advance();

        match self.cursor.peek(0).copied() {
            Some(Word {
                token: Token::Assign,
                ..
            }) => self.cursor.advance(),
            next => {
                return Err(AnalysisError::InvariantViolation {
                    var,
                    found: next.map_or("", |word| word.text).to_string(),
                    location: next
                        .map_or_else(|| self.cursor.end_location(), |word| word.location),
                })
            }
        }

        let expr = self.parse_expression()?;
        self.tracker.write(var, format!("{} = {}", var, expr), location);

        Ok(())
    }

    #[inline]
    fn parse_condition(&mut self) -> AnalysisResult<String> {
        self.parse_expression()
    }

    fn peek_operator(&self) -> Option<BinaryOperator> {
        match self.cursor.peek(0)?.token {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Operands chained by operators of equal precedence. Everything after an
    /// operator is its right hand side.
    ///
    /// Parentheses only add text around their contents, so open ones are
    /// counted instead of recursed into.
    fn parse_expression(&mut self) -> AnalysisResult<String> {
        let mut repr = String::new();
        let mut open_parens = 0usize;

        'operand: loop {
            let word = match self.cursor.peek(0).copied() {
                Some(word) => word,
                None => return Err(self.end_of_input("constant or variable")),
            };

            if word.token == Token::OpenParen {
                self.cursor.advance();
                repr.push('(');
                open_parens += 1;
                continue;
            }

            self.parse_leaf(word, &mut repr)?;

            loop {
                if let Some(op) = self.peek_operator() {
                    self.cursor.advance();
                    repr.push(' ');
                    repr.push_str(op.name());
                    repr.push(' ');
                    continue 'operand;
                }

                if open_parens == 0 {
                    return Ok(repr);
                }

                match self.cursor.peek(0).copied() {
                    Some(Word {
                        token: Token::CloseParen,
                        ..
                    }) => self.cursor.advance(),
                    Some(next) => {
                        return Err(
                            SyntaxError::ExpectedCloseParen(next.text.to_string(), next.location)
                                .into(),
                        )
                    }
                    None => return Err(self.end_of_input("')'")),
                }
                repr.push(')');
                open_parens -= 1;
            }
        }
    }

    /// A constant, a negative constant or a variable.
    fn parse_leaf(&mut self, word: Word<'s>, repr: &mut String) -> AnalysisResult<()> {
        match word.token {
            Token::IntLit(num) => repr.push_str(&num.to_string()),
            Token::Operator(BinaryOperator::Sub) => {
                self.cursor.advance();
                match self.cursor.peek(0).copied() {
                    Some(Word {
                        token: Token::IntLit(num),
                        ..
                    }) => {
                        repr.push('-');
                        repr.push_str(&num.to_string());
                    }
                    Some(next) => {
                        return Err(SyntaxError::ExpectedIntAfterMinus(
                            next.text.to_string(),
                            next.location,
                        )
                        .into())
                    }
                    None => return Err(self.end_of_input("integer after minus sign")),
                }
            }
            Token::Variable(var) => {
                self.tracker.read(var);
                repr.push(var.name());
            }
            _ => {
                return Err(
                    SyntaxError::ExpectedOperand(word.text.to_string(), word.location).into(),
                )
            }
        }

        self.cursor.advance();
        Ok(())
    }

    /// Closes whatever is still open and flushes the liveness state.
    pub fn finish(mut self) -> DeadStoreReport {
        self.close_all_blocks();
        let location = self.cursor.end_location();
        self.tracker.finish(location)
    }

    pub fn parse(mut self) -> AnalysisResult<DeadStoreReport> {
        while self.step()? == Step::Continue {}
        Ok(self.finish())
    }
}

pub fn parse(cursor: Cursor<'_>) -> AnalysisResult<DeadStoreReport> {
    Parser::new(cursor).parse()
}

#[cfg(test)]
mod tests {
    use super::{parse, Block, Parser, Step};
    use crate::cursor::Cursor;
    use crate::error::{AnalysisError, SyntaxError};
    use crate::lexer::lex;
    use crate::location::Location;
    use crate::var::Var;
    use pretty_assertions::assert_eq;

    fn dead_stores(source: &str) -> Vec<String> {
        parse(Cursor::new(lex(source)))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn error(source: &str) -> AnalysisError {
        parse(Cursor::new(lex(source))).unwrap_err()
    }

    #[test]
    fn render_expressions() {
        assert_eq!(dead_stores("a = ( b + 1 ) * - 2"), &["a = (b + 1) * -2"]);
        assert_eq!(dead_stores("a=((b))"), &["a = ((b))"]);
        assert_eq!(dead_stores("x = 1+2*3<y"), &["x = 1 + 2 * 3 < y"]);
        assert_eq!(dead_stores("n = 007"), &["n = 7"]);
    }

    #[test]
    fn deeply_nested_parens() {
        let depth = 100_000;
        let source = format!("a = {}x{}", "( ".repeat(depth), " )".repeat(depth));
        let expected = format!("a = {}x{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(dead_stores(&source), &[expected]);

        let unclosed = format!("a = {}1{}", "( ".repeat(depth), " )".repeat(depth - 1));
        assert_eq!(
            error(&unclosed),
            AnalysisError::Syntax(SyntaxError::UnexpectedEndOfInput(
                "')'",
                Location::new(1)
            ))
        );
    }

    #[test]
    fn step_tracks_nesting() {
        let source = "while a < 3 if a b = 1 end a = a + 1 end c = 2";
        let mut parser = Parser::new(Cursor::new(lex(source)));

        let mut depths = Vec::new();
        let mut loops = Vec::new();
        while parser.step().unwrap() == Step::Continue {
            depths.push(parser.depth());
            loops.push(parser.tracker().loop_depth());
        }

        assert_eq!(depths, &[1, 2, 2, 1, 1, 0, 0]);
        assert_eq!(loops, &[1, 1, 1, 1, 1, 0, 0]);
        assert_eq!(parser.step().unwrap(), Step::Finished);
        assert_eq!(
            parser.finish().lines().collect::<Vec<_>>(),
            &["b = 1", "c = 2"]
        );
    }

    #[test]
    fn blocks_stack_up() {
        let mut parser = Parser::new(Cursor::new(lex("if a while b if c")));
        for _ in 0..3 {
            assert_eq!(parser.step().unwrap(), Step::Continue);
        }

        assert_eq!(parser.blocks(), &[Block::If, Block::While, Block::If]);
        assert_eq!(parser.tracker().loop_depth(), 1);

        assert_eq!(parser.step().unwrap(), Step::Finished);
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.tracker().loop_depth(), 0);
    }

    #[test]
    fn end_of_input_closes_loops() {
        assert_eq!(dead_stores("while a b = a"), &["b = a"]);
    }

    #[test]
    fn top_level_end_stops_program() {
        assert_eq!(dead_stores("a = 1 end a = 2"), &["a = 1"]);
        assert!(dead_stores("end end = ( garbage").is_empty());
    }

    #[test]
    fn unexpected_operand() {
        let err = error("a = 10.0");

        assert_eq!(
            err,
            AnalysisError::Syntax(SyntaxError::ExpectedOperand(
                "10.0".into(),
                Location::new(1)
            ))
        );
        assert_eq!(
            err.to_string(),
            "syntax error: L1: unexpected word '10.0', constant or variable expected"
        );
    }

    #[test]
    fn missing_assign_is_invariant_violation() {
        assert_eq!(
            error("a 10"),
            AnalysisError::InvariantViolation {
                var: Var::from_char('a').unwrap(),
                found: "10".into(),
                location: Location::new(1),
            }
        );

        match error("b = 1\na") {
            AnalysisError::InvariantViolation { found, location, .. } => {
                assert_eq!(found, "");
                assert_eq!(location, Location::new(2));
            }
            err => panic!("unexpected error {:?}", err),
        }
    }

    #[test]
    fn unclosed_paren() {
        assert_eq!(
            error("a = ( 1 b"),
            AnalysisError::Syntax(SyntaxError::ExpectedCloseParen(
                "b".into(),
                Location::new(1)
            ))
        );
        assert_eq!(
            error("a = ( 1 + 2"),
            AnalysisError::Syntax(SyntaxError::UnexpectedEndOfInput(
                "')'",
                Location::new(1)
            ))
        );
    }

    #[test]
    fn dangling_minus() {
        assert_eq!(
            error("a = - b"),
            AnalysisError::Syntax(SyntaxError::ExpectedIntAfterMinus(
                "b".into(),
                Location::new(1)
            ))
        );
        assert_eq!(
            error("a = 1 -"),
            AnalysisError::Syntax(SyntaxError::UnexpectedEndOfInput(
                "constant or variable",
                Location::new(1)
            ))
        );
    }

    #[test]
    fn unexpected_statement() {
        assert_eq!(
            error("a = 1\n= 2"),
            AnalysisError::Syntax(SyntaxError::UnexpectedStatement(
                "=".into(),
                Location::new(2)
            ))
        );
        assert_eq!(
            error("while x endwhile"),
            AnalysisError::Syntax(SyntaxError::UnexpectedStatement(
                "endwhile".into(),
                Location::new(1)
            ))
        );
    }
}
