//! Formula parser - turns `2d6x + 3[Bonus]` into signed terms

use super::error::FormulaError;
use super::term::{DieModifier, DieTerm, NumericTerm, Operator, SignedTerm, Term};

/// Parse a formula string into its signed terms
pub(crate) fn parse_terms(formula: &str) -> Result<Vec<SignedTerm>, FormulaError> {
    let mut parser = Parser::new(formula);

    parser.skip_whitespace();
    if parser.at_end() {
        return Err(FormulaError::Empty);
    }

    let mut terms = Vec::new();
    let mut operator = parser.operator().unwrap_or(Operator::Add);

    loop {
        parser.skip_whitespace();
        if parser.at_end() {
            return Err(FormulaError::DanglingOperator {
                formula: formula.to_string(),
            });
        }

        let term = parser.term()?;
        terms.push(SignedTerm { operator, term });

        parser.skip_whitespace();
        if parser.at_end() {
            break;
        }

        operator = match parser.operator() {
            Some(op) => op,
            None => return Err(parser.unexpected()),
        };
    }

    Ok(terms)
}

struct Parser<'a> {
    formula: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(formula: &'a str) -> Self {
        Parser {
            formula,
            chars: formula.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> FormulaError {
        match self.peek() {
            Some(found) => FormulaError::UnexpectedToken {
                formula: self.formula.to_string(),
                position: self.pos,
                found,
            },
            None => FormulaError::DanglingOperator {
                formula: self.formula.to_string(),
            },
        }
    }

    fn operator(&mut self) -> Option<Operator> {
        let op = match self.peek()? {
            '+' => Operator::Add,
            '-' => Operator::Subtract,
            _ => return None,
        };
        self.pos += 1;
        Some(op)
    }

    fn number(&mut self) -> Result<Option<u32>, FormulaError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }

        let digits: String = self.chars[start..self.pos].iter().collect();
        digits
            .parse::<u32>()
            .map(Some)
            .map_err(|_| FormulaError::NumberOutOfRange {
                formula: self.formula.to_string(),
                digits,
            })
    }

    fn term(&mut self) -> Result<Term, FormulaError> {
        let start = self.pos;
        let count = self.number()?;

        if matches!(self.peek(), Some('d') | Some('D')) {
            self.pos += 1;
            let faces = match self.number()? {
                Some(faces) if faces > 0 => faces,
                _ => {
                    return Err(FormulaError::InvalidDie {
                        term: self.chars[start..self.pos].iter().collect(),
                    })
                }
            };
            let modifiers = self.modifiers()?;
            let flavor = self.flavor()?;
            let die = DieTerm {
                number: count.unwrap_or(1),
                faces,
                modifiers,
                flavor,
            };
            die.check_dice_limit()?;
            return Ok(Term::Die(die));
        }

        match count {
            Some(value) => Ok(Term::Numeric(NumericTerm {
                value,
                flavor: self.flavor()?,
            })),
            None => Err(self.unexpected()),
        }
    }

    fn modifiers(&mut self) -> Result<Vec<DieModifier>, FormulaError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let run: String = self.chars[start..self.pos].iter().collect();

        let mut modifiers = Vec::new();
        let mut rest = run.as_str();
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix("xo") {
                modifiers.push(DieModifier::ExplodeOnce);
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('x') {
                modifiers.push(DieModifier::Explode);
                rest = tail;
            } else {
                return Err(FormulaError::UnknownModifier {
                    formula: self.formula.to_string(),
                    modifier: rest.to_string(),
                });
            }
        }
        Ok(modifiers)
    }

    fn flavor(&mut self) -> Result<Option<String>, FormulaError> {
        let checkpoint = self.pos;
        self.skip_whitespace();
        if self.peek() != Some('[') {
            self.pos = checkpoint;
            return Ok(None);
        }
        self.pos += 1;

        let mut text = String::new();
        loop {
            match self.bump() {
                Some(']') => break,
                Some(c) => text.push(c),
                None => {
                    return Err(FormulaError::UnterminatedFlavor {
                        formula: self.formula.to_string(),
                    })
                }
            }
        }
        Ok(Some(text))
    }
}
