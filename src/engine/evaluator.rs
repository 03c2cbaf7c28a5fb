use crate::config::AngleMode;
use crate::engine::{Arity, BoundedStack, Operator, Precedence};
use crate::error::{CalcError, CalcResult};
use log::trace;

/// Dual-stack reducer for a single expression.
///
/// Numbers and operators are fed in textual order; operators are reduced
/// eagerly as soon as an incoming operator proves they bind at least as tightly.
pub struct Evaluator {
    values: BoundedStack<f64>,
    operators: BoundedStack<Operator>,
    angle_mode: AngleMode,
    /// Nothing pushed yet, or the last push was an operator other than `)`.
    expects_operand: bool,
}

impl Evaluator {
    pub fn new(stack_capacity: usize, angle_mode: AngleMode) -> CalcResult<Self> {
        Ok(Self {
            values: BoundedStack::new(stack_capacity)?,
            operators: BoundedStack::new(stack_capacity)?,
            angle_mode,
            expects_operand: true,
        })
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn push_number(&mut self, value: f64) -> CalcResult<()> {
        trace!("push number {value}");
        self.values.push(value)?;
        self.expects_operand = false;
        Ok(())
    }

    pub fn push_operator(&mut self, op: Operator) -> CalcResult<()> {
        trace!("push operator {op}");
        if op == Operator::CloseBracket {
            self.close_bracket()?;
            self.expects_operand = false;
            return Ok(());
        }
        // `log x` with no base in front of it is the common logarithm.
        let op = if op == Operator::Log && self.expects_operand {
            Operator::Log10
        } else {
            op
        };

        while let Some(&top) = self.operators.peek() {
            if top.precedence(&op) == Precedence::Lower {
                break;
            }
            self.reduce()?;
        }
        self.operators.push(op)?;
        self.expects_operand = true;
        Ok(())
    }

    /// Reduces everything still pending and returns the single remaining value.
    pub fn finish(mut self) -> CalcResult<f64> {
        while let Some(&top) = self.operators.peek() {
            if top == Operator::OpenBracket {
                return Err(CalcError::BracketMismatch);
            }
            self.reduce()?;
        }

        match (self.values.pop(), self.values.len()) {
            (Some(value), 0) => Ok(value),
            (None, _) => Err(CalcError::MalformedExpression { values: 0 }),
            (Some(_), rest) => Err(CalcError::MalformedExpression { values: rest + 1 }),
        }
    }

    fn close_bracket(&mut self) -> CalcResult<()> {
        loop {
            match self.operators.peek().copied() {
                None => return Err(CalcError::BracketMismatch),
                Some(Operator::OpenBracket) => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(_) => self.reduce()?,
            }
        }
    }

    /// Pops one operator with its operands and pushes the result back.
    fn reduce(&mut self) -> CalcResult<()> {
        let Some(op) = self.operators.pop() else {
            return Ok(());
        };
        let underflow = || CalcError::ValueStackUnderflow { operator: op };

        let right = self.values.pop().ok_or_else(underflow)?;
        let result = match op.arity() {
            Arity::Unary => op.apply_unary(right, self.angle_mode)?,
            Arity::Binary => {
                let left = self.values.pop().ok_or_else(underflow)?;
                op.apply_binary(left, right)?
            }
        };
        trace!("reduced {op} to {result}");
        self.values.push(result)
    }
}
