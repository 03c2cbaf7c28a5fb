use crate::answers::AnswerStore;
use crate::error::{CalcError, CalcResult};

/// Letters that introduce an answer reference such as `A3` or `a12`.
pub const ANSWER_PREFIXES: [char; 2] = ['A', 'a'];

impl AnswerStore {
    /// Parses `A<digits>` / `a<digits>` into an answer index.
    pub fn parse_reference(&self, text: &str) -> CalcResult<usize> {
        let digits = text
            .strip_prefix(ANSWER_PREFIXES)
            .ok_or_else(|| CalcError::parse(format!("Not an answer reference: {}", text)))?;
        if digits.is_empty() {
            return Err(CalcError::invalid_reference(text));
        }

        let mut index: usize = 0;
        for c in digits.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| CalcError::invalid_reference(text))?;
            index = index
                .checked_mul(10)
                .and_then(|index| index.checked_add(digit as usize))
                .ok_or_else(|| CalcError::invalid_reference(text))?;
        }

        if index >= self.next_index() {
            return Err(CalcError::invalid_reference(text));
        }
        Ok(index)
    }

    /// Parses a reference and fetches the answer behind it.
    pub fn resolve(&self, text: &str) -> CalcResult<f64> {
        let index = self.parse_reference(text)?;
        self.get(index)
            .map_err(|_| CalcError::invalid_reference(text))
    }
}
