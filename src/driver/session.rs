use crate::answers::AnswerStore;
use crate::config::{AngleMode, CalcConfig};
use crate::driver::{tokenize, Token};
use crate::engine::{Evaluator, Operator};
use crate::error::{CalcError, CalcResult};
use log::{debug, error};

/// A calculator session: configuration plus the answer history that
/// expressions can refer back to.
pub struct Calculator {
    config: CalcConfig,
    answers: AnswerStore,
}

impl Calculator {
    pub fn new(config: CalcConfig) -> CalcResult<Self> {
        let answers = AnswerStore::with_config(&config.answers)?;
        Ok(Self { config, answers })
    }

    /// Evaluates `expression` and, if configured, records the result.
    pub fn evaluate(&mut self, expression: &str) -> CalcResult<f64> {
        let tokens = tokenize(expression)?;
        self.evaluate_tokens(tokens)
    }

    /// Evaluates an already tokenized expression.
    pub fn evaluate_tokens<I>(&mut self, tokens: I) -> CalcResult<f64>
    where
        I: IntoIterator<Item = Token>,
    {
        let result = self.reduce_tokens(tokens);
        match &result {
            Ok(value) => {
                debug!("Result: {}", value);
                if self.config.store_answers {
                    self.answers.append(*value)?;
                }
            }
            Err(e) if e.is_fatal() => error!("Evaluation failed: {}", e),
            Err(e) => debug!("Evaluation failed: {}", e),
        }
        result
    }

    fn reduce_tokens<I>(&self, tokens: I) -> CalcResult<f64>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut evaluator = Evaluator::new(self.config.stack_capacity, self.config.angle_mode)?;
        let mut tokens = tokens.into_iter().peekable();
        let mut after_open_bracket = false;
        let mut expects_operand = true;
        let mut negative = false;

        while let Some(token) = tokens.next() {
            debug!("Token: {:?}", token);
            let mut opens_bracket = false;
            let mut sign = false;
            match token {
                Token::Number(value) => {
                    evaluator.push_number(if negative { -value } else { value })?;
                    expects_operand = false;
                }
                Token::Answer(reference) => {
                    let value = self.answers.resolve(&reference)?;
                    evaluator.push_number(if negative { -value } else { value })?;
                    expects_operand = false;
                }
                Token::Symbol(symbol) => {
                    let op = Operator::identify(&symbol)?;
                    if op == Operator::Subtract && expects_operand {
                        if after_open_bracket {
                            // `(-x` reads as `(0 - x`.
                            evaluator.push_number(0.0)?;
                        } else {
                            // Anywhere else a `-` in operand position signs the
                            // literal right after it: `5 P -1`, `-2 * 3`.
                            sign = matches!(
                                tokens.peek(),
                                Some(Token::Number(_) | Token::Answer(_))
                            );
                        }
                    }
                    if !sign {
                        opens_bracket = op == Operator::OpenBracket;
                        expects_operand = op != Operator::CloseBracket;
                        evaluator.push_operator(op)?;
                    }
                }
            }
            after_open_bracket = opens_bracket;
            negative = sign;
        }

        evaluator.finish()
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.config.angle_mode
    }

    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.config.angle_mode = angle_mode;
    }

    pub fn set_store_answers(&mut self, store_answers: bool) {
        self.config.store_answers = store_answers;
    }

    pub fn toggle_auto_evict(&mut self) {
        self.answers.toggle_auto_evict();
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn last_answer(&self) -> Option<f64> {
        self.answers.last()
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }
}

impl TryFrom<CalcConfig> for Calculator {
    type Error = CalcError;

    fn try_from(config: CalcConfig) -> Result<Self, Self::Error> {
        Calculator::new(config)
    }
}
