use crate::config::AngleMode;
use crate::engine::Operator;
use crate::error::{CalcError, CalcResult};
use log::trace;

fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn is_boolean(value: f64) -> bool {
    value == 0.0 || value == 1.0
}

/// Above 2^53 consecutive integers are no longer distinct as `f64`, so
/// counting arguments stop being exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn is_natural(value: f64) -> bool {
    (0.0..=MAX_EXACT_INTEGER).contains(&value) && value.fract() == 0.0
}

/// `n! / (n - k)!`, multiplied out so large `n` stays finite as long as the
/// result does. Every factor is at least 1, so once the product overflows it
/// stays infinite.
fn permutations(n: f64, k: f64) -> f64 {
    let mut result = 1.0;
    for step in 0..k as u64 {
        result *= n - step as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

/// `n! / (k! (n - k)!)`. With `k <= n - k` each step at least doubles the
/// running value, so the loop ends after about a thousand steps at most.
fn combinations(n: f64, k: f64) -> f64 {
    let k = k.min(n - k);
    let mut result: f64 = 1.0;
    for step in 1..=k as u64 {
        let i = step as f64;
        let next = result * (n - k + i) / i;
        result = if next.is_finite() {
            next
        } else {
            result / i * (n - k + i)
        };
        if result.is_infinite() {
            break;
        }
    }
    result.round()
}

fn shift(value: f64, amount: f64, left: bool) -> f64 {
    let value = value as i64;
    let amount = amount as i64;
    let shifted = u32::try_from(amount).ok().and_then(|amount| {
        if left {
            value.checked_shl(amount)
        } else {
            value.checked_shr(amount)
        }
    });
    match shifted {
        Some(result) => result as f64,
        None if !left && value < 0 => -1.0,
        None => 0.0,
    }
}

/// Sine and cosine of an angle given in `mode`. Exact multiples of a right
/// angle produce exact results so that `tan 90` in degrees is caught as a
/// zero denominator rather than yielding a huge finite number.
fn sin_cos(angle: f64, mode: AngleMode) -> (f64, f64) {
    let quarters = angle / mode.quarter_turn();
    if quarters.is_finite() && quarters.fract() == 0.0 && mode != AngleMode::Radians {
        return match quarters.rem_euclid(4.0) as u8 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    if angle == 0.0 {
        return (0.0, 1.0);
    }
    mode.to_radians(angle).sin_cos()
}

impl Operator {
    /// Applies a one-operand operator to `x`.
    pub fn apply_unary(&self, x: f64, mode: AngleMode) -> CalcResult<f64> {
        trace!("{self} {x}");
        let undefined = |operator: Operator| CalcError::RangeUndefined { operator, value: x };
        let out_of_domain = |operator: Operator| CalcError::DomainUndefined { operator, value: x };

        let result = match self {
            Operator::BitNot => !(x as i64) as f64,
            Operator::Not => {
                if !is_boolean(x) {
                    return Err(CalcError::InvalidOperator { operator: *self });
                }
                truth(x == 0.0)
            }

            Operator::Sin => sin_cos(x, mode).0,
            Operator::Cos => sin_cos(x, mode).1,
            Operator::Tan => {
                let (sin, cos) = sin_cos(x, mode);
                if cos == 0.0 {
                    return Err(undefined(*self));
                }
                sin / cos
            }
            Operator::Sec => {
                let cos = sin_cos(x, mode).1;
                if cos == 0.0 {
                    return Err(undefined(*self));
                }
                1.0 / cos
            }
            Operator::Cosec => {
                let sin = sin_cos(x, mode).0;
                if sin == 0.0 {
                    return Err(undefined(*self));
                }
                1.0 / sin
            }
            Operator::Cot => {
                let (sin, cos) = sin_cos(x, mode);
                if sin == 0.0 {
                    return Err(undefined(*self));
                }
                cos / sin
            }

            Operator::Asin => {
                if !(-1.0..=1.0).contains(&x) {
                    return Err(out_of_domain(*self));
                }
                mode.radians_to_unit(x.asin())
            }
            Operator::Acos => {
                if !(-1.0..=1.0).contains(&x) {
                    return Err(out_of_domain(*self));
                }
                mode.radians_to_unit(x.acos())
            }
            Operator::Atan => mode.radians_to_unit(x.atan()),
            Operator::Asec => {
                if x.abs() < 1.0 {
                    return Err(out_of_domain(*self));
                }
                mode.radians_to_unit((1.0 / x).acos())
            }
            Operator::Acosec => {
                if x.abs() < 1.0 {
                    return Err(out_of_domain(*self));
                }
                mode.radians_to_unit((1.0 / x).asin())
            }
            Operator::Acot => mode.radians_to_unit((1.0 / x).atan()),

            Operator::Sinh => mode.to_radians(x).sinh(),
            Operator::Cosh => mode.to_radians(x).cosh(),
            Operator::Tanh => mode.to_radians(x).tanh(),

            Operator::Ln => {
                if x <= 0.0 {
                    return Err(undefined(*self));
                }
                x.ln()
            }
            Operator::Log10 => {
                if x <= 0.0 {
                    return Err(undefined(*self));
                }
                x.log10()
            }

            Operator::Abs => x.abs(),
            Operator::Floor => x.floor(),
            Operator::Ceil => x.ceil(),

            _ => return Err(CalcError::InvalidOperator { operator: *self }),
        };
        Ok(result)
    }

    /// Applies a two-operand operator to `left` and `right`.
    pub fn apply_binary(&self, left: f64, right: f64) -> CalcResult<f64> {
        trace!("{left} {self} {right}");
        let result = match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                left / right
            }
            Operator::Power => left.powf(right),
            // IEEE remainder: `x % 0` is NaN, not an error.
            Operator::Modulo => left % right,

            Operator::Permutation | Operator::Combination => {
                if !is_natural(left) || !is_natural(right) || left < right {
                    return Err(CalcError::FactorialDomainError {
                        operator: *self,
                        left,
                        right,
                    });
                }
                if *self == Operator::Permutation {
                    permutations(left, right)
                } else {
                    combinations(left, right)
                }
            }

            Operator::BitAnd => ((left as i64) & (right as i64)) as f64,
            Operator::BitOr => ((left as i64) | (right as i64)) as f64,
            Operator::ShiftLeft => shift(left, right, true),
            Operator::ShiftRight => shift(left, right, false),

            Operator::GreaterThan => truth(left > right),
            Operator::LessThan => truth(left < right),
            Operator::GreaterThanOrEqual => truth(left >= right),
            Operator::LessThanOrEqual => truth(left <= right),
            Operator::Equal => truth(left == right),
            Operator::NotEqual => truth(left != right),

            Operator::And | Operator::Or => {
                if !is_boolean(left) || !is_boolean(right) {
                    return Err(CalcError::InvalidOperator { operator: *self });
                }
                if *self == Operator::And {
                    truth(left == 1.0 && right == 1.0)
                } else {
                    truth(left == 1.0 || right == 1.0)
                }
            }

            // `b log x` is the logarithm of `x` to base `b`.
            Operator::Log => {
                if left <= 0.0 || left == 1.0 || right <= 0.0 {
                    return Err(CalcError::RangeUndefined {
                        operator: *self,
                        value: if right <= 0.0 { right } else { left },
                    });
                }
                right.ln() / left.ln()
            }

            _ => return Err(CalcError::InvalidOperator { operator: *self }),
        };
        Ok(result)
    }
}
