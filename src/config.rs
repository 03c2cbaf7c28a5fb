use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Unit in which trigonometric operands are read and inverse results are
/// reported.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
    Gradians,
}

impl AngleMode {
    /// Converts an angle expressed in this unit into radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * PI / 180.0,
            AngleMode::Gradians => angle * PI / 200.0,
        }
    }

    /// Converts radians into this unit.
    pub fn radians_to_unit(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * 180.0 / PI,
            AngleMode::Gradians => angle * 200.0 / PI,
        }
    }

    /// A right angle measured in this unit.
    pub fn quarter_turn(self) -> f64 {
        match self {
            AngleMode::Radians => FRAC_PI_2,
            AngleMode::Degrees => 90.0,
            AngleMode::Gradians => 100.0,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AngleMode::Radians => "rad",
            AngleMode::Degrees => "deg",
            AngleMode::Gradians => "grad",
        };
        f.write_str(name)
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(AngleMode::Radians),
            "deg" | "degree" | "degrees" => Ok(AngleMode::Degrees),
            "grad" | "gradian" | "gradians" => Ok(AngleMode::Gradians),
            _ => Err(format!("Unknown angle mode: {}", value)),
        }
    }
}

/// Shape of the answer history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerConfig {
    pub page_count: usize,
    pub page_capacity: usize,
    pub auto_evict: bool,
}

impl AnswerConfig {
    const LIMITED_PAGE_CAPACITY: usize = 10_000;

    pub fn new(page_count: usize, page_capacity: usize) -> Self {
        Self {
            page_count,
            page_capacity,
            auto_evict: false,
        }
    }

    /// Sizes the store to hold at least `max_answers`.
    pub fn with_limit(auto_evict: bool, max_answers: usize) -> Self {
        Self::new(
            max_answers / Self::LIMITED_PAGE_CAPACITY + 1,
            Self::LIMITED_PAGE_CAPACITY,
        )
        .with_auto_evict(auto_evict)
    }

    /// Switching eviction on adds a spare page, so a full page of history
    /// survives each eviction; switching it off takes the spare away again.
    pub fn with_auto_evict(mut self, auto_evict: bool) -> Self {
        match (self.auto_evict, auto_evict) {
            (false, true) => self.page_count = self.page_count.saturating_add(1),
            (true, false) => self.page_count = self.page_count.saturating_sub(1),
            _ => {}
        }
        self.auto_evict = auto_evict;
        self
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self::new(1024, 8192)
    }
}

/// Session-wide settings, handed to every evaluation explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    pub angle_mode: AngleMode,
    /// Slots in each of the evaluator's value and operator stacks.
    pub stack_capacity: usize,
    /// Whether successful results are appended to the answer history.
    pub store_answers: bool,
    pub answers: AnswerConfig,
}

impl CalcConfig {
    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }

    pub fn with_store_answers(mut self, store_answers: bool) -> Self {
        self.store_answers = store_answers;
        self
    }

    pub fn with_answers(mut self, answers: AnswerConfig) -> Self {
        self.answers = answers;
        self
    }
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            stack_capacity: 1024,
            store_answers: true,
            answers: AnswerConfig::default(),
        }
    }
}
