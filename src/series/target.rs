/// Built-in target functions selectable by name.
///
/// The estimator itself accepts any `Fn(f64) -> f64`; this set exists so runs can be configured
/// from the CLI and JSON.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TargetFunction {
    /// `t²`
    #[default]
    Square,
    /// `t`
    Ramp,
    /// `t³`
    Cube,
    /// `|t|`
    Abs,
    /// `eᵗ`
    Exp,
}

impl TargetFunction {
    /// Every built-in target, in declaration order.
    pub const ALL: [Self; 5] = [Self::Square, Self::Ramp, Self::Cube, Self::Abs, Self::Exp];

    /// Evaluate at `t`.
    pub fn eval(self, t: f64) -> f64 {
        match self {
            Self::Square => t * t,
            Self::Ramp => t,
            Self::Cube => t * t * t,
            Self::Abs => t.abs(),
            Self::Exp => t.exp(),
        }
    }

    /// Stable identifier used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Ramp => "ramp",
            Self::Cube => "cube",
            Self::Abs => "abs",
            Self::Exp => "exp",
        }
    }

    /// Human-readable formula, used as the plot title.
    pub fn formula(self) -> &'static str {
        match self {
            Self::Square => "f(t) = t²",
            Self::Ramp => "f(t) = t",
            Self::Cube => "f(t) = t³",
            Self::Abs => "f(t) = |t|",
            Self::Exp => "f(t) = eᵗ",
        }
    }

    /// Look up a target by [`TargetFunction::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl std::fmt::Display for TargetFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
