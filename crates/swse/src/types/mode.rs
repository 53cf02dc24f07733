use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use swse_semantics::{ModeId, mode_from_code, mode_from_name};

/// How a sourced value combines with the value accumulated so far.
///
/// The host's CUSTOM mode (code 0) has no behavior of its own and is read as
/// [`ApplicationMode::Add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ModeRepr", into = "u8")]
pub enum ApplicationMode {
    #[default]
    Add,
    Downgrade,
    Upgrade,
    Multiply,
    Override,
    PostMultiply,
}

/// The order in which modes are applied within one priority bucket.
pub const RESOLUTION_ORDER: [ApplicationMode; 6] = [
    ApplicationMode::Add,
    ApplicationMode::Downgrade,
    ApplicationMode::Upgrade,
    ApplicationMode::Multiply,
    ApplicationMode::Override,
    ApplicationMode::PostMultiply,
];

impl ApplicationMode {
    /// Look up a mode by its host code.
    pub fn from_code(code: i64) -> Option<Self> {
        mode_from_code(code).map(Self::from)
    }

    /// Look up a mode by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        mode_from_name(name).map(Self::from)
    }

    /// The host's numeric code.
    pub fn code(self) -> u8 {
        self.id().code()
    }

    /// The canonical upper-case name.
    pub fn name(self) -> &'static str {
        self.id().name()
    }

    /// Position of this mode in [`RESOLUTION_ORDER`].
    pub fn rank(self) -> usize {
        match self {
            ApplicationMode::Add => 0,
            ApplicationMode::Downgrade => 1,
            ApplicationMode::Upgrade => 2,
            ApplicationMode::Multiply => 3,
            ApplicationMode::Override => 4,
            ApplicationMode::PostMultiply => 5,
        }
    }

    fn id(self) -> ModeId {
        match self {
            ApplicationMode::Add => ModeId::Add,
            ApplicationMode::Downgrade => ModeId::Downgrade,
            ApplicationMode::Upgrade => ModeId::Upgrade,
            ApplicationMode::Multiply => ModeId::Multiply,
            ApplicationMode::Override => ModeId::Override,
            ApplicationMode::PostMultiply => ModeId::PostMultiply,
        }
    }
}

impl From<ModeId> for ApplicationMode {
    fn from(id: ModeId) -> Self {
        match id {
            ModeId::Custom | ModeId::Add => ApplicationMode::Add,
            ModeId::Multiply => ApplicationMode::Multiply,
            ModeId::Downgrade => ApplicationMode::Downgrade,
            ModeId::Upgrade => ApplicationMode::Upgrade,
            ModeId::Override => ApplicationMode::Override,
            ModeId::PostMultiply => ApplicationMode::PostMultiply,
        }
    }
}

impl From<ApplicationMode> for u8 {
    fn from(mode: ApplicationMode) -> Self {
        mode.code()
    }
}

impl Display for ApplicationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<ModeRepr> for ApplicationMode {
    type Error = String;

    fn try_from(repr: ModeRepr) -> Result<Self, Self::Error> {
        match repr {
            ModeRepr::Code(code) => {
                Self::from_code(code).ok_or_else(|| format!("unknown application mode code {code}"))
            }
            ModeRepr::Name(name) => Self::from_name(&name)
                .or_else(|| name.trim().parse().ok().and_then(Self::from_code))
                .ok_or_else(|| format!("unknown application mode '{name}'")),
        }
    }
}
