use std::fmt;

/// Where a user is in a guided dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    Idle,
    AwaitingFirstName,
    AwaitingLastName,
    AwaitingSubjectName,
    AwaitingPoints,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Idle => "idle",
            Step::AwaitingFirstName => "awaiting_first_name",
            Step::AwaitingLastName => "awaiting_last_name",
            Step::AwaitingSubjectName => "awaiting_subject_name",
            Step::AwaitingPoints => "awaiting_points",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Step::Idle)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial input collected while a flow is in progress.
///
/// Both flows share this shape; a flow only fills its own field. The last
/// answer of a flow (surname, points) is persisted directly and never lands here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataBag {
    pub first_name: Option<String>,
    pub subject_name: Option<String>,
}

/// Per-user dialog state. Only non-idle conversations are stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    pub step: Step,
    pub bag: DataBag,
}

impl Conversation {
    /// A fresh conversation at `step` with an empty bag.
    pub fn at(step: Step) -> Self {
        Self {
            step,
            bag: DataBag::default(),
        }
    }
}
