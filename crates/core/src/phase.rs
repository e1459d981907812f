#![forbid(unsafe_code)]

/// Workflow stages in pipeline order. Only `plan`, `beads` and `execute` are gated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Diagnose,
    Brainstorm,
    Plan,
    Beads,
    Execute,
    Review,
    Compound,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Diagnose,
        Phase::Brainstorm,
        Phase::Plan,
        Phase::Beads,
        Phase::Execute,
        Phase::Review,
        Phase::Compound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diagnose => "diagnose",
            Self::Brainstorm => "brainstorm",
            Self::Plan => "plan",
            Self::Beads => "beads",
            Self::Execute => "execute",
            Self::Review => "review",
            Self::Compound => "compound",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == value)
    }

    /// Human label used in gate messages ("Plan phase ...").
    pub fn title(self) -> &'static str {
        match self {
            Self::Diagnose => "Diagnose",
            Self::Brainstorm => "Brainstorm",
            Self::Plan => "Plan",
            Self::Beads => "Beads",
            Self::Execute => "Execute",
            Self::Review => "Review",
            Self::Compound => "Compound",
        }
    }
}

/// The eight tool identifiers exposed to function-calling clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolName {
    Phase(Phase),
    Docs,
}

impl ToolName {
    pub const DOCS: &'static str = "workflow_docs";

    pub fn all() -> Vec<ToolName> {
        let mut out = Phase::ALL
            .into_iter()
            .map(ToolName::Phase)
            .collect::<Vec<_>>();
        out.push(ToolName::Docs);
        out
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == Self::DOCS {
            return Some(Self::Docs);
        }
        let phase = value.strip_prefix("workflow_")?;
        Phase::from_str(phase).map(Self::Phase)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docs => Self::DOCS,
            Self::Phase(Phase::Diagnose) => "workflow_diagnose",
            Self::Phase(Phase::Brainstorm) => "workflow_brainstorm",
            Self::Phase(Phase::Plan) => "workflow_plan",
            Self::Phase(Phase::Beads) => "workflow_beads",
            Self::Phase(Phase::Execute) => "workflow_execute",
            Self::Phase(Phase::Review) => "workflow_review",
            Self::Phase(Phase::Compound) => "workflow_compound",
        }
    }
}
