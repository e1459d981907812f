#![forbid(unsafe_code)]

use crate::phase::Phase;

/// Approval flags asserted by the caller. The gate is recomputed from these on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApprovalFlags {
    pub design_approved: bool,
    pub plan_approved: bool,
    pub beads_approved: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalState {
    pub phase: Phase,
    pub allowed: bool,
    pub required_signal: Option<&'static str>,
    pub reason: String,
}

/// The signal a user must give before `phase` may run, if the phase is gated.
pub fn required_signal(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Plan => Some("design approved"),
        Phase::Beads => Some("plan approved"),
        Phase::Execute => Some("beads approved"),
        _ => None,
    }
}

fn flag_for(phase: Phase, flags: ApprovalFlags) -> Option<bool> {
    match phase {
        Phase::Plan => Some(flags.design_approved),
        Phase::Beads => Some(flags.plan_approved),
        Phase::Execute => Some(flags.beads_approved),
        _ => None,
    }
}

pub fn approval_gate(phase: Phase, flags: ApprovalFlags) -> ApprovalState {
    let title = phase.title();
    let (Some(signal), Some(approved)) = (required_signal(phase), flag_for(phase, flags)) else {
        return ApprovalState {
            phase,
            allowed: true,
            required_signal: None,
            reason: format!("{title} phase has no approval gate."),
        };
    };

    if approved {
        ApprovalState {
            phase,
            allowed: true,
            required_signal: None,
            reason: format!("{title} phase unlocked: the user said '{signal}'."),
        }
    } else {
        ApprovalState {
            phase,
            allowed: false,
            required_signal: Some(signal),
            reason: format!("{title} phase is blocked until the user says '{signal}'."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_phases_require_their_own_flag() {
        let cases = [
            (Phase::Plan, "design approved"),
            (Phase::Beads, "plan approved"),
            (Phase::Execute, "beads approved"),
        ];
        for (phase, signal) in cases {
            let blocked = approval_gate(phase, ApprovalFlags::default());
            assert!(!blocked.allowed, "{phase:?} must be blocked without flags");
            assert_eq!(blocked.required_signal, Some(signal));
            assert!(blocked.reason.contains(signal));
        }

        let plan = approval_gate(
            Phase::Plan,
            ApprovalFlags {
                design_approved: true,
                ..ApprovalFlags::default()
            },
        );
        assert!(plan.allowed);
        assert_eq!(plan.required_signal, None);

        let beads = approval_gate(
            Phase::Beads,
            ApprovalFlags {
                plan_approved: true,
                ..ApprovalFlags::default()
            },
        );
        assert!(beads.allowed);

        let execute = approval_gate(
            Phase::Execute,
            ApprovalFlags {
                beads_approved: true,
                ..ApprovalFlags::default()
            },
        );
        assert!(execute.allowed);
    }

    #[test]
    fn flags_for_other_phases_do_not_unlock() {
        let state = approval_gate(
            Phase::Execute,
            ApprovalFlags {
                design_approved: true,
                plan_approved: true,
                beads_approved: false,
            },
        );
        assert!(!state.allowed);
        assert_eq!(state.required_signal, Some("beads approved"));
    }

    #[test]
    fn ungated_phases_are_always_allowed() {
        for phase in [
            Phase::Diagnose,
            Phase::Brainstorm,
            Phase::Review,
            Phase::Compound,
        ] {
            let state = approval_gate(phase, ApprovalFlags::default());
            assert!(state.allowed);
            assert_eq!(state.required_signal, None);
            assert_eq!(state.phase, phase);
        }
    }
}
