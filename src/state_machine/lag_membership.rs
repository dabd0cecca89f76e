// Copyright (c) 2025 - Cowboy AI, Inc.
//! LAG Membership State Machine
//!
//! Tracks whether a physical interface is bound into a LAG.
//!
//! # States
//!
//! - Unbound: standalone interface with its own addressing
//! - Member(lag): bound into `lag`
//!
//! # Inputs
//!
//! - Attach(lag): Unbound → Member(lag); Member(lag) → Member(lag)
//! - Detach: Member(_) → Unbound
//!
//! Attaching to a different LAG while bound is rejected: the interface has
//! to be detached first. Detach only clears the reference; addressing
//! cleared by the attach is not restored.

use uuid::Uuid;

use super::{StateMachine, TransitionError, TransitionResult};
use crate::domain::{InterfaceKind, InterfaceMode, InterfaceSingle};

/// Membership state of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Unbound,
    Member(Uuid),
}

/// Membership command (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipCommand {
    Attach(Uuid),
    Detach,
}

/// Effect the caller must persist on the interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipEffect {
    /// Point at the LAG and reset addressing to the bound defaults
    Bind(Uuid),
    /// Clear the LAG reference only
    Unbind,
}

impl Membership {
    /// Current membership of an interface record
    pub fn of(interface: &InterfaceSingle) -> Self {
        match interface.lag {
            Some(lag) => Membership::Member(lag),
            None => Membership::Unbound,
        }
    }
}

impl StateMachine for Membership {
    type Input = MembershipCommand;
    type Output = MembershipEffect;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        match (self, input) {
            (Membership::Unbound, MembershipCommand::Attach(lag)) => {
                Ok((Membership::Member(*lag), MembershipEffect::Bind(*lag)))
            }
            (Membership::Member(current), MembershipCommand::Attach(lag)) if current == lag => {
                Ok((Membership::Member(*lag), MembershipEffect::Bind(*lag)))
            }
            (Membership::Member(current), MembershipCommand::Attach(lag)) => {
                Err(TransitionError::PreconditionFailed(format!(
                    "Interface already belongs to lag {current}, detach it before attaching to {lag}"
                )))
            }
            (Membership::Member(_), MembershipCommand::Detach) => {
                Ok((Membership::Unbound, MembershipEffect::Unbind))
            }
            (Membership::Unbound, MembershipCommand::Detach) => Err(
                TransitionError::PreconditionFailed("Interface has no lag".to_string()),
            ),
        }
    }
}

/// Apply a membership effect to an interface record
pub fn apply_effect(interface: &mut InterfaceSingle, effect: MembershipEffect) {
    match effect {
        MembershipEffect::Bind(lag) => {
            interface.lag = Some(lag);
            interface.kind = InterfaceKind::Lag;
            interface.mode = InterfaceMode::Unknown;
            interface.ipaddr = None;
            interface.vrf = None;
            interface.vlan.clear();
        }
        MembershipEffect::Unbind => {
            interface.lag = None;
        }
    }
}
