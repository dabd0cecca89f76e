// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic state machine trait used to model record lifecycles. Transitions
//! are pure: they decide the next state and an output describing the
//! effect, and the caller persists the effect.
//!
//! # Mealy Machine
//!
//! Output depends on both current state and input:
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mpls_inventory::state_machine::lag_membership::{Membership, MembershipCommand};
//! use mpls_inventory::state_machine::StateMachine;
//! use uuid::Uuid;
//!
//! let lag = Uuid::now_v7();
//! let (state, _) = Membership::Unbound
//!     .transition(&MembershipCommand::Attach(lag))
//!     .unwrap();
//! assert_eq!(state, Membership::Member(lag));
//! assert!(Membership::Unbound.transition(&MembershipCommand::Detach).is_err());
//! ```

pub mod lag_membership;

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state to target state is not allowed
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Precondition not met for transition
    #[error("{0}")]
    PreconditionFailed(String),
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}
