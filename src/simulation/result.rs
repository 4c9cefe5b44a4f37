//! Recorded trajectories.

use crate::world::WorldState;

use super::Action;

/// Marker placed in a trace right before the first action taken with the
/// button pressed.
pub const PRESS_MARKER: char = '#';

/// One worldline: every action taken and every state visited.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult<A> {
    actions_taken: Vec<A>,
    world_states: Vec<WorldState>,
    button_pressed_step: Option<u32>,
}

impl<A> SimulationResult<A> {
    /// Records a trajectory.
    ///
    /// `world_states` includes the starting state, so it holds one more entry
    /// than `actions_taken`. `button_pressed_step` is the step whose action
    /// first produced a pressed state, or `None` if the press never happened.
    #[must_use]
    pub fn new(
        actions_taken: Vec<A>,
        world_states: Vec<WorldState>,
        button_pressed_step: Option<u32>,
    ) -> Self {
        Self {
            actions_taken,
            world_states,
            button_pressed_step,
        }
    }

    /// Actions in the order they were taken.
    pub fn actions_taken(&self) -> &[A] {
        &self.actions_taken
    }

    /// Visited states, starting state included.
    pub fn world_states(&self) -> &[WorldState] {
        &self.world_states
    }

    /// Step at which the button was first pressed; `None` means never.
    pub const fn button_pressed_step(&self) -> Option<u32> {
        self.button_pressed_step
    }

    /// Step of the first recorded state.
    pub fn starting_step(&self) -> u32 {
        self.world_states.first().map_or(1, WorldState::step)
    }

    /// The last state of the worldline.
    pub fn final_world(&self) -> Option<&WorldState> {
        self.world_states.last()
    }
}

impl<A: Action> SimulationResult<A> {
    /// One character per action, with `#` inserted after the action during
    /// whose step the button got pressed.
    #[must_use]
    pub fn trace(&self) -> String {
        let mut trace = String::with_capacity(self.actions_taken.len() + 1);
        let marker_at = self
            .button_pressed_step
            .map(|step| (step + 1).saturating_sub(self.starting_step()) as usize);

        for (i, action) in self.actions_taken.iter().enumerate() {
            if marker_at == Some(i) {
                trace.push(PRESS_MARKER);
            }
            trace.push(action.code());
        }
        if marker_at.is_some_and(|at| at >= self.actions_taken.len()) {
            trace.push(PRESS_MARKER);
        }
        trace
    }
}
