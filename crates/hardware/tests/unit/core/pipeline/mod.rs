/// Whole-quantum behaviour: timing, drain, blocking and final state.
pub mod engine;
