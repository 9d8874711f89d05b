pub mod demand_simulator;
pub mod hold_reaper;
