//! Plain data row types written by output backends.

/// One fired transition.  State and transition names are resolved against
/// the agent's graph at the time of the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRow {
    pub tick:       u64,
    pub agent_id:   u32,
    pub transition: String,
    pub from_state: String,
    pub to_state:   String,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    pub woken_agents:   u64,
    pub transitions:    u64,
}
