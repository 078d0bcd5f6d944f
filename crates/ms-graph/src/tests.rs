//! Unit tests for ms-graph.

use std::sync::atomic::{AtomicUsize, Ordering};

use ms_core::{AgentId, SchedulerError, SchedulerPort, SchedulerResult, SimEvent, StateId, Tick};

use crate::{AgentView, EffectError, GraphBuilder, GraphError, TransitionGraph, TransitionSpec};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Flags {
    arrived: bool,
}

/// Traveling → ChoosingMode (contingent on `arrived`) → InActivity (terminal).
fn trip_graph() -> TransitionGraph<Flags> {
    let mut b = GraphBuilder::new();
    let traveling = b.add_state("Traveling").unwrap();
    let choosing = b.add_state("ChoosingMode").unwrap();
    let active = b.add_terminal_state("InActivity").unwrap();
    b.add_transition(
        traveling,
        choosing,
        TransitionSpec::when(|v: &AgentView<'_, Flags>| v.ctx.arrived),
    )
    .unwrap();
    b.add_transition(choosing, active, TransitionSpec::always()).unwrap();
    b.validate().unwrap()
}

struct Port {
    now:    Tick,
    events: Vec<(Tick, SimEvent<Flags>)>,
}

impl SchedulerPort<Flags> for Port {
    fn now(&self) -> Tick {
        self.now
    }

    fn schedule_event(&mut self, at: Tick, event: SimEvent<Flags>) -> SchedulerResult<()> {
        if at < self.now {
            return Err(SchedulerError::InPast { at, now: self.now });
        }
        self.events.push((at, event));
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn duplicate_state_rejected() {
        let mut b = GraphBuilder::<()>::new();
        b.add_state("Traveling").unwrap();
        let err = b.add_state("Traveling").unwrap_err();
        assert!(matches!(err, GraphError::DuplicateState(ref n) if n == "Traveling"));
        // Terminal and regular states share one namespace.
        assert!(b.add_terminal_state("Traveling").is_err());
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let mut b = GraphBuilder::<()>::new();
        let a = b.add_state("A").unwrap();
        let err = b.add_transition(a, StateId(5), TransitionSpec::always()).unwrap_err();
        assert!(matches!(err, GraphError::UnknownState(StateId(5))));
        let err = b.add_transition(StateId(9), a, TransitionSpec::always()).unwrap_err();
        assert!(matches!(err, GraphError::UnknownState(StateId(9))));
    }

    #[test]
    fn terminal_state_cannot_have_outgoing() {
        let mut b = GraphBuilder::<()>::new();
        let a = b.add_state("A").unwrap();
        let done = b.add_terminal_state("Done").unwrap();
        let err = b.add_transition(done, a, TransitionSpec::always()).unwrap_err();
        assert!(matches!(err, GraphError::TerminalSource(_)));
    }

    #[test]
    fn default_label_uses_state_names() {
        let g = trip_graph();
        let labels: Vec<_> = g.transitions().map(|t| t.label().to_owned()).collect();
        assert_eq!(labels, ["Traveling->ChoosingMode", "ChoosingMode->InActivity"]);
    }

    #[test]
    fn explicit_label_and_weight() {
        let mut b = GraphBuilder::<()>::new();
        let a = b.add_state("A").unwrap();
        b.add_transition(a, a, TransitionSpec::always().named("wait").with_weight(2.5))
            .unwrap();
        let g = b.validate().unwrap();
        let t = g.transitions().next().unwrap();
        assert_eq!(t.label(), "wait");
        assert_eq!(t.weight(), 2.5);
        assert!(t.is_self_loop());
    }

    #[test]
    fn set_initial_checks_membership() {
        let mut b = GraphBuilder::<()>::new();
        let a = b.add_state("A").unwrap();
        let z = b.add_state("Z").unwrap();
        b.add_transition(a, z, TransitionSpec::always()).unwrap();
        b.add_transition(z, a, TransitionSpec::always()).unwrap();
        assert!(b.set_initial(StateId(7)).is_err());
        b.set_initial(z).unwrap();
        assert_eq!(b.state_id("Z"), Some(z));
        assert_eq!(b.validate().unwrap().initial_state(), z);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validate_tests {
    use super::*;

    #[test]
    fn empty_graph_rejected() {
        assert!(matches!(GraphBuilder::<()>::new().validate(), Err(GraphError::Empty)));
    }

    #[test]
    fn non_terminal_without_outgoing_rejected() {
        let mut b = GraphBuilder::<()>::new();
        let a = b.add_state("A").unwrap();
        let stuck = b.add_state("Stuck").unwrap();
        b.add_transition(a, stuck, TransitionSpec::always()).unwrap();
        let err = b.validate().unwrap_err();
        assert!(matches!(err, GraphError::UnreachableState(ref n) if n == "Stuck"));
    }

    #[test]
    fn marked_terminal_without_outgoing_accepted() {
        let g = trip_graph();
        let active = g.state_id("InActivity").unwrap();
        assert!(g.is_terminal(active));
        assert!(g.state(active).unwrap().is_marked_terminal());
        assert!(!g.is_terminal(g.initial_state()));
    }

    #[test]
    fn initial_defaults_to_first_state() {
        let g = trip_graph();
        assert_eq!(g.state_name(g.initial_state()), "Traveling");
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traversal_tests {
    use super::*;

    #[test]
    fn outgoing_in_registration_order() {
        let mut b = GraphBuilder::<()>::new();
        let hub = b.add_state("Hub").unwrap();
        let x = b.add_terminal_state("X").unwrap();
        let y = b.add_terminal_state("Y").unwrap();
        b.add_transition(hub, y, TransitionSpec::always()).unwrap();
        b.add_transition(hub, x, TransitionSpec::always()).unwrap();
        b.add_transition(hub, hub, TransitionSpec::always()).unwrap();
        let g = b.validate().unwrap();

        let targets: Vec<_> = g.outgoing_transitions(hub).unwrap().map(|t| t.to()).collect();
        assert_eq!(targets, [y, x, hub]);
        assert!(g.outgoing_transitions(hub).unwrap().all(|t| t.from() == hub));
    }

    #[test]
    fn outgoing_of_foreign_state_errors() {
        let g = trip_graph();
        assert!(g.outgoing_transitions(StateId(42)).is_err());
        assert_eq!(g.state_name(StateId(42)), "?");
        assert!(!g.contains(StateId(42)));
    }

    #[test]
    fn counts_and_lookup() {
        let g = trip_graph();
        assert_eq!(g.state_count(), 3);
        assert_eq!(g.transition_count(), 2);
        assert_eq!(g.states().map(|s| s.name()).collect::<Vec<_>>(), ["Traveling", "ChoosingMode", "InActivity"]);
        assert!(g.state_id("Nowhere").is_none());
    }

    #[test]
    fn graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransitionGraph<Flags>>();
    }
}

// ── Eligibility & effects ─────────────────────────────────────────────────────

#[cfg(test)]
mod transition_tests {
    use super::*;

    #[test]
    fn contingent_flag_follows_eligibility_variant() {
        let g = trip_graph();
        let flags: Vec<_> = g.transitions().map(|t| t.is_contingent()).collect();
        assert_eq!(flags, [true, false]);
    }

    #[test]
    fn eligibility_is_pure() {
        let g = trip_graph();
        let arrive = g.transitions().next().unwrap();
        let ctx = Flags { arrived: false };
        let view = AgentView::new(AgentId(0), arrive.from(), Tick(0), &ctx);

        let first = arrive.is_available_to(&view);
        let second = arrive.is_available_to(&view);
        assert_eq!(first, second);
        assert!(!first);
        assert_eq!(view.state, arrive.from(), "view untouched");

        let ctx = Flags { arrived: true };
        let view = AgentView::new(AgentId(0), arrive.from(), Tick(0), &ctx);
        assert!(arrive.is_available_to(&view));
    }

    #[test]
    fn perform_moves_state_and_runs_effect() {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let seen = std::sync::Arc::clone(&calls);

        let mut b = GraphBuilder::<Flags>::new();
        let a = b.add_state("A").unwrap();
        let z = b.add_terminal_state("Z").unwrap();
        b.add_transition(
            a,
            z,
            TransitionSpec::always().with_effect(
                move |v: &AgentView<'_, Flags>, s: &mut dyn SchedulerPort<Flags>| {
                    seen.fetch_add(1, Ordering::SeqCst);
                    s.schedule_wake(v.tick + 2, v.agent)?;
                    Ok(())
                },
            ),
        )
        .unwrap();
        let g = b.validate().unwrap();

        let ctx = Flags::default();
        let mut port = Port { now: Tick(4), events: vec![] };
        let mut current = a;
        let view = AgentView::new(AgentId(3), current, Tick(4), &ctx);
        let t = g.transitions().next().unwrap();
        t.perform(&mut current, &view, &mut port).unwrap();

        assert_eq!(current, z);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(port.events[..], [(Tick(6), SimEvent::Wake(AgentId(3)))]));
    }

    #[test]
    fn failed_effect_leaves_state_unchanged() {
        let mut b = GraphBuilder::<Flags>::new();
        let a = b.add_state("A").unwrap();
        let z = b.add_terminal_state("Z").unwrap();
        b.add_transition(
            a,
            z,
            TransitionSpec::always().with_effect(
                |v: &AgentView<'_, Flags>, s: &mut dyn SchedulerPort<Flags>| {
                    // Scheduling in the past is always rejected.
                    s.schedule_wake(Tick(0), v.agent).map_err(EffectError::from)
                },
            ),
        )
        .unwrap();
        let g = b.validate().unwrap();

        let ctx = Flags::default();
        let mut port = Port { now: Tick(10), events: vec![] };
        let mut current = a;
        let view = AgentView::new(AgentId(0), current, Tick(10), &ctx);
        let err = g.transitions().next().unwrap().perform(&mut current, &view, &mut port).unwrap_err();

        assert!(matches!(
            err,
            GraphError::Effect { source: EffectError::Scheduler(SchedulerError::InPast { .. }), .. }
        ));
        assert_eq!(current, a);
    }

    #[test]
    fn perform_from_wrong_state_rejected() {
        let g = trip_graph();
        let ctx = Flags { arrived: true };
        let mut port = Port { now: Tick(0), events: vec![] };
        let active = g.state_id("InActivity").unwrap();
        let mut current = active;
        let view = AgentView::new(AgentId(0), current, Tick(0), &ctx);
        let t = g.transitions().next().unwrap();
        assert!(matches!(
            t.perform(&mut current, &view, &mut port),
            Err(GraphError::NotApplicable { .. })
        ));
        assert_eq!(current, active);
    }
}
