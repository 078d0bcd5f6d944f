//! Unit tests for ms-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StateId, TransitionId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(StateId(0) < StateId(1));
        assert!(TransitionId(100) > TransitionId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StateId::INVALID.0, u32::MAX);
        assert_eq!(StateId::default(), StateId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(StateId(7).to_string(), "StateId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.checked_add(3), Some(Tick(13)));
        assert_eq!(Tick(u64::MAX - 1).checked_add(1), Some(Tick(u64::MAX)));
        assert_eq!(Tick(u64::MAX).checked_add(1), None);
    }

    #[test]
    fn clock_unix_time() {
        let clock = SimClock::new(1_000, 60);
        assert_eq!(clock.unix_secs_at(Tick::ZERO), 1_000);
        assert_eq!(clock.unix_secs_at(Tick(1)), 1_060);
        assert_eq!(clock.unix_secs_at(Tick(10)), 1_600);
    }

    #[test]
    fn seconds_of_day_wraps() {
        let mut clock = SimClock::new(0, 3_600);
        for _ in 0..25 {
            clock.advance();
        }
        assert_eq!(clock.seconds_of_day(), 3_600);
        assert_eq!(clock.to_string(), "T25 (01:00)");
    }

    #[test]
    fn config_validation() {
        let cfg = SimConfig { total_ticks: 100, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(100));
        assert!(cfg.validate().is_ok());

        let bad = SimConfig { tick_duration_secs: 0, ..SimConfig::default() };
        assert!(bad.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, MsError, RandomSource, SharedRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.next_int(17).unwrap(), r2.next_int(17).unwrap());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: Vec<_> = (0..4).map(|_| r0.next_int(1 << 20).unwrap()).collect();
        let b: Vec<_> = (0..4).map(|_| r1.next_int(1 << 20).unwrap()).collect();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn next_int_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_int(5).unwrap() < 5);
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn zero_bound_is_invalid_argument() {
        let mut rng = SimRng::new(7);
        assert!(matches!(rng.next_int(0), Err(MsError::InvalidArgument(_))));
    }

    #[test]
    fn shared_rng_matches_sim_rng_sequence() {
        let shared = SharedRng::new(99);
        let mut plain = SimRng::new(99);
        let mut handle = &shared;
        for _ in 0..50 {
            assert_eq!(handle.next_int(1_000).unwrap(), plain.next_int(1_000).unwrap());
        }
    }
}

#[cfg(test)]
mod scheduler {
    use crate::{AgentId, SchedulerError, SchedulerPort, SchedulerResult, SimEvent, Tick};

    /// Minimal port that records what it was asked to schedule.
    struct Recorder {
        now:    Tick,
        events: Vec<(Tick, SimEvent<u32>)>,
    }

    impl SchedulerPort<u32> for Recorder {
        fn now(&self) -> Tick {
            self.now
        }

        fn schedule_event(&mut self, at: Tick, event: SimEvent<u32>) -> SchedulerResult<()> {
            if at < self.now {
                return Err(SchedulerError::InPast { at, now: self.now });
            }
            self.events.push((at, event));
            Ok(())
        }
    }

    #[test]
    fn schedule_wake_default_method() {
        let mut port = Recorder { now: Tick(3), events: vec![] };
        port.schedule_wake(Tick(5), AgentId(1)).unwrap();
        assert!(matches!(port.events[0], (Tick(5), SimEvent::Wake(AgentId(1)))));
    }

    #[test]
    fn callback_runs_against_context() {
        let mut port = Recorder { now: Tick(0), events: vec![] };
        port.schedule_event(Tick(2), SimEvent::callback(|t: Tick, ctx: &mut u32| *ctx += t.0 as u32))
            .unwrap();
        let mut ctx = 1u32;
        for (at, event) in port.events {
            if let SimEvent::Callback(f) = event {
                f(at, &mut ctx);
            }
        }
        assert_eq!(ctx, 3);
    }

    #[test]
    fn past_event_rejected_through_dyn() {
        let mut port = Recorder { now: Tick(10), events: vec![] };
        let dyn_port: &mut dyn SchedulerPort<u32> = &mut port;
        let err = dyn_port.schedule_wake(Tick(9), AgentId(0)).unwrap_err();
        assert_eq!(err, SchedulerError::InPast { at: Tick(9), now: Tick(10) });
        assert_eq!(format!("{:?}", SimEvent::<u32>::Wake(AgentId(2))), "Wake(AgentId(2))");
    }
}
