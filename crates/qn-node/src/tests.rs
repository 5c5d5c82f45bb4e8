//! Unit tests for qn-node.

use std::sync::Arc;

use qn_core::{Constant, NodeId, SimRng, SimTime, Task, TaskId};

use crate::Source;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn task(id: u64, arrival: f64, service: f64, server: u32) -> Task {
    Task::new(TaskId(id), SimTime(arrival), service, NodeId(server))
}

fn constant_source(inter_arrival: f64, service: f64, cap: Option<u64>) -> Source {
    Source::new(
        NodeId(1),
        Arc::new(Constant::new(inter_arrival).unwrap()),
        Arc::new(Constant::new(service).unwrap()),
        SimRng::new(1),
        SimRng::new(2),
        cap,
    )
}

#[cfg(test)]
mod server {
    use qn_core::{NodeId, SimTime, TaskId};

    use super::task;
    use crate::{Node, NodeError, NodeKind, Server};

    #[test]
    fn idle_server_starts_task_immediately() {
        let mut s = Server::new(NodeId(0));
        assert!(!s.is_busy());
        let finish = s.accept(task(0, 1.0, 2.5, 0), SimTime(1.0));
        assert_eq!(finish, Some(SimTime(3.5)));
        assert!(s.is_busy());
        assert_eq!(s.queue_len(), 0);
        assert_eq!(s.tasks_left(), 1);
    }

    #[test]
    fn busy_server_queues_without_starting() {
        let mut s = Server::new(NodeId(0));
        s.accept(task(0, 0.0, 2.0, 0), SimTime(0.0));
        assert_eq!(s.accept(task(1, 0.5, 3.0, 0), SimTime(0.5)), None);
        assert_eq!(s.queue_len(), 1);
        assert_eq!(s.tasks_left(), 2);
    }

    #[test]
    fn work_left_counts_remaining_and_queued() {
        let mut s = Server::new(NodeId(0));
        s.accept(task(0, 0.0, 2.0, 0), SimTime(0.0));
        s.accept(task(1, 0.0, 3.0, 0), SimTime(0.0));
        s.accept(task(2, 0.0, 0.5, 0), SimTime(0.0));
        // 1.5 left on the task in service plus 3.0 + 0.5 queued.
        assert!((s.work_left(SimTime(0.5)) - 5.0).abs() < 1e-12);
        let load = s.load(SimTime(0.5));
        assert_eq!(load.id, NodeId(0));
        assert_eq!(load.tasks_left, 3);
    }

    #[test]
    fn idle_server_has_no_work() {
        let s = Server::new(NodeId(3));
        assert_eq!(s.work_left(SimTime(10.0)), 0.0);
        assert_eq!(s.tasks_left(), 0);
        assert_eq!(s.kind(), NodeKind::Server);
        assert_eq!(s.id(), NodeId(3));
    }

    #[test]
    fn completes_in_fifo_order() {
        let mut s = Server::new(NodeId(0));
        let mut now = SimTime(0.0);
        let mut next = None;
        for id in 0..4 {
            let f = s.accept(task(id, 0.0, 1.0 + id as f64, 0), now);
            next = next.or(f);
        }
        let mut order = Vec::new();
        while let Some(finish) = next {
            now = finish;
            let (done, started) = s.complete(now).unwrap();
            order.push(done.id);
            next = started;
        }
        assert_eq!(order, (0..4).map(TaskId).collect::<Vec<_>>());
        // 1 + 2 + 3 + 4
        assert_eq!(now, SimTime(10.0));
        assert_eq!(s.completed(), 4);
        assert!(!s.is_busy());
    }

    #[test]
    fn busy_iff_work_present() {
        let mut s = Server::new(NodeId(0));
        let mut now = SimTime(0.0);
        let mut next = s.accept(task(0, 0.0, 1.0, 0), now);
        s.accept(task(1, 0.0, 1.0, 0), now);
        loop {
            assert_eq!(s.is_busy(), s.tasks_left() > 0);
            assert_eq!(s.is_busy(), s.current_task().is_some());
            let Some(finish) = next else { break };
            now = finish;
            next = s.complete(now).unwrap().1;
        }
        assert_eq!(s.tasks_left(), 0);
    }

    #[test]
    fn completing_idle_server_is_an_error() {
        let mut s = Server::new(NodeId(2));
        assert!(matches!(s.complete(SimTime(0.0)), Err(NodeError::NotInService(NodeId(2)))));
    }
}

#[cfg(test)]
mod source {
    use qn_core::{SimTime, TaskId};
    use qn_event::{Event, EventQueue};

    use super::constant_source;
    use crate::NodeError;

    #[test]
    fn schedules_after_inter_arrival_wait() {
        let mut src = constant_source(2.0, 1.0, None);
        let mut events = EventQueue::new();
        assert!(src.schedule_next(&mut events, SimTime(0.0)).unwrap());
        assert!(src.has_pending_arrival());
        assert_eq!(events.pop(), Some((SimTime(2.0), Event::Arrival)));
    }

    #[test]
    fn generate_stamps_clock_and_numbers_tasks() {
        let mut src = constant_source(2.0, 1.5, None);
        let a = src.generate(SimTime(2.0)).unwrap();
        let b = src.generate(SimTime(4.0)).unwrap();
        assert_eq!((a.id, a.arrival_time, a.service_time), (TaskId(0), SimTime(2.0), 1.5));
        assert_eq!(b.id, TaskId(1));
        assert_eq!(src.generated(), 2);
        let t = b.route_to(qn_core::NodeId(0));
        assert_eq!(t.assigned_node_id, qn_core::NodeId(0));
    }

    #[test]
    fn stops_at_generation_cap() {
        let mut src = constant_source(0.0, 1.0, Some(2));
        let mut events = EventQueue::new();
        let mut now = SimTime(0.0);
        let mut arrivals = 0;
        while src.schedule_next(&mut events, now).unwrap() {
            let (t, _) = events.pop().unwrap();
            now = t;
            src.generate(now).unwrap();
            arrivals += 1;
        }
        assert_eq!(arrivals, 2);
        assert!(events.is_empty());
        assert!(!src.has_pending_arrival());
    }

    #[test]
    fn cancel_removes_pending_arrival() {
        let mut src = constant_source(1.0, 1.0, None);
        let mut events = EventQueue::new();
        src.schedule_next(&mut events, SimTime(0.0)).unwrap();
        assert!(src.cancel(&mut events));
        assert!(events.is_empty());
        assert!(!src.cancel(&mut events));
    }

    #[test]
    fn negative_durations_are_rejected() {
        let mut events = EventQueue::new();
        let mut bad_wait = constant_source(-1.0, 1.0, None);
        assert!(matches!(
            bad_wait.schedule_next(&mut events, SimTime(0.0)),
            Err(NodeError::Core(_))
        ));
        let mut bad_service = constant_source(1.0, -0.5, None);
        assert!(matches!(bad_service.generate(SimTime(0.0)), Err(NodeError::Core(_))));
    }
}

#[cfg(test)]
mod sink {
    use qn_agent::{AgentError, AgentResult, OnlineLearning};
    use qn_core::{Experience, NodeId, SimTime};

    use super::task;
    use crate::{NodeError, Sink};

    #[derive(Default)]
    struct Recorder(Vec<Experience>);

    impl OnlineLearning for Recorder {
        fn ingest(&mut self, experience: Experience) -> AgentResult<()> {
            if experience.node_id.index() > 1 {
                return Err(AgentError::UnknownNode(experience.node_id));
            }
            self.0.push(experience);
            Ok(())
        }
    }

    #[test]
    fn records_response_times() {
        let mut sink = Sink::new(NodeId(3), 10);
        sink.on_complete(&task(0, 1.0, 1.0, 0), SimTime(2.0), None).unwrap();
        sink.on_complete(&task(1, 1.0, 1.0, 0), SimTime(4.0), None).unwrap();
        assert_eq!(sink.response_times(), &[1.0, 3.0]);
        let r = sink.result();
        assert_eq!(r.et, 2.0);
        assert_eq!(r.std_t, 1.0);
        assert_eq!(r.num_tasks, 2);
    }

    #[test]
    fn signals_target_exactly_once() {
        let mut sink = Sink::new(NodeId(3), 2);
        let t = task(0, 0.0, 1.0, 0);
        assert!(!sink.on_complete(&t, SimTime(1.0), None).unwrap());
        assert!(sink.on_complete(&t, SimTime(2.0), None).unwrap());
        assert!(!sink.on_complete(&t, SimTime(3.0), None).unwrap());
        assert_eq!(sink.received(), 3);
        assert!(sink.is_done());
    }

    #[test]
    fn feeds_experience_to_learner() {
        let mut sink = Sink::new(NodeId(3), 5);
        let mut rec = Recorder::default();
        sink.on_complete(&task(0, 1.0, 0.5, 1), SimTime(2.5), Some(&mut rec)).unwrap();
        assert_eq!(
            rec.0,
            vec![Experience { node_id: NodeId(1), observed_value: 1.5, time_epoch: SimTime(2.5) }]
        );
    }

    #[test]
    fn learner_errors_propagate() {
        let mut sink = Sink::new(NodeId(3), 5);
        let mut rec = Recorder::default();
        let err = sink.on_complete(&task(0, 0.0, 1.0, 7), SimTime(1.0), Some(&mut rec));
        assert!(matches!(err, Err(NodeError::Agent(AgentError::UnknownNode(NodeId(7))))));
    }
}

#[cfg(test)]
mod properties {
    use qn_core::{NodeId, SimTime};

    use super::task;
    use crate::{Server, Sink};

    #[test]
    fn response_time_never_below_service_time() {
        let mut server = Server::new(NodeId(0));
        let mut sink = Sink::new(NodeId(2), 6);
        let arrivals = [0.0, 0.1, 0.2, 5.0, 5.0, 9.0];
        let services = [1.0, 2.0, 0.5, 0.0, 3.0, 1.0];

        // Simple two-event merge: next arrival vs next completion.
        let mut next_finish: Option<SimTime> = None;
        let mut i = 0;
        let mut done = Vec::new();
        while i < arrivals.len() || next_finish.is_some() {
            let arrival_due = i < arrivals.len()
                && next_finish.is_none_or(|f| SimTime(arrivals[i]) < f);
            if arrival_due {
                let now = SimTime(arrivals[i]);
                if let Some(f) = server.accept(task(i as u64, arrivals[i], services[i], 0), now) {
                    next_finish = Some(f);
                }
                i += 1;
            } else if let Some(now) = next_finish {
                let (t, started) = server.complete(now).unwrap();
                sink.on_complete(&t, now, None).unwrap();
                done.push(t);
                next_finish = started;
            }
        }

        assert_eq!(done.len(), arrivals.len());
        for (t, rt) in done.iter().zip(sink.response_times()) {
            assert!(*rt >= 0.0);
            assert!(*rt >= t.service_time - 1e-12, "task {} rt {rt} < {}", t.id, t.service_time);
        }
    }
}
