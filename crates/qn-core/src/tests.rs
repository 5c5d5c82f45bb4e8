//! Unit tests for qn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(NodeId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(TaskId(100) > TaskId(99));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(2.0);
        assert_eq!(t + 1.5, SimTime(3.5));
        assert_eq!(t.offset(0.5), SimTime(2.5));
        assert_eq!(SimTime(5.0) - SimTime(2.0), 3.0);
        assert_eq!(SimTime(5.0).since(SimTime(1.0)), 4.0);
    }

    #[test]
    fn total_order() {
        let mut v = vec![SimTime(3.0), SimTime(0.0), SimTime(1.5)];
        v.sort();
        assert_eq!(v, vec![SimTime(0.0), SimTime(1.5), SimTime(3.0)]);
        assert!(SimTime::ZERO < SimTime(1e-12));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn runs_get_distinct_streams() {
        let mut r0 = SimRng::for_run(42, 0);
        let mut r1 = SimRng::for_run(42, 1);
        let a: Vec<u64> = (0..4).map(|_| r0.random()).collect();
        let b: Vec<u64> = (0..4).map(|_| r1.random()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn children_are_reproducible() {
        let mut root_a = SimRng::new(1);
        let mut root_b = SimRng::new(1);
        let mut ca = root_a.child(2);
        let mut cb = root_b.child(2);
        assert_eq!(ca.random::<u64>(), cb.random::<u64>());
    }
}

#[cfg(test)]
mod rv {
    use crate::{Constant, CustomDiscrete, DiscreteUniform, Exponential, RandomVariable, SimRng};

    #[test]
    fn constant_always_same() {
        let rv = Constant::new(2.5).unwrap();
        let mut rng = SimRng::new(0);
        assert!((0..10).all(|_| rv.sample(&mut rng) == 2.5));
    }

    #[test]
    fn constant_rejects_nan() {
        assert!(Constant::new(f64::NAN).is_err());
    }

    #[test]
    fn exponential_rejects_bad_rate() {
        assert!(Exponential::new(0.0).is_err());
        assert!(Exponential::new(-1.0).is_err());
        assert!(Exponential::new(f64::INFINITY).is_err());
    }

    #[test]
    fn exponential_sample_mean_close_to_expected() {
        let rv = Exponential::new(2.0).unwrap();
        let mut rng = SimRng::new(11);
        let n = 20_000;
        let mean = (0..n).map(|_| rv.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "got {mean}");
    }

    #[test]
    fn discrete_uniform_stays_in_range() {
        let rv = DiscreteUniform::new(1, 3).unwrap();
        let mut rng = SimRng::new(5);
        for _ in 0..200 {
            let x = rv.sample(&mut rng);
            assert!(x == 1.0 || x == 2.0 || x == 3.0, "got {x}");
        }
        assert!(DiscreteUniform::new(4, 1).is_err());
    }

    #[test]
    fn discrete_uniform_degenerate() {
        let rv = DiscreteUniform::new(1, 1).unwrap();
        let mut rng = SimRng::new(5);
        assert_eq!(rv.sample(&mut rng), 1.0);
    }

    #[test]
    fn custom_discrete_only_yields_listed_values() {
        let values = [0.5, 0.75, 1.0, 1.25, 1.5];
        let rv = CustomDiscrete::uniform(values.to_vec()).unwrap();
        let mut rng = SimRng::new(9);
        let draws: Vec<f64> = (0..2_000).map(|_| rv.sample(&mut rng)).collect();
        assert!(draws.iter().all(|x| values.contains(x)));
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        assert!((mean - 1.0).abs() < 0.05, "got {mean}");
    }

    #[test]
    fn custom_discrete_validates() {
        assert!(CustomDiscrete::new(vec![], vec![]).is_err());
        assert!(CustomDiscrete::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(CustomDiscrete::new(vec![1.0], vec![-1.0]).is_err());
        assert!(CustomDiscrete::new(vec![1.0], vec![0.0]).is_err());
    }

    #[test]
    fn custom_discrete_rejects_negative_values() {
        assert!(CustomDiscrete::uniform(vec![0.5, -1.0]).is_err());
        assert!(CustomDiscrete::uniform(vec![f64::NAN]).is_err());
        assert!(CustomDiscrete::uniform(vec![0.0, 2.0]).is_ok());
    }

    #[test]
    fn zero_weight_value_never_drawn() {
        let rv = CustomDiscrete::new(vec![1.0, 99.0], vec![1.0, 0.0]).unwrap();
        let mut rng = SimRng::new(3);
        assert!((0..100).all(|_| rv.sample(&mut rng) == 1.0));
    }
}

#[cfg(test)]
mod task {
    use crate::{Experience, NodeId, SimTime, Task, TaskId};

    #[test]
    fn response_time_and_experience() {
        let task = Task::new(TaskId(0), SimTime(2.0), 1.0, NodeId(1));
        assert_eq!(task.response_time(SimTime(4.5)), 2.5);

        let exp = Experience::from_completion(&task, SimTime(4.5));
        assert_eq!(exp.node_id, NodeId(1));
        assert_eq!(exp.observed_value, 2.5);
        assert_eq!(exp.time_epoch, SimTime(4.5));
    }
}

#[cfg(test)]
mod stats {
    use crate::SimResult;

    #[test]
    fn mean_and_population_std() {
        let r = SimResult::from_response_times(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(r.et, 3.0);
        assert!((r.std_t - 2.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(r.num_tasks, 5);
    }

    #[test]
    fn constant_sample_has_zero_std() {
        let r = SimResult::from_response_times(&[1.0; 10]);
        assert_eq!(r.et, 1.0);
        assert_eq!(r.std_t, 0.0);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(SimResult::from_response_times(&[]), SimResult::default());
    }

    #[test]
    fn average_of_replicates() {
        let a = SimResult { et: 1.0, std_t: 0.5, num_tasks: 10 };
        let b = SimResult { et: 3.0, std_t: 1.5, num_tasks: 10 };
        let avg = SimResult::average(&[a, b]).unwrap();
        assert_eq!(avg.et, 2.0);
        assert_eq!(avg.std_t, 1.0);
        assert_eq!(avg.num_tasks, 20);
        assert!(SimResult::average(&[]).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, NodeId, SimConfig};

    #[test]
    fn valid_config() {
        let cfg = SimConfig::new(3, 100, 42);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server_ids(), vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(cfg.source_id(), NodeId(3));
        assert_eq!(cfg.sink_id(), NodeId(4));
    }

    #[test]
    fn rejects_zero_servers_and_zero_target() {
        assert!(SimConfig::new(0, 10, 0).validate().is_err());
        assert!(SimConfig::new(2, 0, 0).validate().is_err());
    }

    #[test]
    fn rejects_generation_cap_below_target() {
        let mut cfg = SimConfig::new(1, 10, 0);
        cfg.max_tasks_to_generate = Some(5);
        assert!(cfg.validate().is_err());
        cfg.max_tasks_to_generate = Some(10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn check_duration() {
        assert_eq!(CoreError::check_duration("service", 0.0).unwrap(), 0.0);
        assert!(CoreError::check_duration("service", -0.1).is_err());
        assert!(CoreError::check_duration("service", f64::NAN).is_err());
    }
}
