//! Tests for the cinema demo: configuration layering, prompts, and the report.

use std::io::Cursor;

use des_core::Dist;
use des_sim::NoopObserver;

use crate::cli::Args;
use crate::scenario::{Scenario, Settings};
use crate::{prompt, report};

fn complete(staff: usize, counters: usize, customers: usize, horizon: f64) -> Scenario {
    Scenario {
        staff: Some(staff),
        counters: Some(counters),
        customers: Some(customers),
        horizon: Some(horizon),
        ..Scenario::default()
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn json_overrides_only_given_fields() {
        let json = r#"{ "staff": 3, "arrival_gap": { "kind": "exponential", "mean": 0.25 } }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.staff, Some(3));
        assert_eq!(scenario.counters, None);
        assert_eq!(scenario.arrival_gap, Dist::exponential(0.25));
        assert_eq!(scenario.decide, Dist::uniform_int(1, 4));
        assert_eq!(scenario.seed, 30);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(serde_json::from_str::<Scenario>(r#"{ "ushers": 2 }"#).is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, r#"{ "horizon": 45.0, "seed": 7 }"#).unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.horizon, Some(45.0));
        assert_eq!(scenario.seed, 7);
        assert!(Scenario::load(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut scenario = Scenario { staff: Some(3), counters: Some(2), ..Scenario::default() };
        let args = Args { staff: Some(5), seed: Some(99), ..Args::default() };
        scenario.apply_args(&args);
        assert_eq!(scenario.staff, Some(5));
        assert_eq!(scenario.counters, Some(2));
        assert_eq!(scenario.seed, 99);
    }

    #[test]
    fn validate_rejects_non_positive_values() {
        assert!(Scenario { staff: Some(0), ..Scenario::default() }.validate().is_err());
        assert!(Scenario { horizon: Some(-5.0), ..Scenario::default() }.validate().is_err());
        assert!(Scenario { horizon: Some(f64::NAN), ..Scenario::default() }.validate().is_err());
        assert!(Scenario { buy_probability: 1.5, ..Scenario::default() }.validate().is_err());
        assert!(Scenario { buy: Dist::uniform(6.0, 1.0), ..Scenario::default() }.validate().is_err());
        assert!(Scenario::default().validate().is_ok());
    }

    #[test]
    fn settings_require_every_value() {
        let err = Scenario { staff: Some(1), ..Scenario::default() }.settings().unwrap_err();
        assert!(err.to_string().contains("counters"));
        assert_eq!(
            complete(2, 1, 4, 30.0).settings().unwrap(),
            Settings { staff: 2, counters: 1, customers: 4, horizon: 30.0 }
        );
    }

    #[test]
    fn built_sim_is_deterministic() {
        let scenario = complete(2, 1, 5, 30.0);
        let mut a = scenario.build_sim().unwrap();
        let mut b = scenario.build_sim().unwrap();
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();

        assert!(!a.samples().is_empty());
        assert_eq!(a.samples(), b.samples());
        // decide ≥ 1, purchase ≥ 1, check ≥ 5 s.
        let floor = 2.0 + 5.0 / 60.0;
        assert!(a.samples().iter().all(|s| s.elapsed >= floor - 1e-9));
        assert!(a.samples().iter().all(|s| s.completed_at.as_f64() <= 30.0));
    }
}

#[cfg(test)]
mod prompt_tests {
    use super::*;

    #[test]
    fn retries_until_positive() {
        let mut input = Cursor::new("abc\n0\n-2\n3\n");
        let mut output = Vec::new();
        let staff: usize = prompt::ask(&mut input, &mut output, "Total staff").unwrap();
        assert_eq!(staff, 3);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Try again. Please provide number > 0").count(), 3);
        assert_eq!(printed.matches("Total staff: ").count(), 4);
    }

    #[test]
    fn closed_input_is_error() {
        let mut input = Cursor::new("x\n");
        let mut output = Vec::new();
        assert!(prompt::ask::<f64, _, _>(&mut input, &mut output, "Simulation duration in minutes").is_err());
    }

    #[test]
    fn only_missing_values_are_asked() {
        let mut scenario = Scenario { staff: Some(2), ..Scenario::default() };
        let mut input = Cursor::new("1\n5\n30\n");
        let mut output = Vec::new();
        prompt::fill_missing(&mut scenario, &mut input, &mut output).unwrap();

        assert_eq!(scenario.settings().unwrap(), Settings { staff: 2, counters: 1, customers: 5, horizon: 30.0 });
        let printed = String::from_utf8(output).unwrap();
        assert!(!printed.contains("Total staff"));
        assert!(printed.contains("Total counters"));
    }
}

#[cfg(test)]
mod report_tests {
    use des_core::{ProcessId, SimTime};
    use des_process::Sample;

    use super::*;

    fn sample(elapsed: f64) -> Sample {
        Sample {
            process:      ProcessId(1),
            spawned_at:   SimTime::ZERO,
            completed_at: SimTime::new(elapsed).unwrap(),
            elapsed,
        }
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(report::minutes_seconds(4.5), (4, 30));
        assert_eq!(report::minutes_seconds(0.0), (0, 0));
        assert_eq!(report::minutes_seconds(2.999), (3, 0));
    }

    #[test]
    fn report_lines() {
        let mut out = Vec::new();
        report::write_report(&mut out, &[sample(3.0), sample(6.0)], 30.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "customer 1 : 3.00 minutes");
        assert_eq!(lines[1], "customer 2 : 6.00 minutes");
        assert_eq!(lines[3], "There are 2 customers during 30 minutes simulation");
        assert_eq!(lines[4], "The average waiting time for customer is 4 minutes and 30 seconds.");
    }

    #[test]
    fn empty_report_has_no_average() {
        let mut out = Vec::new();
        report::write_report(&mut out, &[], 10.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("There are 0 customers"));
        assert!(!text.contains("average"));
    }
}
