//! Tests for the supermarket checkout analogy.

use std::time::Duration;

use cpu_compare::checkout::{CheckoutSim, Comparison, Verdict};
use cpu_compare::common::SimError;
use cpu_compare::sim::Ticker;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn with_customers(n: usize) -> CheckoutSim {
    let mut sim = CheckoutSim::default();
    for _ in 0..n {
        sim.add_customer().expect("idle");
    }
    sim
}

/// Tests that both queues drain at their own rate.
#[rstest]
#[case(1, 1, 1)]
#[case(4, 4, 1)]
#[case(5, 5, 2)]
#[case(8, 8, 2)]
#[case(10, 10, 3)]
fn test_queue_times(#[case] customers: usize, #[case] single: u64, #[case] multi: u64) {
    let mut sim = with_customers(customers);
    let comparison = sim
        .run(&Ticker::new(Duration::ZERO, None))
        .expect("run succeeds")
        .expect("queues drain");

    assert_eq!(comparison.single_time, single);
    assert_eq!(comparison.multi_time, multi);
    assert!(!sim.is_running());
    assert_eq!(sim.single_waiting(), 0);
    assert_eq!(sim.multi_waiting(), 0);
}

/// Tests the tick-by-tick drain of eight customers.
#[test]
fn test_tick_sequence() {
    let mut sim = with_customers(8);
    sim.start().expect("customers queued");

    assert!(sim.tick());
    assert_eq!((sim.single_waiting(), sim.multi_waiting()), (7, 4));
    assert!(sim.tick());
    assert_eq!((sim.single_waiting(), sim.multi_waiting()), (6, 0));
    assert_eq!(sim.multi_time(), 2);

    for _ in 0..5 {
        assert!(sim.tick());
    }
    assert!(!sim.tick());
    assert_eq!(sim.single_time(), 8);
    assert_eq!(sim.multi_time(), 2);
    assert!(!sim.tick());
}

/// Tests the comparison verdicts and message text.
#[test]
fn test_comparison_messages() {
    let multi = Comparison::new(8, 2);
    assert_eq!(multi.verdict, Verdict::MultiFaster);
    assert_eq!(multi.efficiency, 75.0);
    assert_eq!(multi.to_string(), "Multi-core is 75.0% faster! Single: 8s | Multi: 2s");

    let tie = Comparison::new(1, 1);
    assert_eq!(tie.verdict, Verdict::Tie);
    assert_eq!(tie.to_string(), "Both architectures are equally fast! Time: 1s");

    let single = Comparison::new(3, 4);
    assert_eq!(single.verdict, Verdict::SingleFaster);
    assert_eq!(single.efficiency, -33.3);
    assert_eq!(single.to_string(), "Single-core is 33.3% faster! Single: 3s | Multi: 4s");
}

/// Tests the guard notices.
#[test]
fn test_guards() {
    let mut empty = CheckoutSim::default();
    assert!(matches!(empty.start(), Err(SimError::NoCustomers)));

    let mut sim = with_customers(2);
    sim.start().expect("customers queued");
    assert!(matches!(sim.add_customer(), Err(SimError::RunInProgress)));
    assert!(matches!(sim.start(), Err(SimError::RunInProgress)));
}

/// Tests that reset clears everything, including id numbering.
#[test]
fn test_reset() {
    let mut sim = with_customers(3);
    sim.start().expect("customers queued");
    sim.tick();
    sim.reset();

    assert!(!sim.is_running());
    assert_eq!(sim.single_waiting(), 0);
    assert_eq!(sim.single_time(), 0);
    assert_eq!(sim.add_customer().expect("idle"), 1);
}

/// Tests a capped ticker stopping the checkout early.
#[test]
fn test_capped_run_returns_none() {
    let mut sim = with_customers(10);
    let result = sim
        .run(&Ticker::new(Duration::ZERO, Some(3)))
        .expect("run succeeds");
    assert_eq!(result, None);
    assert!(!sim.is_running());
    assert_eq!(sim.single_waiting(), 7);
}

/// Tests a custom cashier count.
#[test]
fn test_two_cashiers() {
    let mut sim = CheckoutSim::new(2);
    for _ in 0..5 {
        sim.add_customer().expect("idle");
    }
    let comparison = sim
        .run(&Ticker::new(Duration::ZERO, None))
        .expect("run succeeds")
        .expect("queues drain");
    assert_eq!(comparison.multi_time, 3);
}
