//! Supermarket checkout analogy.
//!
//! The same customers queue twice: once in front of a single cashier (single-core)
//! and once in front of a bank of cashiers (multi-core). Every second the single
//! cashier serves one customer and the bank serves up to one customer per cashier.
//! Each queue's clock runs only while it still has customers.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::sim::Ticker;

/// A queued customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: u32,
}

/// Which checkout finished first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    MultiFaster,
    SingleFaster,
    Tie,
}

/// Result of one checkout run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Comparison {
    /// Seconds the single cashier needed.
    pub single_time: u64,
    /// Seconds the cashier bank needed.
    pub multi_time: u64,
    /// `(single - multi) / single * 100`, rounded to one decimal.
    pub efficiency: f64,
    pub verdict: Verdict,
}

impl Comparison {
    pub fn new(single_time: u64, multi_time: u64) -> Self {
        let efficiency = if single_time == 0 {
            0.0
        } else {
            let raw = (single_time as f64 - multi_time as f64) / single_time as f64 * 100.0;
            (raw * 10.0).round() / 10.0
        };
        let verdict = if multi_time < single_time {
            Verdict::MultiFaster
        } else if multi_time > single_time {
            Verdict::SingleFaster
        } else {
            Verdict::Tie
        };
        Self {
            single_time,
            multi_time,
            efficiency,
            verdict,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            Verdict::MultiFaster => write!(
                f,
                "Multi-core is {:.1}% faster! Single: {}s | Multi: {}s",
                self.efficiency, self.single_time, self.multi_time
            ),
            Verdict::SingleFaster => write!(
                f,
                "Single-core is {:.1}% faster! Single: {}s | Multi: {}s",
                self.efficiency.abs(),
                self.single_time,
                self.multi_time
            ),
            Verdict::Tie => write!(
                f,
                "Both architectures are equally fast! Time: {}s",
                self.single_time
            ),
        }
    }
}

/// State of the checkout simulation.
#[derive(Clone, Debug)]
pub struct CheckoutSim {
    single_queue: VecDeque<Customer>,
    multi_queue: VecDeque<Customer>,
    cashiers: usize,
    next_id: u32,
    running: bool,
    single_time: u64,
    multi_time: u64,
}

impl Default for CheckoutSim {
    fn default() -> Self {
        Self::new(4)
    }
}

impl CheckoutSim {
    /// Creates an empty simulation with `cashiers` checkouts on the multi-core side.
    pub fn new(cashiers: usize) -> Self {
        Self {
            single_queue: VecDeque::new(),
            multi_queue: VecDeque::new(),
            cashiers: cashiers.max(1),
            next_id: 0,
            running: false,
            single_time: 0,
            multi_time: 0,
        }
    }

    /// Creates an empty simulation with the configured cashier count.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.checkout.cashiers)
    }

    /// Queues a customer on both sides and returns its id.
    ///
    /// Refused while a run is active.
    pub fn add_customer(&mut self) -> SimResult<u32> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        self.next_id += 1;
        let customer = Customer { id: self.next_id };
        self.single_queue.push_back(customer);
        self.multi_queue.push_back(customer);
        Ok(self.next_id)
    }

    /// Starts a run and zeroes both clocks.
    pub fn start(&mut self) -> SimResult<()> {
        if self.running {
            return Err(SimError::RunInProgress);
        }
        if self.single_queue.is_empty() {
            return Err(SimError::NoCustomers);
        }
        self.running = true;
        self.single_time = 0;
        self.multi_time = 0;
        info!(
            customers = self.single_queue.len(),
            cashiers = self.cashiers,
            "checkout run started"
        );
        Ok(())
    }

    /// Advances one second. Returns `true` while customers remain.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if !self.single_queue.is_empty() {
            self.single_time += 1;
            self.single_queue.pop_front();
        }
        if !self.multi_queue.is_empty() {
            self.multi_time += 1;
            let served = self.cashiers.min(self.multi_queue.len());
            self.multi_queue.drain(..served);
        }
        debug!(
            single_waiting = self.single_queue.len(),
            multi_waiting = self.multi_queue.len(),
            single_time = self.single_time,
            multi_time = self.multi_time,
            "checkout tick"
        );
        if self.single_queue.is_empty() && self.multi_queue.is_empty() {
            self.running = false;
        }
        self.running
    }

    /// Starts a run and ticks it on `ticker` until both queues are empty.
    ///
    /// Returns `None` if the ticker stopped first (cap or cancellation); the
    /// simulation is then left stopped with whatever customers remain.
    pub fn run(&mut self, ticker: &Ticker) -> SimResult<Option<Comparison>> {
        self.start()?;
        let result = ticker.drive(|_| Ok(!self.tick()))?;
        if self.running {
            self.running = false;
            info!(stop = ?result.stop, "checkout run stopped early");
            return Ok(None);
        }
        let comparison = self.comparison();
        info!(%comparison, "checkout run completed");
        Ok(Some(comparison))
    }

    /// Compares the two clocks as they stand.
    pub fn comparison(&self) -> Comparison {
        Comparison::new(self.single_time, self.multi_time)
    }

    /// Clears queues, clocks and the id counter.
    pub fn reset(&mut self) {
        *self = Self::new(self.cashiers);
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cashiers on the multi-core side.
    pub fn cashiers(&self) -> usize {
        self.cashiers
    }

    /// Customers still waiting for the single cashier.
    pub fn single_waiting(&self) -> usize {
        self.single_queue.len()
    }

    /// Customers still waiting for the cashier bank.
    pub fn multi_waiting(&self) -> usize {
        self.multi_queue.len()
    }

    /// Seconds the single cashier has been busy this run.
    pub fn single_time(&self) -> u64 {
        self.single_time
    }

    /// Seconds the cashier bank has been busy this run.
    pub fn multi_time(&self) -> u64 {
        self.multi_time
    }
}
