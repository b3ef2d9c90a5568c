//! Background worker thread — provider fetches and simulated latency run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! never touches the session store; it fetches data and sleeps out the
//! configured latencies, and the main thread applies mutations to the store
//! only after the matching `MutationDone` arrives. Fetch responses are tagged
//! with the generation the request carried, so the main thread can drop any
//! response that a newer request has already superseded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use signalstream_core::config::LatencyConfig;
use signalstream_core::data::{DataProvider, SampleProvider};
use signalstream_core::domain::{
    DashboardSnapshot, StrategyId, TradingSignal, TradingStrategy, User, UserId,
};
use signalstream_core::forms::{ValidBroadcast, ValidStrategy, ValidUser};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchSignals { generation: u64 },
    FetchStrategies { generation: u64 },
    FetchUsers { generation: u64 },
    FetchDashboard { generation: u64 },
    Mutate(Mutation),
    Shutdown,
}

/// A validated admin mutation, carried through the worker for its latency
/// and echoed back untouched.
#[derive(Debug, Clone)]
pub enum Mutation {
    SaveStrategy(ValidStrategy),
    DeleteStrategy(StrategyId),
    UpdateUser(ValidUser),
    DeleteUser(UserId),
    Broadcast(ValidBroadcast),
}

impl Mutation {
    fn latency(&self, latency: &LatencyConfig) -> Duration {
        match self {
            Mutation::SaveStrategy(_) | Mutation::UpdateUser(_) => latency.save(),
            Mutation::DeleteStrategy(_) | Mutation::DeleteUser(_) => latency.delete(),
            Mutation::Broadcast(_) => latency.broadcast(),
        }
    }
}

/// Which collection a failed fetch was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Signals,
    Strategies,
    Users,
    Dashboard,
}

impl FetchTarget {
    pub fn label(self) -> &'static str {
        match self {
            FetchTarget::Signals => "signals",
            FetchTarget::Strategies => "strategies",
            FetchTarget::Users => "users",
            FetchTarget::Dashboard => "dashboard",
        }
    }
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    SignalsLoaded {
        generation: u64,
        signals: Vec<TradingSignal>,
    },
    StrategiesLoaded {
        generation: u64,
        strategies: Vec<TradingStrategy>,
    },
    UsersLoaded {
        generation: u64,
        users: Vec<User>,
    },
    DashboardLoaded {
        generation: u64,
        snapshot: DashboardSnapshot,
    },
    FetchFailed {
        generation: u64,
        target: FetchTarget,
        error: String,
    },
    MutationDone {
        mutation: Mutation,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: SampleProvider,
    latency: LatencyConfig,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("signalstream-worker".into())
        .spawn(move || {
            worker_loop(provider, latency, rx, tx, cancel);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    provider: SampleProvider,
    latency: LatencyConfig,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                cancel.store(false, Ordering::Relaxed);
                handle_command(cmd, &provider, &latency, &tx, &cancel);
            }
        }
    }
}

fn handle_command(
    cmd: WorkerCommand,
    provider: &SampleProvider,
    latency: &LatencyConfig,
    tx: &Sender<WorkerResponse>,
    cancel: &Arc<AtomicBool>,
) {
    match cmd {
        WorkerCommand::FetchSignals { generation } => {
            if !sleep_unless_cancelled(latency.fetch(), cancel) {
                return;
            }
            let response = match provider.fetch_signals() {
                Ok(signals) => WorkerResponse::SignalsLoaded { generation, signals },
                Err(e) => fetch_failed(generation, FetchTarget::Signals, e),
            };
            let _ = tx.send(response);
        }
        WorkerCommand::FetchStrategies { generation } => {
            if !sleep_unless_cancelled(latency.fetch(), cancel) {
                return;
            }
            let response = match provider.fetch_strategies() {
                Ok(strategies) => WorkerResponse::StrategiesLoaded { generation, strategies },
                Err(e) => fetch_failed(generation, FetchTarget::Strategies, e),
            };
            let _ = tx.send(response);
        }
        WorkerCommand::FetchUsers { generation } => {
            if !sleep_unless_cancelled(latency.fetch(), cancel) {
                return;
            }
            let response = match provider.fetch_users() {
                Ok(users) => WorkerResponse::UsersLoaded { generation, users },
                Err(e) => fetch_failed(generation, FetchTarget::Users, e),
            };
            let _ = tx.send(response);
        }
        WorkerCommand::FetchDashboard { generation } => {
            if !sleep_unless_cancelled(latency.fetch(), cancel) {
                return;
            }
            let response = match provider.fetch_dashboard() {
                Ok(snapshot) => WorkerResponse::DashboardLoaded { generation, snapshot },
                Err(e) => fetch_failed(generation, FetchTarget::Dashboard, e),
            };
            let _ = tx.send(response);
        }
        WorkerCommand::Mutate(mutation) => {
            if !sleep_unless_cancelled(mutation.latency(latency), cancel) {
                return;
            }
            let _ = tx.send(WorkerResponse::MutationDone { mutation });
        }
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

fn fetch_failed(
    generation: u64,
    target: FetchTarget,
    error: signalstream_core::data::DataError,
) -> WorkerResponse {
    WorkerResponse::FetchFailed {
        generation,
        target,
        error: error.to_string(),
    }
}

/// Sleep in short slices so a shutdown-time cancel is not stuck behind a
/// full simulated latency. Returns false when cancelled.
fn sleep_unless_cancelled(total: Duration, cancel: &Arc<AtomicBool>) -> bool {
    const SLICE: Duration = Duration::from_millis(25);
    let mut remaining = total;
    while !remaining.is_zero() {
        if cancel.load(Ordering::Relaxed) {
            return false;
        }
        let step = remaining.min(SLICE);
        thread::sleep(step);
        remaining -= step;
    }
    !cancel.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn instant_latency() -> LatencyConfig {
        LatencyConfig {
            fetch_ms: 0,
            save_ms: 0,
            delete_ms: 0,
            broadcast_ms: 0,
        }
    }

    fn spawn_test_worker(
        provider: SampleProvider,
    ) -> (
        Sender<WorkerCommand>,
        Receiver<WorkerResponse>,
        JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let handle = spawn_worker(provider, instant_latency(), cmd_rx, resp_tx, cancel);
        (cmd_tx, resp_rx, handle)
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, _resp_rx, handle) = spawn_test_worker(SampleProvider::new(1));
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn fetch_responses_carry_the_request_generation() {
        let (cmd_tx, resp_rx, handle) = spawn_test_worker(SampleProvider::new(1));
        cmd_tx
            .send(WorkerCommand::FetchSignals { generation: 7 })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::SignalsLoaded { generation, signals } => {
                assert_eq!(generation, 7);
                assert!(!signals.is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn outage_turns_into_fetch_failed() {
        let provider = SampleProvider::new(1).with_outage(true);
        let (cmd_tx, resp_rx, handle) = spawn_test_worker(provider);
        cmd_tx
            .send(WorkerCommand::FetchDashboard { generation: 3 })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::FetchFailed { generation, target, error } => {
                assert_eq!(generation, 3);
                assert_eq!(target, FetchTarget::Dashboard);
                assert!(!error.is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn mutations_echo_back_after_the_latency() {
        let (cmd_tx, resp_rx, handle) = spawn_test_worker(SampleProvider::new(1));
        let id = StrategyId::new("RSI_Momentum");
        cmd_tx
            .send(WorkerCommand::Mutate(Mutation::DeleteStrategy(id.clone())))
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::MutationDone {
                mutation: Mutation::DeleteStrategy(echoed),
            } => assert_eq!(echoed, id),
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
