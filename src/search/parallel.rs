//! Parallel root search
//!
//! The candidate list is dealt round-robin into one job per worker. Every
//! job runs the ordinary root loop on its own fork of the session, with a
//! single deadline shared by all of them and started once the jobs are
//! dealt. Workers share nothing mutable;
//! results are merged on the calling thread after all of them are joined.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::board::Pos;
use crate::config::EngineConfig;
use crate::session::Session;

use super::alphabeta::SearchStats;
use super::deadline::Deadline;
use super::root::{search_root, DepthAdjust, RootChoice};

/// What one worker hands back
#[derive(Debug, Clone)]
struct WorkerReport {
    best: Option<RootChoice>,
    adjust: DepthAdjust,
    stats: SearchStats,
}

/// Merged result of all workers
#[derive(Debug, Clone)]
pub struct ParallelOutcome {
    /// Highest score; ties go to the lowest original candidate index
    pub best: Option<RootChoice>,
    pub adjust: DepthAdjust,
    pub stats: SearchStats,
    /// Workers whose results made it into the merge
    pub joined: usize,
    /// The deadline every worker ran against
    pub deadline: Deadline,
}

/// Deal candidates round-robin into `workers` jobs, keeping each
/// candidate's original index
pub fn partition(candidates: &[Pos], workers: usize) -> Vec<Vec<(usize, Pos)>> {
    let workers = workers.max(1);
    let mut jobs = vec![Vec::new(); workers];
    for (index, &pos) in candidates.iter().enumerate() {
        jobs[index % workers].push((index, pos));
    }
    jobs
}

fn run_job(session: &mut Session, config: &EngineConfig, job: &[(usize, Pos)], deadline: Deadline) -> WorkerReport {
    let outcome = search_root(session, config, job, deadline);
    WorkerReport {
        best: outcome.best,
        adjust: DepthAdjust::observe(outcome.timed_out, &deadline),
        stats: outcome.stats,
    }
}

/// Search `candidates` with `config.workers` threads, all bound by one
/// deadline of `budget` that starts after partitioning.
///
/// Jobs with no candidates are not spawned. A worker that panics is left
/// out of the merge.
pub fn dispatch(
    session: &Session,
    config: &EngineConfig,
    candidates: &[Pos],
    budget: Duration,
) -> ParallelOutcome {
    let jobs: Vec<_> = partition(candidates, config.workers)
        .into_iter()
        .filter(|job| !job.is_empty())
        .collect();
    let deadline = Deadline::starting_now(budget);
    debug!(
        "dispatching {} candidates to {} workers at depth {}",
        candidates.len(),
        jobs.len(),
        session.depth
    );

    let reports: Vec<WorkerReport> = thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let mut fork = session.fork();
                scope.spawn(move || run_job(&mut fork, config, &job, deadline))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .filter_map(|(worker_id, handle)| match handle.join() {
                Ok(report) => Some(report),
                Err(_) => {
                    warn!("worker {worker_id} panicked, skipping its results");
                    None
                }
            })
            .collect()
    });

    merge(&reports, deadline)
}

fn merge(reports: &[WorkerReport], deadline: Deadline) -> ParallelOutcome {
    let mut stats = SearchStats::default();
    for report in reports {
        stats.merge(&report.stats);
    }

    let best = reports
        .iter()
        .filter_map(|report| report.best)
        .max_by(|a, b| a.score.cmp(&b.score).then(b.index.cmp(&a.index)));

    let adjust = if reports.iter().any(|r| r.adjust == DepthAdjust::Shallower) {
        DepthAdjust::Shallower
    } else if !reports.is_empty() && reports.iter().all(|r| r.adjust == DepthAdjust::Deeper) {
        DepthAdjust::Deeper
    } else {
        DepthAdjust::Keep
    };

    if let Some(choice) = best {
        debug!(
            "merged {} workers after {} ms: {} (score {}), depth {:?}",
            reports.len(),
            deadline.elapsed().as_millis(),
            choice.pos,
            choice.score,
            adjust
        );
    }

    ParallelOutcome {
        best,
        adjust,
        stats,
        joined: reports.len(),
        deadline,
    }
}
