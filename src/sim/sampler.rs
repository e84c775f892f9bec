//! Weighted shutoff sampler used when occupants leave a room.
//!
//! Running appliances enter a pool with `S - rank + 1` copies each, where `S`
//! is the rank sum of everything running, so high-rank appliances are drawn
//! for removal less often. The number of removals `k` is drawn from
//! `[0, running)`, which always leaves at least one appliance on. Each removal
//! draws a pool index from `[1, pool_len)`; index 0 is never drawn, which
//! slightly favours the first (highest-rank) appliance staying on.
//!
//! The pool is never materialised: each appliance is a run of copies, and a
//! drawn index is resolved to its run by cumulative count.

use rand::Rng;
use tracing::debug;

use crate::building::Appliance;
use crate::error::{Result, SimError};

/// Contiguous copies of one running appliance in the removal pool.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    /// Index into the room's appliances.
    appliance: usize,
    copies: u64,
}

/// Switches off a random, rank-weighted subset of the running appliances.
///
/// Returns the indices (into `appliances`) that were turned off, in draw order.
///
/// # Errors
///
/// Returns `SimError::SamplingExhausted` if the pool holds fewer than two
/// entries while removals are still pending. This only happens when ranks
/// are zero or negative. Returns `SimError::RankOverflow` if the rank sum or
/// a copy count does not fit in an `i64`.
pub fn shut_off_weighted<R: Rng>(
    room: &str,
    appliances: &mut [Appliance],
    rng: &mut R,
) -> Result<Vec<usize>> {
    let running: Vec<usize> = appliances
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_on())
        .map(|(i, _)| i)
        .collect();
    if running.is_empty() {
        return Ok(Vec::new());
    }

    let mut runs = weighted_runs(room, appliances, &running)?;
    let mut total = pool_len(room, &runs)?;
    let mut pending = rng.random_range(0..running.len());
    debug!(room, running = running.len(), pool = total, pending, "sampling shutoffs");

    let mut turned_off = Vec::with_capacity(pending);
    while pending > 0 {
        if total < 2 {
            return Err(SimError::SamplingExhausted {
                room: room.to_string(),
                remaining: total as usize,
                pending,
            });
        }
        let position = run_at(&runs, rng.random_range(1..total));
        let run = runs.remove(position);
        appliances[run.appliance].deactivate();
        total -= run.copies;
        turned_off.push(run.appliance);
        pending -= 1;
    }

    Ok(turned_off)
}

/// Builds the removal pool for the appliances at `running`, in order, as
/// runs of copies. Appliances with no copies are left out.
fn weighted_runs(room: &str, appliances: &[Appliance], running: &[usize]) -> Result<Vec<Run>> {
    let overflow = || SimError::RankOverflow {
        room: room.to_string(),
    };

    let rank_sum = running
        .iter()
        .try_fold(0i64, |sum, &i| sum.checked_add(appliances[i].rank))
        .ok_or_else(overflow)?;

    let mut runs = Vec::with_capacity(running.len());
    for &i in running {
        let copies = rank_sum
            .checked_sub(appliances[i].rank)
            .and_then(|c| c.checked_add(1))
            .ok_or_else(overflow)?;
        if copies > 0 {
            runs.push(Run {
                appliance: i,
                copies: copies as u64,
            });
        }
    }
    Ok(runs)
}

fn pool_len(room: &str, runs: &[Run]) -> Result<u64> {
    runs.iter()
        .try_fold(0u64, |total, run| total.checked_add(run.copies))
        .ok_or_else(|| SimError::RankOverflow {
            room: room.to_string(),
        })
}

/// Position of the run holding pool index `index`.
fn run_at(runs: &[Run], index: u64) -> usize {
    let mut end = 0;
    for (position, run) in runs.iter().enumerate() {
        end += run.copies;
        if index < end {
            return position;
        }
    }
    runs.len() - 1
}
