//! Poll Loop
//!
//! Keeps the monitoring view fresh: one refresh right away, then a fixed
//! interval. Each cycle fetches statistics and the transaction feed
//! together and settles as a whole, so the view never shows half an update.

use std::cell::Cell;
use std::rc::Rc;

use futures::future;
use gloo_timers::callback::Interval;
use leptos::spawn_local;

use crate::api::{self, ApiError};
use crate::state::dashboard::{DashboardState, Stats, Transaction};
use crate::state::session::Session;

/// Milliseconds between poll cycles
pub const POLL_INTERVAL_MS: u32 = 3_000;

/// Page size for the live feed
pub const FEED_LIMIT: usize = 20;

/// How a finished cycle is applied to the view
#[derive(Debug, PartialEq)]
enum CycleOutcome {
    /// Both fetches succeeded; replace the displayed snapshot
    Applied {
        stats: Stats,
        transactions: Vec<Transaction>,
    },
    /// The API rejected the token; the session is over
    AuthRejected,
    /// The API could not be reached; keep what is displayed
    Unreachable(String),
}

/// Settle the two fetches of one cycle into a single outcome.
///
/// A credential rejection on either endpoint ends the session; any other
/// failure leaves the current snapshot in place.
fn settle_cycle(
    stats: Result<Stats, ApiError>,
    transactions: Result<Vec<Transaction>, ApiError>,
) -> CycleOutcome {
    match (stats, transactions) {
        (Ok(stats), Ok(transactions)) => CycleOutcome::Applied {
            stats,
            transactions,
        },
        (Err(ApiError::Unauthorized), _) | (_, Err(ApiError::Unauthorized)) => {
            CycleOutcome::AuthRejected
        }
        (Err(e), _) | (_, Err(e)) => CycleOutcome::Unreachable(e.to_string()),
    }
}

/// Flags shared between the interval, the in-flight cycle, and teardown
#[derive(Default)]
struct PollFlags {
    in_flight: Cell<bool>,
    stopped: Cell<bool>,
}

impl PollFlags {
    /// Claim the in-flight slot. Returns false while a cycle is still
    /// running or after the loop has stopped.
    fn try_begin(&self) -> bool {
        if self.stopped.get() || self.in_flight.get() {
            return false;
        }
        self.in_flight.set(true);
        true
    }

    fn finish(&self) {
        self.in_flight.set(false);
    }

    fn stop(&self) {
        self.stopped.set(true);
    }

    fn stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct PollHandle {
    _interval: Interval,
    flags: Rc<PollFlags>,
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.flags.stop();
    }
}

/// Start the poll loop for the monitoring view.
///
/// Runs one cycle immediately, then one every [`POLL_INTERVAL_MS`]. A tick
/// that would overlap a cycle still in flight is skipped. The returned
/// handle stops the loop when dropped; `on_unauthorized` fires once if the
/// API rejects the token.
pub fn start_polling<F>(state: DashboardState, session: Session, on_unauthorized: F) -> PollHandle
where
    F: Fn() + Clone + 'static,
{
    let flags = Rc::new(PollFlags::default());

    let tick = {
        let flags = Rc::clone(&flags);
        move || {
            if !flags.try_begin() {
                return;
            }

            let state = state.clone();
            let session = session.clone();
            let flags = Rc::clone(&flags);
            let on_unauthorized = on_unauthorized.clone();
            spawn_local(async move {
                run_cycle(&state, &session, &flags, &on_unauthorized).await;
                flags.finish();
            });
        }
    };

    tick();
    let interval = Interval::new(POLL_INTERVAL_MS, tick);

    PollHandle {
        _interval: interval,
        flags,
    }
}

/// One poll cycle: fetch statistics and the feed together, then apply
/// exactly one state update.
async fn run_cycle(
    state: &DashboardState,
    session: &Session,
    flags: &PollFlags,
    on_unauthorized: &impl Fn(),
) {
    let token = match session.read() {
        Some(token) => token,
        None => {
            // Token vanished between cycles (sign-out in another tab)
            flags.stop();
            on_unauthorized();
            return;
        }
    };

    let (stats, transactions) = future::join(
        api::fetch_stats(&token),
        api::fetch_transactions(&token, FEED_LIMIT),
    )
    .await;

    // A late result after teardown must not touch the view
    if flags.stopped() {
        return;
    }

    apply_outcome(
        state,
        session,
        flags,
        settle_cycle(stats, transactions),
        on_unauthorized,
    );
}

/// Apply one settled cycle: a snapshot replacement, the end of the
/// session, or the connectivity notice.
fn apply_outcome(
    state: &DashboardState,
    session: &Session,
    flags: &PollFlags,
    outcome: CycleOutcome,
    on_unauthorized: &impl Fn(),
) {
    match outcome {
        CycleOutcome::Applied {
            stats,
            transactions,
        } => {
            state.apply_snapshot(stats, transactions);
        }
        CycleOutcome::AuthRejected => {
            flags.stop();
            session.clear();
            on_unauthorized();
        }
        CycleOutcome::Unreachable(reason) => {
            web_sys::console::warn_1(&format!("Poll cycle failed: {}", reason).into());
            state.mark_unreachable();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::{create_runtime, SignalGetUntracked};

    fn stats() -> Stats {
        Stats {
            total_transactions: 5000,
            fraud_count: 85,
            fraud_percentage: 1.7,
            daily_stats: Vec::new(),
        }
    }

    fn feed() -> Vec<Transaction> {
        vec![Transaction {
            transaction_id: "tx-001".to_string(),
            is_fraud: false,
            confidence: 0.42,
            timestamp: None,
            transaction_data: Default::default(),
        }]
    }

    #[test]
    fn test_settle_applies_on_double_success() {
        let outcome = settle_cycle(Ok(stats()), Ok(feed()));
        assert_eq!(
            outcome,
            CycleOutcome::Applied {
                stats: stats(),
                transactions: feed(),
            }
        );
    }

    #[test]
    fn test_settle_rejects_on_stats_401() {
        let outcome = settle_cycle(Err(ApiError::Unauthorized), Ok(feed()));
        assert_eq!(outcome, CycleOutcome::AuthRejected);
    }

    #[test]
    fn test_settle_rejects_on_feed_401() {
        let outcome = settle_cycle(Ok(stats()), Err(ApiError::Unauthorized));
        assert_eq!(outcome, CycleOutcome::AuthRejected);
    }

    #[test]
    fn test_settle_prefers_rejection_over_transport_error() {
        let outcome = settle_cycle(
            Err(ApiError::Network("connection refused".to_string())),
            Err(ApiError::Unauthorized),
        );
        assert_eq!(outcome, CycleOutcome::AuthRejected);
    }

    #[test]
    fn test_settle_unreachable_on_network_error() {
        let outcome = settle_cycle(
            Err(ApiError::Network("connection refused".to_string())),
            Ok(feed()),
        );
        match outcome {
            CycleOutcome::Unreachable(reason) => assert!(reason.contains("connection refused")),
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }

    #[test]
    fn test_settle_unreachable_on_server_error() {
        let outcome = settle_cycle(
            Ok(stats()),
            Err(ApiError::Rejected {
                status: 500,
                message: "internal error".to_string(),
            }),
        );
        assert!(matches!(outcome, CycleOutcome::Unreachable(_)));
    }

    #[test]
    fn test_flags_suppress_overlapping_ticks() {
        let flags = PollFlags::default();
        assert!(flags.try_begin());
        assert!(!flags.try_begin());

        flags.finish();
        assert!(flags.try_begin());
    }

    #[test]
    fn test_flags_stop_is_permanent() {
        let flags = PollFlags::default();
        flags.stop();
        assert!(!flags.try_begin());

        flags.finish();
        assert!(!flags.try_begin());
    }

    #[test]
    fn test_auth_rejection_clears_token_and_redirects_once() {
        let runtime = create_runtime();

        let state = DashboardState::new();
        state.apply_snapshot(stats(), feed());

        let session = Session::in_memory();
        session.write("stale-token");

        let flags = PollFlags::default();
        let redirects = Rc::new(Cell::new(0));

        let redirect_count = Rc::clone(&redirects);
        let on_unauthorized = move || redirect_count.set(redirect_count.get() + 1);
        apply_outcome(
            &state,
            &session,
            &flags,
            CycleOutcome::AuthRejected,
            &on_unauthorized,
        );

        assert_eq!(session.read(), None);
        assert_eq!(redirects.get(), 1);
        assert!(flags.stopped());
        // The snapshot on screen is left as it was
        assert!(state.stats.get_untracked().is_some());
        assert_eq!(state.transactions.get_untracked().len(), 1);
        assert_eq!(state.error.get_untracked(), None);

        runtime.dispose();
    }

    #[test]
    fn test_cycle_without_token_stops_and_redirects() {
        let runtime = create_runtime();

        let state = DashboardState::new();
        let session = Session::in_memory();
        let flags = PollFlags::default();
        let redirected = Rc::new(Cell::new(false));

        let redirected_flag = Rc::clone(&redirected);
        futures::executor::block_on(run_cycle(&state, &session, &flags, &move || {
            redirected_flag.set(true);
        }));

        assert!(redirected.get());
        assert!(flags.stopped());
        // Nothing was fetched, nothing was applied
        assert!(state.loading.get_untracked());
        assert!(state.stats.get_untracked().is_none());

        runtime.dispose();
    }
}
