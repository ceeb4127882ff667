//! ActPool service - thread management.
//!
//! Spawns a dedicated OS thread that drives the pool on behalf of its
//! collaborators, so neither the network layer nor the consensus engine
//! ever blocks on pool work. Communication uses lock-free rtrb channels.
//!
//! ## Architecture
//!
//!
//! Network ──[act_channel]──► ActPool ◄──[pick_req_channel]── Consensus
//!                               │
//!                               ├──[pick_resp_channel]──► Consensus
//!                               │
//!                               ◄──[committed_channel]─── Consensus
//!
//! ## Responsibilities
//!
//! 1. Action Ingestion: receive gossiped actions from the network layer
//! 2. Admission: run the pool's validation and buffering on each action
//! 3. Pick Serving: answer proposer requests with pending-action snapshots
//! 4. Commit Cleanup: remove actions included in committed blocks

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};

use rtrb::{Consumer, Producer, RingBuffer};
use slog::Logger;

use super::pool::ActionPool;
use super::types::{CommittedNotification, PickRequest, PickResponse};
use crate::state::action::Action;

/// Default ring buffer size for channels.
const RING_BUFFER_SIZE: usize = 256;

/// Ring buffer size for the action channel (larger due to higher volume).
const ACT_RING_BUFFER_SIZE: usize = 1024;

/// Number of actions to process per loop iteration (quota).
const ACT_PROCESS_QUOTA: usize = 64;

/// ActPool service running on a dedicated OS thread.
///
/// The service:
/// - Receives actions from the network layer via act_producer
/// - Feeds them through the pool's validation and buffering
/// - Serves pick requests from the block proposer
/// - Removes committed actions on notification
pub struct ActPoolService {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

/// Channel endpoints for communicating with the actpool service.
pub struct ActPoolChannels {
    /// Producer for submitting actions (Network → ActPool)
    pub act_producer: Producer<Action>,
    /// Producer for requesting pick snapshots (Consensus → ActPool)
    pub pick_req_producer: Producer<PickRequest>,
    /// Consumer for receiving pick snapshots (ActPool → Consensus)
    pub pick_resp_consumer: Consumer<PickResponse>,
    /// Producer for notifying about committed blocks (Consensus → ActPool)
    pub committed_producer: Producer<CommittedNotification>,
}

impl ActPoolService {
    /// Spawns the actpool service on a new OS thread.
    ///
    /// # Arguments
    ///
    /// * pool - The shared action pool driven by this service
    /// * shutdown - Shared shutdown signal
    /// * logger - Logger for diagnostics
    ///
    /// # Returns
    ///
    /// A tuple containing the service handle and channel endpoints.
    pub fn spawn(
        pool: Arc<ActionPool>,
        shutdown: Arc<AtomicBool>,
        logger: Logger,
    ) -> (Self, ActPoolChannels) {
        let (act_producer, act_consumer) = RingBuffer::<Action>::new(ACT_RING_BUFFER_SIZE);
        let (pick_req_producer, pick_req_consumer) =
            RingBuffer::<PickRequest>::new(RING_BUFFER_SIZE);
        let (pick_resp_producer, pick_resp_consumer) =
            RingBuffer::<PickResponse>::new(RING_BUFFER_SIZE);
        let (committed_producer, committed_consumer) =
            RingBuffer::<CommittedNotification>::new(RING_BUFFER_SIZE);

        let shutdown_clone = Arc::clone(&shutdown);
        let logger_clone = logger.clone();
        let handle = thread::Builder::new()
            .name("actpool".into())
            .spawn(move || {
                actpool_loop(
                    pool,
                    act_consumer,
                    pick_req_consumer,
                    pick_resp_producer,
                    committed_consumer,
                    shutdown_clone,
                    logger_clone,
                );
            })
            .expect("Failed to spawn actpool thread");

        let channels = ActPoolChannels {
            act_producer,
            pick_req_producer,
            pick_resp_consumer,
            committed_producer,
        };
        (
            Self {
                handle: Some(handle),
                shutdown,
            },
            channels,
        )
    }

    /// Signals shutdown and waits for the thread to terminate.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Returns true if the service is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ActPoolService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main actpool event loop.
fn actpool_loop(
    pool: Arc<ActionPool>,
    mut act_consumer: Consumer<Action>,
    mut pick_req_consumer: Consumer<PickRequest>,
    mut pick_resp_producer: Producer<PickResponse>,
    mut committed_consumer: Consumer<CommittedNotification>,
    shutdown: Arc<AtomicBool>,
    logger: Logger,
) {
    let mut idle_count = 0_u32;
    let mut stats_interval = std::time::Instant::now();

    // Statistics
    let mut stats_picks_served = 0u64;

    slog::info!(logger, "ActPool service started");

    while !shutdown.load(Ordering::Acquire) {
        let mut did_work = false;

        // Priority 1: Serve pick requests (time-critical for consensus)
        while let Ok(req) = pick_req_consumer.pop() {
            did_work = true;

            let (transfers, votes) = pool.pick_acts();
            let transfer_count = transfers.len();
            let vote_count = votes.len();
            let response = PickResponse {
                height: req.height,
                transfers,
                votes,
            };

            // Push with backpressure handling
            push_with_backpressure(&mut pick_resp_producer, response, &shutdown);
            stats_picks_served += 1;

            slog::debug!(
            logger,
            "Served pick request";
            "height" => req.height,
            "transfers" => transfer_count,
            "votes" => vote_count,
            );
        }

        // Priority 2: Process incoming actions (quota-limited)
        for _ in 0..ACT_PROCESS_QUOTA {
            match act_consumer.pop() {
                // Rejections are final: the pool already logged the reason,
                // and the action is dropped rather than retried.
                Ok(action) => {
                    did_work = true;
                    let _ = pool.insert(action);
                }
                Err(_) => break,
            }
        }

        // Priority 3: Handle committed-block notifications
        while let Ok(notif) = committed_consumer.pop() {
            did_work = true;
            let committed_count = notif.actions.len();
            pool.reset(&notif.actions);
            slog::debug!(
            logger,
            "Reset pool after committed block";
            "height" => notif.height,
            "committed_count" => committed_count,
            "pending" => pool.pending_count(),
            );
        }

        // Periodic stats logging
        if stats_interval.elapsed() >= std::time::Duration::from_secs(30) {
            let pool_stats = pool.stats();
            slog::info!(
            logger,
            "ActPool stats";
            "pending" => pool_stats.pending_actions,
            "accounts" => pool_stats.accounts,
            "total_accepted" => pool_stats.total_accepted,
            "total_rejected" => pool_stats.total_rejected,
            "total_committed" => pool_stats.total_committed,
            "picks_served" => stats_picks_served,
            );
            stats_interval = std::time::Instant::now();
        }

        // Progressive backoff when idle
        if did_work {
            idle_count = 0;
        } else {
            idle_count = idle_count.saturating_add(1);
            if idle_count < 10 {
                std::hint::spin_loop();
            } else if idle_count < 100 {
                std::thread::yield_now();
            } else {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }
    }

    let pool_stats = pool.stats();

    slog::info!(
        logger,
        "ActPool service shutting down";
        "pending" => pool_stats.pending_actions,
        "total_accepted" => pool_stats.total_accepted,
        "total_rejected" => pool_stats.total_rejected,
        "picks_served" => stats_picks_served,
    );
}

/// Push a response with backpressure handling.
fn push_with_backpressure(
    producer: &mut Producer<PickResponse>,
    response: PickResponse,
    shutdown: &Arc<AtomicBool>,
) {
    let mut resp = response;
    loop {
        match producer.push(resp) {
            Ok(()) => break,
            Err(rtrb::PushError::Full(returned)) => {
                if shutdown.load(Ordering::Acquire) {
                    return;
                }
                std::thread::yield_now();
                resp = returned;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::action_crypto::ActSecretKey;
    use crate::state::action::Transfer;
    use crate::state::address::Address;
    use crate::validation::Validator;
    use std::time::Duration;

    fn quiet_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn spawn_service() -> (Arc<ActionPool>, ActPoolService, ActPoolChannels) {
        let pool = Arc::new(ActionPool::new(Validator::new(), quiet_logger()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let (service, channels) =
            ActPoolService::spawn(Arc::clone(&pool), shutdown, quiet_logger());
        (pool, service, channels)
    }

    fn signed_transfer(sk: &ActSecretKey, nonce: u64) -> Action {
        let sender = Address::from_public_key(&sk.public_key());
        let recipient = Address::from_bytes([0xAA; 32]);
        Action::from(Transfer::new(sender, recipient, 100, nonce).sign(sk))
    }

    #[test]
    fn service_starts_and_stops() {
        let (_pool, mut service, _channels) = spawn_service();

        assert!(service.is_running());

        service.shutdown();

        assert!(service.handle.is_none());
    }

    #[test]
    fn submitted_actions_show_up_in_picks() {
        let (_pool, mut service, mut channels) = spawn_service();
        let sk = ActSecretKey::generate(&mut rand::rngs::OsRng);

        for nonce in 1..=5 {
            channels.act_producer.push(signed_transfer(&sk, nonce)).unwrap();
        }

        // Wait for processing
        std::thread::sleep(Duration::from_millis(100));

        channels
            .pick_req_producer
            .push(PickRequest { height: 1 })
            .unwrap();

        std::thread::sleep(Duration::from_millis(100));

        let resp = channels.pick_resp_consumer.pop().unwrap();
        assert_eq!(resp.height, 1);
        assert_eq!(resp.transfers.len(), 5);
        assert!(resp.votes.is_empty());

        service.shutdown();
    }

    #[test]
    fn rejected_actions_are_dropped_silently() {
        let (pool, mut service, mut channels) = spawn_service();
        let sk = ActSecretKey::generate(&mut rand::rngs::OsRng);
        let sender = Address::from_public_key(&sk.public_key());
        let recipient = Address::from_bytes([0xAA; 32]);

        // Unsigned transfer: the service must swallow the rejection.
        channels
            .act_producer
            .push(Action::from(Transfer::new(sender, recipient, 1, 1)))
            .unwrap();

        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(pool.pending_count(), 0);
        assert_eq!(pool.stats().total_rejected, 1);

        service.shutdown();
    }

    #[test]
    fn committed_notification_drains_the_pool() {
        let (pool, mut service, mut channels) = spawn_service();
        let sk = ActSecretKey::generate(&mut rand::rngs::OsRng);

        let acts: Vec<Action> = (1..=3).map(|n| signed_transfer(&sk, n)).collect();
        for act in &acts {
            channels.act_producer.push(act.clone()).unwrap();
        }

        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(pool.pending_count(), 3);

        channels
            .committed_producer
            .push(CommittedNotification {
                height: 1,
                actions: acts,
            })
            .unwrap();

        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(pool.pending_count(), 0);
        assert_eq!(pool.account_count(), 0);

        service.shutdown();
    }
}
