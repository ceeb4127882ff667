//! Benchmarks for action pool throughput
//!
//! Measures the pool's three operations with different account spreads:
//! - insert: admission plus per-account buffering
//! - pick_acts: cross-account snapshot assembly
//! - reset: commit cleanup including queue garbage collection
//!
//! Signing happens in setup so the numbers isolate pool work from crypto.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use slog::Logger;

use actpool::crypto::ActSecretKey;
use actpool::state::action::{Action, Transfer};
use actpool::validation::Validator;
use actpool::{ActionPool, Address};

fn quiet_logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}

/// Generate a keypair and return (secret_key, address)
fn gen_keypair() -> (ActSecretKey, Address) {
    let sk = ActSecretKey::generate(&mut rand::rngs::OsRng);
    let addr = Address::from_public_key(&sk.public_key());
    (sk, addr)
}

/// Creates signed transfers spread across the given number of accounts.
fn create_signed_actions(accounts: usize, per_account: u64) -> Vec<Action> {
    let mut actions = Vec::with_capacity(accounts * per_account as usize);
    for _ in 0..accounts {
        let (sk, sender) = gen_keypair();
        let (_, recipient) = gen_keypair();
        for nonce in 1..=per_account {
            actions.push(Action::from(
                Transfer::new(sender, recipient, 1, nonce).sign(&sk),
            ));
        }
    }
    actions
}

/// Creates a pool preloaded with the given actions.
fn preloaded_pool(actions: &[Action]) -> ActionPool {
    let pool = ActionPool::new(Validator::new(), quiet_logger());
    for action in actions {
        pool.insert(action.clone()).unwrap();
    }
    pool
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_insert");
    for accounts in [1usize, 16, 64] {
        let actions = create_signed_actions(accounts, 64);
        group.bench_with_input(
            BenchmarkId::from_parameter(accounts),
            &actions,
            |b, actions| {
                b.iter_batched(
                    || ActionPool::new(Validator::new(), quiet_logger()),
                    |pool| {
                        for action in actions {
                            pool.insert(black_box(action.clone())).unwrap();
                        }
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_pick_acts(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_pick_acts");
    for accounts in [1usize, 16, 64] {
        let pool = preloaded_pool(&create_signed_actions(accounts, 64));
        group.bench_function(BenchmarkId::from_parameter(accounts), |b| {
            b.iter(|| black_box(pool.pick_acts()));
        });
    }
    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_reset");
    for accounts in [1usize, 16, 64] {
        let actions = create_signed_actions(accounts, 64);
        group.bench_with_input(
            BenchmarkId::from_parameter(accounts),
            &actions,
            |b, actions| {
                b.iter_batched(
                    || preloaded_pool(actions),
                    |pool| pool.reset(black_box(actions)),
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_pick_acts, bench_reset);
criterion_main!(benches);
