//! Random sources for reproducible injection.
//!
//! The injectors take an explicit `&mut impl Rng`; [`seeded_rng`] builds the
//! conventional one. Callers that prefer a shared, implicitly-threaded source
//! can use the per-thread generator in this module together with
//! [`SeedScope`], which reseeds it for a bounded block and restores the
//! previous state on every exit path.
//!
//! ```
//! use graph_anomaly_core::rng::{with_seed, with_shared_rng};
//! use rand::Rng;
//!
//! let a: u64 = with_seed(7, || with_shared_rng(|rng| rng.gen()));
//! let b: u64 = with_seed(7, || with_shared_rng(|rng| rng.gen()));
//! assert_eq!(a, b);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

thread_local! {
    static SHARED_RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::from_entropy());
    // State a guard could not write back because the generator was lent out
    static PENDING_RESTORE: RefCell<Option<ChaCha8Rng>> = const { RefCell::new(None) };
}

/// Deterministic generator for `seed`.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Lend the calling thread's shared generator to `f`.
///
/// A [`SeedScope`] dropped inside `f` restores its saved state as soon as
/// `f` returns or unwinds.
///
/// # Panics
///
/// Panics if `f` re-enters the shared generator (calls `with_shared_rng` or
/// `SeedScope::enter` while the generator is lent out).
pub fn with_shared_rng<T>(f: impl FnOnce(&mut ChaCha8Rng) -> T) -> T {
    let _lend = LendGuard;
    SHARED_RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Applies a deferred restore once the lent generator is returned.
struct LendGuard;

impl Drop for LendGuard {
    fn drop(&mut self) {
        let pending = PENDING_RESTORE
            .try_with(|slot| slot.borrow_mut().take())
            .ok()
            .flatten();
        if let Some(saved) = pending {
            restore(saved);
        }
    }
}

/// Write `saved` back into the shared generator, deferring while it is lent.
fn restore(saved: ChaCha8Rng) {
    let deferred = SHARED_RNG.try_with(|cell| match cell.try_borrow_mut() {
        Ok(mut rng) => {
            *rng = saved;
            None
        }
        Err(_) => Some(saved),
    });
    // Err: the thread-local is already gone at thread exit
    if let Ok(Some(saved)) = deferred {
        tracing::debug!("shared generator is lent out, deferring seeded scope restore");
        let _ = PENDING_RESTORE.try_with(|slot| *slot.borrow_mut() = Some(saved));
    }
}

/// Snapshot of the calling thread's shared generator.
pub fn shared_state() -> ChaCha8Rng {
    SHARED_RNG.with(|cell| cell.borrow().clone())
}

/// Guard that reseeds the shared generator and restores it on drop.
///
/// The saved state is restored when the guard goes out of scope, including
/// early returns, `?` propagation and unwinding panics. A guard dropped
/// inside [`with_shared_rng`] restores once the generator is handed back.
/// Guards nest: the innermost restores first. The guard is `!Send` because the state it
/// restores belongs to the thread that created it.
#[must_use = "the previous state is restored as soon as the guard is dropped"]
pub struct SeedScope {
    saved: Option<ChaCha8Rng>,
    _not_send: PhantomData<*const ()>,
}

impl SeedScope {
    /// Save the current shared state and reseed with `seed`.
    pub fn enter(seed: u64) -> Self {
        let saved = SHARED_RNG.with(|cell| cell.replace(seeded_rng(seed)));
        tracing::trace!(seed, "entered seeded scope");
        Self {
            saved: Some(saved),
            _not_send: PhantomData,
        }
    }
}

impl Drop for SeedScope {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            restore(saved);
        }
    }
}

/// Run `f` with the shared generator seeded to `seed`, then restore it.
pub fn with_seed<T>(seed: u64, f: impl FnOnce() -> T) -> T {
    let _scope = SeedScope::enter(seed);
    f()
}
