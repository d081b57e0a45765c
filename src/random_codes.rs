use crate::{
    error::{PromoError, PromoResult},
    words::WordPool,
};
use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info};

pub const WORDS_PER_CODE: usize = 3;
pub const SEPARATOR: char = '-';

// Draws allowed per requested code before the sampler is considered broken.
const MAX_DRAWS_PER_CODE: u64 = 10_000;
const MIN_DRAW_BUDGET: u64 = 100_000;

/// Number of distinct codes a pool of `pool_size` words can produce.
///
/// Draws are independent and with replacement, so this is `pool_size^3`.
pub fn capacity(pool_size: usize) -> u128 {
    let size = pool_size as u128;
    size.saturating_mul(size).saturating_mul(size)
}

/// Rng for one generation call: fixed when `seed` is given, otherwise seeded from the clock.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed =
        seed.unwrap_or_else(|| Utc::now().timestamp_nanos_opt().unwrap_or_default().unsigned_abs());

    debug!("seeding code rng with {seed}");
    StdRng::seed_from_u64(seed)
}

fn draw_code<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> String {
    let mut code = String::new();

    for i in 0..WORDS_PER_CODE {
        if i > 0 {
            code.push(SEPARATOR);
        }
        code.push_str(&words[rng.random_range(0..words.len())]);
    }

    code
}

/// Produces `count` distinct codes in generation order.
///
/// Rejection sampling: a candidate that was already produced is thrown away and redrawn.
/// Termination is probabilistic. The capacity check guarantees a solution exists, but the
/// expected number of draws climbs steeply as `count` approaches `pool_size^3`.
/// A draw budget turns a stuck random source into [`PromoError::SamplingStalled`].
pub fn generate_codes<R: Rng + ?Sized>(
    pool: &WordPool,
    count: usize,
    rng: &mut R,
) -> PromoResult<Vec<String>> {
    let words = pool.words();
    if words.len() < WORDS_PER_CODE {
        return Err(PromoError::InsufficientPool { size: words.len() });
    }

    let capacity = capacity(words.len());
    if count as u128 > capacity {
        return Err(PromoError::RequestExceedsCapacity { requested: count, capacity });
    }

    let budget = (count as u64).saturating_mul(MAX_DRAWS_PER_CODE).max(MIN_DRAW_BUDGET);

    let mut codes = Vec::<String>::new();
    codes
        .try_reserve_exact(count)
        .map_err(|source| PromoError::OutOfMemory { requested: count, source })?;

    let mut seen = HashSet::<String>::new();
    seen.try_reserve(count)
        .map_err(|source| PromoError::OutOfMemory { requested: count, source })?;

    let mut attempts = 0_u64;

    while codes.len() < count {
        if attempts >= budget {
            return Err(PromoError::SamplingStalled {
                attempts,
                produced: codes.len(),
                requested: count,
            });
        }
        attempts += 1;

        let code = draw_code(words, rng);
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }

    info!(
        "generated {count} codes from {} words (capacity {capacity}) in {attempts} draws",
        words.len()
    );
    if attempts > count as u64 {
        debug!("rejected {} duplicate candidates", attempts - count as u64);
    }

    Ok(codes)
}
