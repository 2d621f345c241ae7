use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Shared limiter for geocoding calls. Public geocoders throttle aggressively,
/// so every search waits on this before hitting the network.
pub fn geocode_limiter(per_minute: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)))
}
