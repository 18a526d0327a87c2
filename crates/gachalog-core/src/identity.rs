// Task identity: the correlation token that ties progress queries to the
// in-flight analysis request on a shared backend.
//
// Two generators exist. `SecureIdentity` draws a v4 UUID from the OS random
// source. `FallbackIdentity` combines the wall clock with a clock-seeded PRNG
// suffix; collisions there only cause progress-label cross-talk, since the
// analysis result comes back on the request's own connection.

use std::fmt;
use std::sync::Mutex;

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

const FALLBACK_SUFFIX_LEN: usize = 9;

/// Opaque per-session correlation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Rehydrate a task id from a string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of task identifiers.
pub trait IdentityGenerator: Send + Sync {
    fn generate(&self) -> TaskId;

    /// Short name for logs.
    fn kind(&self) -> &'static str;
}

/// Random v4 UUIDs from the OS random source.
#[derive(Debug, Default)]
pub struct SecureIdentity;

impl IdentityGenerator for SecureIdentity {
    fn generate(&self) -> TaskId {
        TaskId(Uuid::new_v4().to_string())
    }

    fn kind(&self) -> &'static str {
        "uuid-v4"
    }
}

/// `task_{unix_millis}_{base36 suffix}` for hosts without a usable OS RNG.
pub struct FallbackIdentity {
    rng: Mutex<SmallRng>,
}

impl FallbackIdentity {
    pub fn new() -> Self {
        let seed = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64;
        Self::with_seed(seed)
    }

    /// Deterministic suffixes, for tests.
    pub fn with_seed(seed: u64) -> Self {
        FallbackIdentity {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    fn suffix(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (0..FALLBACK_SUFFIX_LEN)
            .filter_map(|_| char::from_digit(rng.random_range(0..36u32), 36))
            .collect()
    }
}

impl Default for FallbackIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityGenerator for FallbackIdentity {
    fn generate(&self) -> TaskId {
        let millis = chrono::Utc::now().timestamp_millis();
        TaskId(format!("task_{millis}_{}", self.suffix()))
    }

    fn kind(&self) -> &'static str {
        "timestamp-fallback"
    }
}

/// Whether the OS random source can be read on this host.
pub fn os_random_available() -> bool {
    let mut sample = [0u8; 16];
    OsRng.try_fill_bytes(&mut sample).is_ok()
}

/// Pick the best generator available on this host.
pub fn select_generator() -> Box<dyn IdentityGenerator> {
    select_generator_with(os_random_available())
}

pub(crate) fn select_generator_with(secure_available: bool) -> Box<dyn IdentityGenerator> {
    let generator: Box<dyn IdentityGenerator> = if secure_available {
        Box::new(SecureIdentity)
    } else {
        warn!("OS random source unavailable, using timestamp-based task ids");
        Box::new(FallbackIdentity::new())
    };
    info!("Task identity generator: {}", generator.kind());
    generator
}
