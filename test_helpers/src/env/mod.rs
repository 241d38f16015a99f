//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped. Guards for the same key
//! stack and restore in LIFO order.
//!
//! Flags read their environment binding at parse time, so a test that sets
//! `APP_PORT` and then parses must keep other tests from touching the same
//! variables in between. [`EnvScope`] holds the lock for its whole lifetime
//! and collects the guards it creates.
//!
//! # Examples
//!
//! ```
//! use clive_test_helpers::env;
//!
//! let scope = env::EnvScope::new()
//!     .set("DEMO_PORT", "9000")
//!     .remove("DEMO_VERBOSE");
//! assert_eq!(std::env::var("DEMO_PORT").as_deref(), Ok("9000"));
//! drop(scope);
//! assert!(std::env::var("DEMO_PORT").is_err());
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies `mutate` to `key` under the lock and records the prior value.
fn guarded<K, F>(key: K, mutate: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key = key.into();
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutate(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: environment writes are serialised by `ENV_MUTEX`.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: environment writes are serialised by `ENV_MUTEX`.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use clive_test_helpers::env;
/// let _g = env::set_var("DEMO_HOST", "localhost");
/// assert_eq!(std::env::var("DEMO_HOST").as_deref(), Ok("localhost"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `guarded` holds `ENV_MUTEX` while the closure runs.
    guarded(key, |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior
/// value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `guarded` holds `ENV_MUTEX` while the closure runs.
    guarded(key, |k| unsafe { env::remove_var(k) })
}

/// Runs `f` while holding the global environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_MUTEX.lock();
    f()
}

/// Holds the environment lock and the guards created through it.
///
/// Guards are restored in reverse order of creation before the lock is
/// released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Takes the environment lock with no variables changed yet.
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            _lock: ENV_MUTEX.lock(),
        }
    }

    /// Sets `key` to `value` for the lifetime of the scope.
    pub fn set<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        self.guards.push(set_var(key, value));
        self
    }

    /// Removes `key` for the lifetime of the scope.
    pub fn remove<K>(mut self, key: K) -> Self
    where
        K: Into<String>,
    {
        self.guards.push(remove_var(key));
        self
    }

    /// Removes every variable whose name starts with `prefix`.
    ///
    /// Use this to make sure nothing inherited from the outer environment
    /// feeds a flag bound under `prefix`.
    pub fn clear_prefixed(mut self, prefix: &str) -> Self {
        let keys: Vec<String> = env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| key.starts_with(prefix))
            .collect();
        for key in keys {
            self.guards.push(remove_var(key));
        }
        self
    }

    /// Names of the variables this scope has touched, in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.guards.iter().map(EnvVarGuard::key).collect()
    }
}

impl Default for EnvScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
