//! Scoped environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that sets or clears environment variables until dropped.
///
/// Guards serialize on a global lock, so tests that read the environment
/// through the guard never observe each other's overrides.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`; `None` removes the variable.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let old = env::var_os(key);
                apply(key, value.as_ref());
                (key.clone(), old)
            })
            .collect();

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            apply(&key, value.as_ref());
        }
    }
}

fn apply(key: &OsString, value: Option<&OsString>) {
    unsafe {
        // SAFETY: the global mutex serializes environment mutations in tests.
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}
