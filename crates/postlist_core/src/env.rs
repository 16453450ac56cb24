//! Process-global environment mutation helpers shared by config and CLI tests.

use std::sync::{Mutex, OnceLock};

/// Return the lock used to serialize environment mutations across test threads.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

// Newer toolchains mark env mutation `unsafe`; callers hold `env_lock`.
#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: mutation is serialized through `env_lock` by every caller.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Overrides one environment variable and restores the previous value on drop.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    fn swap(key: &str, value: Option<&str>) -> Self {
        let previous = std::env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    /// Set `key=value` for the lifetime of the guard.
    pub fn set(key: &str, value: &str) -> Self {
        Self::swap(key, Some(value))
    }

    /// Unset `key` for the lifetime of the guard.
    pub fn remove(key: &str) -> Self {
        Self::swap(key, None)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.previous.as_deref());
    }
}
