//! Helpers for tests that touch process-wide environment variables
//! (`HOME`, `XDG_CONFIG_HOME`, `EDITOR`).

use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that read or write environment variables. A test that
/// panicked while holding the lock does not poison it for the rest.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Overrides one variable and puts the previous raw value back on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
        let guard = Self::capture(key);
        env::set_var(key, value);
        guard
    }

    pub fn unset(key: &'static str) -> Self {
        let guard = Self::capture(key);
        env::remove_var(key);
        guard
    }

    fn capture(key: &'static str) -> Self {
        Self {
            key,
            previous: env::var_os(key),
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{env_lock, EnvVarGuard};
    use std::env;

    const KEY: &str = "CHAT_EDITOR_TEST_UTILS_VAR";

    #[test]
    fn nested_guards_restore_in_reverse_order() {
        let _lock = env_lock();
        let _outer = EnvVarGuard::set(KEY, "outer");
        {
            let _inner = EnvVarGuard::unset(KEY);
            assert!(env::var_os(KEY).is_none());
            {
                let _innermost = EnvVarGuard::set(KEY, "innermost");
                assert_eq!(env::var(KEY).as_deref(), Ok("innermost"));
            }
            assert!(env::var_os(KEY).is_none());
        }
        assert_eq!(env::var(KEY).as_deref(), Ok("outer"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_value_survives_restore() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _lock = env_lock();
        let raw = OsStr::from_bytes(b"caf\xe9");
        let _outer = EnvVarGuard::set(KEY, raw);
        {
            let _inner = EnvVarGuard::set(KEY, "plain");
        }
        assert_eq!(env::var_os(KEY).as_deref(), Some(raw));
    }
}
