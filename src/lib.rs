pub mod error;
pub mod highlight;
pub mod logging;
pub mod shell;

pub mod core;
pub mod input;
pub mod path;
pub mod process;

#[cfg(test)]
pub(crate) mod test_support {
    use std::env;
    use std::ffi::OsString;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    static CWD_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that move the process cwd or rewrite `HOME`/`USER`,
    /// and puts all of them back when dropped.
    pub(crate) struct CwdGuard {
        _lock: MutexGuard<'static, ()>,
        cwd: PathBuf,
        home: Option<OsString>,
        user: Option<OsString>,
    }

    pub(crate) fn cwd_lock() -> CwdGuard {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        CwdGuard {
            _lock: lock,
            cwd,
            home: env::var_os("HOME"),
            user: env::var_os("USER"),
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.cwd);
            for (key, value) in [("HOME", &self.home), ("USER", &self.user)] {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
