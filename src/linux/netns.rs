//! Running netlink requests inside another network namespace.
//!
//! `setns(2)` only affects the calling thread, so [`NetNs::run`] does the work
//! on a short-lived thread and the caller's namespace never changes.

use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use std::thread;

/// An open handle to a network namespace file such as `/var/run/netns/foo`
/// or `/proc/<pid>/ns/net`.
#[derive(Debug)]
pub struct NetNs {
    path: PathBuf,
    file: File,
}

impl NetNs {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("cannot open namespace '{}': {}", path.display(), err),
            )
        })?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` on a thread that has joined this namespace.
    ///
    /// Sockets opened inside `f` belong to the namespace for their whole
    /// lifetime, even though the thread exits when `f` returns.
    pub fn run<F, T>(&self, f: F) -> io::Result<T>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        let fd = self.file.as_raw_fd();

        thread::scope(|scope| {
            let handle = scope.spawn(move || -> io::Result<T> {
                // SAFETY: `fd` refers to the namespace file held open by
                // `self`, which outlives this scoped thread.
                let ret = unsafe { libc::setns(fd, libc::CLONE_NEWNET) };
                if ret < 0 {
                    return Err(io::Error::last_os_error());
                }

                Ok(f())
            });

            match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        })
    }
}

impl AsRawFd for NetNs {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
