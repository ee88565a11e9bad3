pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use crate::dispatcher::Termination;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

pub trait PlatformOps: Sync + Send {
    /// Tool name encoded in the path the process was started under.
    fn tool_name(&self, arg0: &Path) -> Option<String>;
    /// Files that would provide `tool` inside `dir`, in lookup order.
    fn executable_candidates(&self, dir: &Path, tool: &str) -> Vec<PathBuf>;
    fn is_executable(&self, path: &Path) -> bool;
    fn termination(&self, status: ExitStatus) -> Termination;
    /// Install the relay before the child exists; signals are held until
    /// [`PlatformOps::attach_child`] and relayed until [`PlatformOps::end_forwarding`].
    fn begin_forwarding(&self);
    fn attach_child(&self, child_pid: u32);
    fn end_forwarding(&self);
    /// Leave the process the same way the child did.
    fn exit_like(&self, termination: Termination) -> !;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
