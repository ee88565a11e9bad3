//! Runs the resolved tool and hands its outcome back to whoever started us.
//!
//! Not every host can replace the current process image, so the child is
//! spawned, awaited, and its termination reproduced on this process. The
//! child shares our environment and standard streams untouched.

use crate::error::{LunikError, Result};
use crate::platform::{platform, PlatformOps};
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Exit code used when Lunik itself fails before or while launching the tool.
pub const EXIT_INTERNAL_FAILURE: i32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

struct Forwarding<'a>(&'a dyn PlatformOps);

impl<'a> Forwarding<'a> {
    fn start(platform: &'a dyn PlatformOps) -> Self {
        platform.begin_forwarding();
        Forwarding(platform)
    }

    fn attach(&self, child_pid: u32) {
        self.0.attach_child(child_pid);
    }
}

impl Drop for Forwarding<'_> {
    fn drop(&mut self) {
        self.0.end_forwarding();
    }
}

/// Spawn `path` and block until it terminates. No timeout is applied.
pub fn run(tool: &str, path: &Path, args: &[OsString]) -> Result<Termination> {
    let platform = platform();
    let spawn_error = |source| LunikError::Spawn {
        tool: tool.to_string(),
        path: path.to_path_buf(),
        source,
    };

    // Relay is armed before the spawn so no signal can slip past it.
    let status = {
        let forwarding = Forwarding::start(platform);
        let mut child = Command::new(path).args(args).spawn().map_err(spawn_error)?;
        tracing::debug!(pid = child.id(), path = %path.display(), "spawned tool");
        forwarding.attach(child.id());
        child.wait().map_err(spawn_error)?
    };
    let termination = platform.termination(status);
    tracing::debug!(?termination, "tool finished");
    Ok(termination)
}

/// Run the tool and exit exactly as it did. Only returns on spawn failure.
pub fn dispatch(tool: &str, path: &Path, args: &[OsString]) -> Result<Infallible> {
    let termination = run(tool, path, args)?;
    platform().exit_like(termination)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[test]
    fn exit_code_is_reported() {
        let t = run("sh", Path::new("/bin/sh"), &sh("exit 3")).unwrap();
        assert_eq!(t, Termination::Exited(3));

        let t = run("sh", Path::new("/bin/sh"), &sh("exit 0")).unwrap();
        assert_eq!(t, Termination::Exited(0));
    }

    #[test]
    fn signal_death_is_reported() {
        let t = run("sh", Path::new("/bin/sh"), &sh("kill -TERM $$")).unwrap();
        assert_eq!(t, Termination::Signaled(nix::libc::SIGTERM));
    }

    #[test]
    fn arguments_reach_the_child_in_order() {
        let args = sh(r#"test "$1" = "+not-a-selector" && test "$2" = "b c""#)
            .into_iter()
            .chain(["sh".into(), "+not-a-selector".into(), "b c".into()])
            .collect::<Vec<OsString>>();
        let t = run("sh", Path::new("/bin/sh"), &args).unwrap();
        assert_eq!(t, Termination::Exited(0));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moon");
        match run("moon", &path, &[]) {
            Err(LunikError::Spawn { tool, path: p, .. }) => {
                assert_eq!(tool, "moon");
                assert_eq!(p, path);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
