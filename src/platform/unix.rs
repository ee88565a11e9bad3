use crate::dispatcher::Termination;
use crate::platform::PlatformOps;
use nix::libc;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

const FORWARDED: [Signal; 7] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTERM,
    Signal::SIGHUP,
    Signal::SIGUSR1,
    Signal::SIGUSR2,
    Signal::SIGWINCH,
];

fn forwarded_set() -> SigSet {
    let mut set = SigSet::empty();
    for sig in FORWARDED {
        set.add(sig);
    }
    set
}

static CHILD_PID: AtomicI32 = AtomicI32::new(0);
static PREVIOUS: Mutex<Vec<(Signal, SigAction)>> = Mutex::new(Vec::new());

extern "C" fn relay(sig: libc::c_int, info: *mut libc::siginfo_t, _ctx: *mut libc::c_void) {
    let pid = CHILD_PID.load(Ordering::SeqCst);
    if pid <= 0 || info.is_null() {
        return;
    }
    // si_code > 0 means the kernel raised it (tty, job control); the child's
    // process group already got its own copy.
    let si_code = unsafe { (*info).si_code };
    if si_code > 0 {
        return;
    }
    if let Ok(signal) = Signal::try_from(sig) {
        let _ = signal::kill(Pid::from_raw(pid), signal);
    }
}

impl PlatformOps for Unix {
    fn tool_name(&self, arg0: &Path) -> Option<String> {
        arg0.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
    }

    fn executable_candidates(&self, dir: &Path, tool: &str) -> Vec<PathBuf> {
        vec![dir.join(tool)]
    }

    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(path) {
            Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    fn termination(&self, status: ExitStatus) -> Termination {
        match (status.code(), status.signal()) {
            (Some(code), _) => Termination::Exited(code),
            (None, Some(sig)) => Termination::Signaled(sig),
            (None, None) => Termination::Exited(crate::dispatcher::EXIT_INTERNAL_FAILURE),
        }
    }

    fn begin_forwarding(&self) {
        let blocked = forwarded_set();
        if let Err(e) = blocked.thread_block() {
            tracing::warn!("cannot hold signals while spawning: {e}");
        }
        let action = SigAction::new(
            SigHandler::SigAction(relay),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        let mut previous = PREVIOUS.lock().unwrap_or_else(|e| e.into_inner());
        for sig in FORWARDED {
            match unsafe { signal::sigaction(sig, &action) } {
                Ok(old) => previous.push((sig, old)),
                Err(e) => tracing::warn!("cannot relay {sig} to child: {e}"),
            }
        }
    }

    fn attach_child(&self, child_pid: u32) {
        if let Ok(pid) = i32::try_from(child_pid) {
            CHILD_PID.store(pid, Ordering::SeqCst);
        }
        // Anything that arrived during spawn is delivered to `relay` here.
        let _ = forwarded_set().thread_unblock();
    }

    fn end_forwarding(&self) {
        let mut previous = PREVIOUS.lock().unwrap_or_else(|e| e.into_inner());
        for (sig, old) in previous.drain(..) {
            let _ = unsafe { signal::sigaction(sig, &old) };
        }
        CHILD_PID.store(0, Ordering::SeqCst);
        let _ = forwarded_set().thread_unblock();
    }

    fn exit_like(&self, termination: Termination) -> ! {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        match termination {
            Termination::Exited(code) => std::process::exit(code),
            Termination::Signaled(sig) => {
                if let Ok(signal) = Signal::try_from(sig) {
                    unsafe {
                        let _ = signal::signal(signal, SigHandler::SigDfl);
                    }
                    let mut set = SigSet::empty();
                    set.add(signal);
                    let _ = set.thread_unblock();
                    let _ = signal::raise(signal);
                }
                // Still alive: the signal's default action does not terminate.
                std::process::exit(128 + sig)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn tool_name_keeps_extension() {
        let p = &UNIX_PLATFORM;
        assert_eq!(
            p.tool_name(Path::new("/usr/local/bin/moonc")).as_deref(),
            Some("moonc")
        );
        assert_eq!(p.tool_name(Path::new("moon.js")).as_deref(), Some("moon.js"));
        assert_eq!(p.tool_name(Path::new("/")), None);
    }

    #[test]
    fn executable_bit_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("moon");
        std::fs::write(&file, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!UNIX_PLATFORM.is_executable(&file));

        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(UNIX_PLATFORM.is_executable(&file));

        assert!(!UNIX_PLATFORM.is_executable(dir.path()));
        assert!(!UNIX_PLATFORM.is_executable(&dir.path().join("absent")));
    }

    #[test]
    fn termination_reads_code_or_signal() {
        let exited = ExitStatus::from_raw(3 << 8);
        assert_eq!(UNIX_PLATFORM.termination(exited), Termination::Exited(3));

        let killed = ExitStatus::from_raw(libc::SIGKILL);
        assert_eq!(
            UNIX_PLATFORM.termination(killed),
            Termination::Signaled(libc::SIGKILL)
        );
    }

    #[test]
    fn signals_are_held_until_child_is_attached() {
        UNIX_PLATFORM.begin_forwarding();
        let during_spawn = SigSet::thread_get_mask().unwrap();
        UNIX_PLATFORM.attach_child(0);
        let while_waiting = SigSet::thread_get_mask().unwrap();
        UNIX_PLATFORM.end_forwarding();

        for sig in FORWARDED {
            assert!(during_spawn.contains(sig), "{sig} not held");
            assert!(!while_waiting.contains(sig), "{sig} still held");
        }
    }
}
