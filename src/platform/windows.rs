use crate::dispatcher::{Termination, EXIT_INTERNAL_FAILURE};
use crate::platform::PlatformOps;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

fn has_exe_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("exe"))
}

impl PlatformOps for Windows {
    fn tool_name(&self, arg0: &Path) -> Option<String> {
        let name = if has_exe_extension(arg0) { arg0.file_stem() } else { arg0.file_name() };
        name.map(|n| n.to_string_lossy().into_owned()).filter(|n| !n.is_empty())
    }
    fn executable_candidates(&self, dir: &Path, tool: &str) -> Vec<PathBuf> {
        if has_exe_extension(Path::new(tool)) { vec![dir.join(tool)] } else { vec![dir.join(format!("{tool}.exe")), dir.join(tool)] }
    }
    fn is_executable(&self, path: &Path) -> bool { path.is_file() }
    fn termination(&self, status: ExitStatus) -> Termination { Termination::Exited(status.code().unwrap_or(EXIT_INTERNAL_FAILURE)) }
    // Console Ctrl-C reaches every attached process, the child included.
    fn begin_forwarding(&self) {}
    fn attach_child(&self, _child_pid: u32) {}
    fn end_forwarding(&self) {}
    fn exit_like(&self, termination: Termination) -> ! {
        match termination {
            Termination::Exited(code) => std::process::exit(code),
            Termination::Signaled(sig) => std::process::exit(128 + sig),
        }
    }
}
