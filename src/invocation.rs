use crate::config::Config;
use std::ffi::OsString;

/// Environment variable consulted when no `+<toolchain>` argument is given.
pub const TOOLCHAIN_ENV: &str = "LUNIK_TOOLCHAIN";

/// What one multiplexed invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: String,
    pub toolchain: String,
    pub forwarded_args: Vec<OsString>,
}

/// Toolchain named by a `+<name>` selector argument.
///
/// `name` must be non-empty and free of `+`; anything else is an ordinary
/// argument for the tool.
pub fn selector(arg: &OsString) -> Option<&str> {
    let name = arg.to_str()?.strip_prefix('+')?;
    if name.is_empty() || name.contains('+') {
        return None;
    }
    Some(name)
}

/// Split the raw arguments of an invocation into tool, toolchain and
/// forwarded arguments.
///
/// The toolchain comes from a leading selector, then `env_toolchain`, then
/// the configured default. Unknown toolchain names are not an error here.
pub fn interpret(
    invoked_name: &str,
    mut raw_args: Vec<OsString>,
    config: &Config,
    env_toolchain: Option<&str>,
) -> Invocation {
    let selected = raw_args.first().and_then(selector).map(str::to_string);
    let toolchain = match selected {
        Some(name) => {
            raw_args.remove(0);
            name
        }
        None => env_toolchain
            .filter(|name| !name.is_empty())
            .unwrap_or(&config.default)
            .to_string(),
    };
    tracing::trace!(tool = invoked_name, %toolchain, "interpreted invocation");
    Invocation {
        tool: invoked_name.to_string(),
        toolchain,
        forwarded_args: raw_args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn config() -> Config {
        Config::with_default("stable")
    }

    #[test]
    fn selector_is_consumed() {
        let inv = interpret("moon", args(&["+dev", "build", "--release"]), &config(), None);
        assert_eq!(inv.tool, "moon");
        assert_eq!(inv.toolchain, "dev");
        assert_eq!(inv.forwarded_args, args(&["build", "--release"]));
    }

    #[test]
    fn default_used_without_selector() {
        let raw = args(&["build", "+dev"]);
        let inv = interpret("moonc", raw.clone(), &config(), None);
        assert_eq!(inv.tool, "moonc");
        assert_eq!(inv.toolchain, "stable");
        assert_eq!(inv.forwarded_args, raw);

        let inv = interpret("moonc", Vec::new(), &config(), None);
        assert_eq!(inv.toolchain, "stable");
        assert!(inv.forwarded_args.is_empty());
    }

    #[test]
    fn only_one_selector_is_stripped() {
        let inv = interpret("moon", args(&["+dev", "+stable"]), &config(), None);
        assert_eq!(inv.toolchain, "dev");
        assert_eq!(inv.forwarded_args, args(&["+stable"]));
    }

    #[test]
    fn malformed_selectors_are_forwarded() {
        for first in ["+", "++dev", "+dev+1", "dev", "-+dev"] {
            let raw = args(&[first, "x"]);
            let inv = interpret("moon", raw.clone(), &config(), None);
            assert_eq!(inv.toolchain, "stable", "{first}");
            assert_eq!(inv.forwarded_args, raw, "{first}");
        }
    }

    #[test]
    fn environment_sits_between_selector_and_default() {
        let inv = interpret("moon", args(&["test"]), &config(), Some("dev"));
        assert_eq!(inv.toolchain, "dev");

        let inv = interpret("moon", args(&["+nightly", "test"]), &config(), Some("dev"));
        assert_eq!(inv.toolchain, "nightly");

        let inv = interpret("moon", args(&["test"]), &config(), Some(""));
        assert_eq!(inv.toolchain, "stable");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_first_argument_is_forwarded() {
        use std::os::unix::ffi::OsStringExt;
        let raw = vec![OsString::from_vec(vec![b'+', 0xff]), OsString::from("x")];
        let inv = interpret("moon", raw.clone(), &config(), None);
        assert_eq!(inv.toolchain, "stable");
        assert_eq!(inv.forwarded_args, raw);
    }
}
