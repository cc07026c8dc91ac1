/// Settings taken from environment variables.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct EnvConfig {
    /// `ANTE_TRACE=1` prints every instruction as it is dispatched.
    pub trace: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; unset or unreadable variables leave the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        EnvConfig {
            trace: lookup("ANTE_TRACE").is_some_and(|v| v == "1"),
        }
    }
}
