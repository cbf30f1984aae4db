// Environment variable loading

use std::collections::HashMap;
use std::env;

/// Reads variables, optionally under a `PREFIX_` namespace.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::new(Some(prefix.into()))
    }

    /// All matching variables, keys lowercased with the prefix stripped
    pub fn load(&self) -> HashMap<String, String> {
        self.collect(env::vars())
    }

    /// Filter an explicit set of variables the way [`load`](Self::load) does
    pub fn collect<I, K, V>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref();
                let name = match &self.prefix {
                    Some(prefix) => key.strip_prefix(prefix.as_str())?.strip_prefix('_')?,
                    None => key,
                };
                Some((name.to_lowercase(), value.into()))
            })
            .collect()
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // std::env::set_var is unsafe in edition 2024, so these tests avoid
    // mutating the process environment.

    #[test]
    fn test_collect_with_prefix() {
        let loader = EnvLoader::with_prefix("FIELDCHECK");
        let vars = loader.collect([
            ("FIELDCHECK_LOG_LEVEL", "debug"),
            ("FIELDCHECK_OUTPUT", "json"),
            ("FIELDCHECKER", "ignored"),
            ("HOME", "/root"),
        ]);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["log_level"], "debug");
        assert_eq!(vars["output"], "json");
    }

    #[test]
    fn test_collect_without_prefix() {
        let vars = EnvLoader::default().collect([("HOME", "/root")]);
        assert_eq!(vars["home"], "/root");
    }
}
