use crate::foundation::error::{StageError, StageResult};
use crate::foundation::math::Fnv1a64;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Canonical identity of a cached render resource.
///
/// Descriptors have the form `kind[:param(,param)*]`, where a param is either `name=value` or a
/// bare positional `value` (named by its position: `"0"`, `"1"`, ...). Params are kept sorted by
/// name so `stars:radius=40,count=300` and `stars:count=300,radius=40` are the same key.
/// Factories that accept positionals name them through [`ResourceKey::name_positionals`].
pub struct ResourceKey {
    kind: String,
    params: Vec<(String, String)>,
}

impl ResourceKey {
    /// Build key with lexicographically sorted `params`.
    pub fn new(kind: impl Into<String>, mut params: Vec<(String, String)>) -> StageResult<Self> {
        let kind = kind.into().trim().to_string();
        if kind.is_empty() {
            return Err(StageError::validation("resource kind must be non-empty"));
        }
        for (name, _) in &params {
            if name.is_empty() {
                return Err(StageError::validation(format!(
                    "resource '{kind}' has a param with an empty name"
                )));
            }
        }
        params.sort();
        if let Some(w) = params.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(StageError::validation(format!(
                "resource '{kind}' repeats param '{}'",
                w[0].0
            )));
        }
        Ok(Self { kind, params })
    }

    /// Parse a descriptor string such as `"stars:count=300"` or `"stars:300"`.
    pub fn parse(descriptor: &str) -> StageResult<Self> {
        let (kind, rest) = match descriptor.split_once(':') {
            Some((k, r)) => (k, Some(r)),
            None => (descriptor, None),
        };

        let mut params = Vec::new();
        if let Some(rest) = rest {
            let mut positional = 0usize;
            for raw in rest.split(',') {
                let raw = raw.trim();
                if raw.is_empty() {
                    continue;
                }
                match raw.split_once('=') {
                    Some((name, value)) => {
                        params.push((name.trim().to_string(), value.trim().to_string()));
                    }
                    None => {
                        params.push((positional.to_string(), raw.to_string()));
                        positional += 1;
                    }
                }
            }
        }

        Self::new(kind, params)
    }

    /// Resource kind (the part before `:`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Sorted `(name, value)` params.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Raw value of a param, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|i| self.params[i].1.as_str())
    }

    /// Rename positional params (`"0"`, `"1"`, ...) to `names[i]`.
    ///
    /// Afterwards `stars:300` and `stars:count=300` are the same key. More positionals than
    /// names, or a positional that repeats a named param, is an error.
    pub fn name_positionals(self, names: &[&str]) -> StageResult<Self> {
        let Self { kind, params } = self;
        let mut renamed = Vec::with_capacity(params.len());
        for (name, value) in params {
            let name = match name.parse::<usize>() {
                Ok(pos) => match names.get(pos) {
                    Some(n) => (*n).to_string(),
                    None => {
                        return Err(StageError::validation(format!(
                            "resource '{kind}' takes at most {} positional params",
                            names.len()
                        )));
                    }
                },
                Err(_) => name,
            };
            renamed.push((name, value));
        }
        Self::new(kind, renamed)
    }

    /// Parse a param, returning `default` when absent.
    pub fn parse_param<T>(&self, name: &str, default: T) -> StageResult<T>
    where
        T: std::str::FromStr,
    {
        match self.param(name) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|_| {
                StageError::validation(format!(
                    "resource '{}': param '{name}' has invalid value '{raw}'",
                    self.kind
                ))
            }),
        }
    }

    /// Canonical descriptor string.
    pub fn descriptor(&self) -> String {
        let mut out = self.kind.clone();
        if !self.params.is_empty() {
            out.push(':');
            let joined = self
                .params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&joined);
        }
        out
    }

    /// Stable 64-bit hash of the canonical key, used to seed procedural resources.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(self.kind.as_bytes());
        hasher.write_u8(0);
        for (k, v) in &self.params {
            hasher.write_bytes(k.as_bytes());
            hasher.write_u8(0);
            hasher.write_bytes(v.as_bytes());
            hasher.write_u8(0);
        }
        hasher.finish()
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.descriptor())
    }
}

impl std::str::FromStr for ResourceKey {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/key.rs"]
mod tests;
