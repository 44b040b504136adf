use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Query string parameters with lenient key lookup: `pageSize` also
/// matches `PageSize`.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(val) = self.map.get(key) {
            return Some(val);
        }

        // Retry with the first letter uppercased.
        let mut chars = key.chars();
        let first = chars.next()?;
        if !first.is_ascii_lowercase() {
            return None;
        }
        let key2: String = first.to_ascii_uppercase().to_string() + chars.as_str();
        self.map.get(&key2).map(|x| x.as_str())
    }

    /// Parses a parameter, `Ok(None)` when it is absent. The error carries the
    /// raw value.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, String> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| raw.to_string()),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_capitalized_key() {
        let params: QueryParams = [("PageSize", "20"), ("page", "2")].into_iter().collect();
        assert_eq!(params.get("pageSize"), Some("20"));
        assert_eq!(params.get("page"), Some("2"));
        assert!(params.has("page"));
        assert!(!params.has("sortBy"));
    }

    #[test]
    fn test_parse() {
        let params: QueryParams = [("page", " 3 "), ("pageSize", "ten")].into_iter().collect();
        assert_eq!(params.parse::<u32>("page"), Ok(Some(3)));
        assert_eq!(params.parse::<u32>("pageSize"), Err("ten".to_string()));
        assert_eq!(params.parse::<u32>("missing"), Ok(None));
    }
}
