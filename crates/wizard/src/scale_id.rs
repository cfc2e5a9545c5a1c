use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime identifier the host knows a scale by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleId(String);

impl ScaleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out millisecond timestamps, bumped when the clock has not moved
/// (or moved backwards) since the previous id.
#[derive(Debug, Default)]
pub struct ScaleIdGenerator {
    last: i64,
}

impl ScaleIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ScaleId {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        ScaleId(self.last.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_non_empty_and_unique() {
        let mut ids = ScaleIdGenerator::new();
        let seen: HashSet<ScaleId> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
        assert!(seen.iter().all(|id| !id.as_str().is_empty()));
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut ids = ScaleIdGenerator::new();
        let first: i64 = ids.next_id().as_str().parse().expect("numeric");
        let second: i64 = ids.next_id().as_str().parse().expect("numeric");
        assert!(second > first);
    }
}
