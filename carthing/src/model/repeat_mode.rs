use serde::{Deserialize, Serialize};

/// Repeat mode as reported and accepted by the player API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    Context,
    Track,
}

impl RepeatMode {
    pub const ALL: [RepeatMode; 3] = [RepeatMode::Off, RepeatMode::Context, RepeatMode::Track];

    /// Next mode in the off -> context -> track -> off cycle
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }

    /// Value used in the `state` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Context => "context",
            RepeatMode::Track => "track",
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        assert_eq!(RepeatMode::Off.next(), RepeatMode::Context);
        assert_eq!(RepeatMode::Context.next(), RepeatMode::Track);
        assert_eq!(RepeatMode::Track.next(), RepeatMode::Off);
    }

    #[test]
    fn test_cycle_has_period_three() {
        for mode in RepeatMode::ALL {
            assert_ne!(mode.next(), mode);
            assert_ne!(mode.next().next(), mode);
            assert_eq!(mode.next().next().next(), mode);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let mode: RepeatMode = serde_json::from_str("\"context\"").unwrap();
        assert_eq!(mode, RepeatMode::Context);
        assert_eq!(serde_json::to_string(&RepeatMode::Track).unwrap(), "\"track\"");
    }
}
