pub const SETTLE_DEFAULT_MS: u32 = 100;
pub const POLL_TICK_DEFAULT_MS: u32 = 10;
pub const CONNECT_TIMEOUT_MIN_MS: u32 = 1_000;
pub const CONNECT_TIMEOUT_MAX_MS: u32 = 300_000;

/// Runtime knobs for the picker loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickerPolicy {
    /// Pause after dropping the association, before scanning or connecting.
    pub settle_ms: u32,
    pub poll_tick_ms: u32,
    /// `None` keeps the UI in Connecting until the user rescans.
    pub connect_timeout_ms: Option<u32>,
}

impl Default for PickerPolicy {
    fn default() -> Self {
        Self::defaults()
    }
}

impl PickerPolicy {
    pub const fn defaults() -> Self {
        Self {
            settle_ms: SETTLE_DEFAULT_MS,
            poll_tick_ms: POLL_TICK_DEFAULT_MS,
            connect_timeout_ms: None,
        }
    }

    pub const fn with_connect_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    pub const fn sanitized(self) -> Self {
        let settle_ms = clamp_u32(self.settle_ms, 0, 5_000);
        let poll_tick_ms = clamp_u32(self.poll_tick_ms, 1, 250);
        let connect_timeout_ms = match self.connect_timeout_ms {
            Some(timeout_ms) => Some(clamp_u32(
                timeout_ms,
                CONNECT_TIMEOUT_MIN_MS,
                CONNECT_TIMEOUT_MAX_MS,
            )),
            None => None,
        };
        Self {
            settle_ms,
            poll_tick_ms,
            connect_timeout_ms,
        }
    }
}

const fn clamp_u32(value: u32, min: u32, max: u32) -> u32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_wait_forever() {
        let policy = PickerPolicy::defaults();
        assert_eq!(policy.settle_ms, 100);
        assert_eq!(policy.poll_tick_ms, 10);
        assert_eq!(policy.connect_timeout_ms, None);
        assert_eq!(policy.sanitized(), policy);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let policy = PickerPolicy {
            settle_ms: 60_000,
            poll_tick_ms: 0,
            connect_timeout_ms: Some(5),
        }
        .sanitized();
        assert_eq!(policy.settle_ms, 5_000);
        assert_eq!(policy.poll_tick_ms, 1);
        assert_eq!(policy.connect_timeout_ms, Some(CONNECT_TIMEOUT_MIN_MS));
    }
}
