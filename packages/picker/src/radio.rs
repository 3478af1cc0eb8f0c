use core::fmt::Debug;
use core::net::Ipv4Addr;

use crate::types::{PickerFault, SecurityKind, Ssid};

/// Borrowed view of one scan hit, valid only inside the visit callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessPoint<'a> {
    pub ssid: &'a str,
    pub signal_strength: i8,
    pub security: SecurityKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkInfo {
    pub ssid: Ssid,
    /// Filled once DHCP has handed out a lease.
    pub address: Option<Ipv4Addr>,
}

impl LinkInfo {
    pub fn new(ssid: &str, address: Option<Ipv4Addr>) -> Self {
        let mut name = Ssid::new();
        for ch in ssid.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            ssid: name,
            address,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectFailure {
    Rejected,
    NoMatchingNetwork,
    TimedOut,
}

impl ConnectFailure {
    pub const fn fault(self) -> PickerFault {
        match self {
            Self::Rejected => PickerFault::ConnectionFailed,
            Self::NoMatchingNetwork => PickerFault::NoMatchingNetwork,
            Self::TimedOut => PickerFault::ConnectTimedOut,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::NoMatchingNetwork => "no_matching_network",
            Self::TimedOut => "timed_out",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkPoll {
    Pending,
    Connected(LinkInfo),
    Failed(ConnectFailure),
}

/// Station-mode radio as seen by the picker.
///
/// `reset_link` and `scan` may take seconds; `poll_link` must return
/// immediately with whatever the stack last reported.
#[allow(async_fn_in_trait)]
pub trait Radio {
    type Error: Debug;

    /// Client mode, drop any association, then wait `settle_ms`.
    async fn reset_link(&mut self, forget_credentials: bool, settle_ms: u32)
        -> Result<(), Self::Error>;

    /// Runs a blocking scan, calling `visit` once per hit. Returns the number of hits.
    async fn scan<F>(&mut self, visit: F) -> Result<usize, Self::Error>
    where
        F: FnMut(AccessPoint<'_>);

    /// Issues a connect request without waiting for the outcome.
    async fn begin_connect(&mut self, ssid: &str, password: Option<&str>)
        -> Result<(), Self::Error>;

    fn poll_link(&mut self) -> LinkPoll;
}
