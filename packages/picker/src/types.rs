use heapless::String;

pub const SSID_MAX: usize = 32;
pub const PASSWORD_MAX: usize = 64;
pub const CATALOG_CAPACITY: usize = 10;

pub type Ssid = String<SSID_MAX>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityKind {
    Open,
    Wep,
    Wpa,
    Wpa2,
    WpaWpa2,
    Wpa2Enterprise,
    Wpa3,
    Wpa2Wpa3,
    Unknown,
}

impl SecurityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2",
            Self::WpaWpa2 => "WPA/WPA2",
            Self::Wpa2Enterprise => "WPA2-ENT",
            Self::Wpa3 => "WPA3",
            Self::Wpa2Wpa3 => "WPA2/WPA3",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// One visible access point as kept in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRecord {
    pub name: Ssid,
    /// dBm; less negative is stronger.
    pub signal_strength: i8,
    pub security: SecurityKind,
}

impl NetworkRecord {
    /// Returns `None` when `name` does not fit an SSID.
    pub fn new(name: &str, signal_strength: i8, security: SecurityKind) -> Option<Self> {
        let mut ssid = Ssid::new();
        ssid.push_str(name).ok()?;
        Some(Self {
            name: ssid,
            signal_strength,
            security,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiState {
    NoNetworks,
    SelectingNetwork,
    EnteringPassword,
    Connecting,
    Connected,
    ConnectFailed,
}

impl UiState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoNetworks => "NoNetworks",
            Self::SelectingNetwork => "SelectingNetwork",
            Self::EnteringPassword => "EnteringPassword",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::ConnectFailed => "ConnectFailed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::NoNetworks,
            Self::SelectingNetwork,
            Self::EnteringPassword,
            Self::Connecting,
            Self::Connected,
            Self::ConnectFailed,
        ]
        .into_iter()
        .find(|state| state.as_str().eq_ignore_ascii_case(value))
    }
}

/// Conditions that park the UI on a terminal screen until the user rescans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerFault {
    EmptyScanResult,
    NoEligibleNetworks,
    ConnectionFailed,
    NoMatchingNetwork,
    ConnectTimedOut,
}

impl PickerFault {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyScanResult => "empty_scan_result",
            Self::NoEligibleNetworks => "no_eligible_networks",
            Self::ConnectionFailed => "connection_failed",
            Self::NoMatchingNetwork => "no_matching_network",
            Self::ConnectTimedOut => "connect_timed_out",
        }
    }
}
