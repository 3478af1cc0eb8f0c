//! Screen layouts.
//!
//! [`render`] turns the UI state into a [`Frame`] of positioned text rows and
//! divider rules; [`paint`] rasterises a frame onto a colour panel. Layout
//! follows the Cardputer's 240x135 landscape screen with a 6x10 font: header
//! at y=4, divider under it, body rows every 12-14 px, control hints last.

mod paint;
mod text;

use core::net::Ipv4Addr;

use embedded_graphics::geometry::OriginDimensions;
use heapless::Vec;

pub use paint::{paint, present, Panel};
pub use text::{Line, LINE_MAX};

use crate::types::{PickerFault, UiState};
use crate::ui::Session;
use text::line;

pub const FRAME_OPS_MAX: usize = 24;

const MARGIN_X: i32 = 4;
const HEADER_Y: i32 = 4;
const SUBHEADER_Y: i32 = 18;
const RULE_Y: i32 = 16;
const RULE_TALL_Y: i32 = 30;
const LIST_TOP_Y: i32 = 22;
const LIST_STEP: i32 = 12;
const LIST_BOTTOM_MARGIN: i32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Text,
    Accent,
    Alert,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    /// Text with its top-left corner at (x, y).
    Text { x: i32, y: i32, text: Line },
    /// Full-width horizontal rule.
    Rule { y: i32, tone: Tone },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    ops: Vec<DrawOp, FRAME_OPS_MAX>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text rows in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|text| text.contains(needle))
    }

    fn text(&mut self, y: i32, text: &str) {
        self.push(DrawOp::Text {
            x: MARGIN_X,
            y,
            text: line(format_args!("{}", text)),
        });
    }

    fn text_fmt(&mut self, y: i32, args: core::fmt::Arguments<'_>) {
        self.push(DrawOp::Text {
            x: MARGIN_X,
            y,
            text: line(args),
        });
    }

    fn rule(&mut self, y: i32, tone: Tone) {
        self.push(DrawOp::Rule { y, tone });
    }

    fn push(&mut self, op: DrawOp) {
        if self.ops.push(op).is_err() {
            log::warn!("render: frame_full ops={}", FRAME_OPS_MAX);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const CARDPUTER: Self = Self {
        width: 240,
        height: 135,
    };

    pub fn of<T: OriginDimensions>(target: &T) -> Self {
        let size = target.size();
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

/// Notice shown while a blocking scan holds the loop.
pub fn scanning() -> Frame {
    let mut frame = Frame::new();
    frame.text(HEADER_Y, "Scanning Wi-Fi networks...");
    frame.text(20, "Please wait a few seconds.");
    frame
}

pub fn render(state: UiState, session: &Session, viewport: Viewport) -> Frame {
    match state {
        UiState::NoNetworks => no_networks(session),
        UiState::SelectingNetwork => network_list(session, viewport),
        UiState::EnteringPassword => password(session),
        UiState::Connecting => connecting(session),
        UiState::Connected => connected(session),
        UiState::ConnectFailed => connect_failed(session),
    }
}

fn no_networks(session: &Session) -> Frame {
    let mut frame = Frame::new();
    frame.text(HEADER_Y, "No networks found.");
    frame.text(20, "Press R to scan again.");
    match session.fault {
        Some(PickerFault::NoEligibleNetworks) => frame.text(36, "Only hidden networks nearby."),
        Some(PickerFault::EmptyScanResult) => frame.text(36, "Scan returned no results."),
        _ => {}
    }
    frame
}

fn network_list(session: &Session, viewport: Viewport) -> Frame {
    let mut frame = Frame::new();
    frame.text(HEADER_Y, "Select Wi-Fi network:");
    frame.rule(RULE_Y, Tone::Accent);

    let bottom = viewport.height as i32 - LIST_BOTTOM_MARGIN;
    let mut y = LIST_TOP_Y;
    for (index, record) in session.catalog.iter().enumerate() {
        let marker = if index == session.selection.selected_index {
            "> "
        } else {
            "  "
        };
        frame.text_fmt(
            y,
            format_args!(
                "{}{} ({}dBm) {}",
                marker,
                record.name.as_str(),
                record.signal_strength,
                record.security.label()
            ),
        );
        y += LIST_STEP;
        if y > bottom {
            break;
        }
    }

    y += 4;
    frame.text(y, "W/S: move   ENTER: connect");
    y += LIST_STEP;
    frame.text(y, "R: rescan");
    frame
}

fn chosen_header(frame: &mut Frame, title: &str, session: &Session) {
    frame.text(HEADER_Y, title);
    frame.text(SUBHEADER_Y, session.selection.chosen_name.as_str());
    frame.rule(RULE_TALL_Y, Tone::Accent);
}

fn password(session: &Session) -> Frame {
    let mut frame = Frame::new();
    chosen_header(&mut frame, "Selected network:", session);

    let mut y = 38;
    if session.selection.chosen_is_open {
        frame.text(y, "Open network (no password).");
        y += 14;
        frame.text(y, "ENTER: connect   Q: back");
        return frame;
    }

    frame.text(y, "Enter Wi-Fi password:");
    y += 14;
    frame.text(y, session.selection.password.as_str());
    y += 18;
    frame.text(y, "ENTER: connect");
    y += LIST_STEP;
    frame.text(y, "DEL: erase  Q: back");
    frame
}

fn connecting(session: &Session) -> Frame {
    let mut frame = Frame::new();
    chosen_header(&mut frame, "Connecting to:", session);
    frame.text(40, "Please wait...");
    frame.text(56, "R: cancel and rescan");
    frame
}

fn connected(session: &Session) -> Frame {
    let mut frame = Frame::new();
    frame.text(HEADER_Y, "Wi-Fi connected!");
    frame.rule(RULE_Y, Tone::Accent);

    let (ssid, address) = match &session.link {
        Some(link) => (
            link.ssid.as_str(),
            link.address.unwrap_or(Ipv4Addr::UNSPECIFIED),
        ),
        None => (
            session.selection.chosen_name.as_str(),
            Ipv4Addr::UNSPECIFIED,
        ),
    };
    let mut y = 24;
    frame.text_fmt(y, format_args!("SSID: {}", ssid));
    y += 14;
    frame.text_fmt(y, format_args!("IP:   {}", address));
    y += 14;
    frame.text(y, "R: disconnect and rescan");
    frame
}

fn connect_failed(session: &Session) -> Frame {
    let mut frame = Frame::new();
    frame.text(HEADER_Y, "Connection failed.");
    frame.rule(RULE_Y, Tone::Alert);

    let detail = match session.fault {
        Some(PickerFault::NoMatchingNetwork) => "Network not found.",
        Some(PickerFault::ConnectTimedOut) => "No link before timeout.",
        _ => "Check SSID / password.",
    };
    let mut y = 24;
    frame.text(y, detail);
    y += 14;
    frame.text(y, "R: retry (new scan)");
    frame
}
