use crate::connect::{self, ConnectAttempt};
use crate::keyboard::KeysState;
use crate::policy::PickerPolicy;
use crate::radio::{ConnectFailure, LinkPoll, Radio};
use crate::render::{self, present, Frame, Panel, Viewport};
use crate::scan;
use crate::types::UiState;
use crate::ui::{input, KeyAction, Session, UiAction, UiEngine, UiEvent};

/// What one call into the picker did, for callers that mirror the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A blocking scan ran; the scanning notice was shown first.
    pub scanned: bool,
    /// The state screen was repainted.
    pub painted: bool,
}

/// Poll-loop owner of the UI engine and the radio.
pub struct Picker<R: Radio> {
    radio: R,
    engine: UiEngine,
    policy: PickerPolicy,
    attempt: Option<ConnectAttempt>,
    dirty: bool,
}

impl<R: Radio> Picker<R> {
    pub fn new(radio: R, policy: PickerPolicy) -> Self {
        Self {
            radio,
            engine: UiEngine::new(),
            policy: policy.sanitized(),
            attempt: None,
            dirty: true,
        }
    }

    pub fn state(&self) -> UiState {
        self.engine.state()
    }

    pub fn session(&self) -> &Session {
        self.engine.session()
    }

    pub fn policy(&self) -> &PickerPolicy {
        &self.policy
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Frame for the current state, as the next repaint would draw it.
    pub fn frame(&self, viewport: Viewport) -> Frame {
        render::render(self.state(), self.session(), viewport)
    }

    /// Boot: first scan, then the resulting screen.
    pub async fn start<P: Panel>(&mut self, panel: &mut P) -> TickOutcome {
        self.rescan(panel).await;
        TickOutcome {
            scanned: true,
            painted: self.redraw(panel),
        }
    }

    /// One loop iteration: keys, link poll, repaint if needed.
    pub async fn tick<P: Panel>(
        &mut self,
        keys: &KeysState,
        now_ms: u64,
        panel: &mut P,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if keys.changed && keys.pressed {
            let chosen_is_open = self.session().selection.chosen_is_open;
            for action in input::translate(keys, self.state(), chosen_is_open) {
                if self.dispatch(action, now_ms, panel).await {
                    outcome.scanned = true;
                    break;
                }
            }
        }

        if self.state() == UiState::Connecting {
            self.poll_link(now_ms).await;
        }

        if self.dirty {
            outcome.painted = self.redraw(panel);
        }
        outcome
    }

    /// Returns `true` when the action ended in a scan.
    async fn dispatch<P: Panel>(
        &mut self,
        action: KeyAction,
        now_ms: u64,
        panel: &mut P,
    ) -> bool {
        let result = self.engine.apply(&UiEvent::Key(action));
        self.dirty |= result.changed();

        match result.action {
            Some(UiAction::Scan) => {
                self.rescan(panel).await;
                true
            }
            Some(UiAction::Connect(request)) => {
                self.attempt = Some(ConnectAttempt {
                    started_at_ms: now_ms,
                });
                let first = connect::begin(&mut self.radio, &request, &self.policy).await;
                if first != LinkPoll::Pending {
                    self.apply_link(first);
                }
                false
            }
            None => false,
        }
    }

    async fn poll_link(&mut self, now_ms: u64) {
        let Some(attempt) = self.attempt else {
            return;
        };
        let polled = connect::poll(&mut self.radio, attempt, now_ms, &self.policy);
        if polled == LinkPoll::Failed(ConnectFailure::TimedOut) {
            if let Err(err) = self.radio.reset_link(false, self.policy.settle_ms).await {
                log::warn!("connect: abandon_failed err={:?}", err);
            }
        }
        self.apply_link(polled);
    }

    fn apply_link(&mut self, polled: LinkPoll) {
        let result = self.engine.apply(&UiEvent::Link(polled));
        self.dirty |= result.changed();
        if result.after != UiState::Connecting {
            self.attempt = None;
        }
    }

    async fn rescan<P: Panel>(&mut self, panel: &mut P) {
        self.attempt = None;
        let notice = render::scanning();
        if present(&notice, panel).is_err() {
            log::warn!("render: present_failed screen=scanning");
        }
        let report = scan::scan(&mut self.radio, &self.policy).await;
        let result = self.engine.apply(&UiEvent::ScanFinished(report));
        self.dirty |= result.changed();
    }

    fn redraw<P: Panel>(&mut self, panel: &mut P) -> bool {
        self.dirty = false;
        let frame = self.frame(Viewport::of(panel));
        if present(&frame, panel).is_err() {
            log::warn!("render: present_failed screen={}", self.state().as_str());
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embassy_futures::block_on;
    use embedded_graphics::{pixelcolor::Rgb565, prelude::*, Pixel};

    use super::*;
    use crate::radio::fake::{Call, FakeRadio};
    use crate::radio::LinkInfo;
    use crate::types::{PickerFault, SecurityKind};

    #[derive(Default)]
    struct CountingPanel {
        flushes: usize,
    }

    impl DrawTarget for CountingPanel {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            pixels.into_iter().for_each(drop);
            Ok(())
        }
    }

    impl OriginDimensions for CountingPanel {
        fn size(&self) -> Size {
            Size::new(240, 135)
        }
    }

    impl Panel for CountingPanel {
        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn radio() -> FakeRadio {
        FakeRadio::with_hits(&[
            ("Home", -40, SecurityKind::Wpa2),
            ("Cafe", -70, SecurityKind::Open),
            ("Office", -55, SecurityKind::Wpa3),
        ])
    }

    fn started(radio: FakeRadio, policy: PickerPolicy) -> (Picker<FakeRadio>, CountingPanel) {
        let mut picker = Picker::new(radio, policy);
        let mut panel = CountingPanel::default();
        let outcome = block_on(picker.start(&mut panel));
        assert!(outcome.scanned && outcome.painted);
        (picker, panel)
    }

    fn press(
        picker: &mut Picker<FakeRadio>,
        panel: &mut CountingPanel,
        keys: KeysState,
        now_ms: u64,
    ) -> TickOutcome {
        block_on(picker.tick(&keys, now_ms, panel))
    }

    #[test]
    fn start_scans_and_paints_notice_then_list() {
        let (picker, panel) = started(radio(), PickerPolicy::defaults());
        assert_eq!(picker.state(), UiState::SelectingNetwork);
        assert_eq!(panel.flushes, 2);
        assert!(!picker.is_dirty());
    }

    #[test]
    fn idle_ticks_do_not_repaint() {
        let (mut picker, mut panel) = started(radio(), PickerPolicy::defaults());
        let outcome = press(&mut picker, &mut panel, KeysState::idle(), 10);
        assert!(!outcome.painted);
        assert_eq!(panel.flushes, 2);
    }

    #[test]
    fn connect_to_protected_network_end_to_end() {
        let (mut picker, mut panel) = started(radio(), PickerPolicy::defaults());
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 10);
        assert_eq!(picker.state(), UiState::EnteringPassword);

        press(&mut picker, &mut panel, KeysState::typed("pw"), 20);
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 30);
        assert_eq!(picker.state(), UiState::Connecting);
        assert_eq!(
            picker.radio().calls.last(),
            Some(&Call::Connect {
                ssid: "Home".into(),
                password: Some("pw".into())
            })
        );

        press(&mut picker, &mut panel, KeysState::idle(), 40);
        assert_eq!(picker.state(), UiState::Connecting);

        let info = LinkInfo::new("Home", Some(core::net::Ipv4Addr::new(10, 1, 1, 9)));
        picker.radio_mut().link = Some(LinkPoll::Connected(info.clone()));
        let outcome = press(&mut picker, &mut panel, KeysState::idle(), 50);
        assert!(outcome.painted);
        assert_eq!(picker.state(), UiState::Connected);
        assert_eq!(picker.session().link, Some(info));
        assert!(picker.frame(Viewport::CARDPUTER).contains("IP:   10.1.1.9"));
    }

    #[test]
    fn rescan_key_runs_a_fresh_scan() {
        let (mut picker, mut panel) = started(radio(), PickerPolicy::defaults());
        let outcome = press(&mut picker, &mut panel, KeysState::typed("r"), 10);
        assert!(outcome.scanned);
        assert_eq!(picker.radio().scan_count(), 2);
        assert_eq!(picker.state(), UiState::SelectingNetwork);
    }

    #[test]
    fn empty_scan_then_rescan_finds_networks() {
        let (mut picker, mut panel) = started(FakeRadio::default(), PickerPolicy::defaults());
        assert_eq!(picker.state(), UiState::NoNetworks);
        assert_eq!(picker.session().fault, Some(PickerFault::EmptyScanResult));

        picker.radio_mut().hits = radio().hits;
        press(&mut picker, &mut panel, KeysState::typed("R"), 10);
        assert_eq!(picker.radio().scan_count(), 2);
        assert_eq!(picker.state(), UiState::SelectingNetwork);
    }

    #[test]
    fn refused_request_lands_on_failure_screen() {
        let mut fake = radio();
        fake.fail_connect = true;
        let (mut picker, mut panel) = started(fake, PickerPolicy::defaults());
        press(&mut picker, &mut panel, KeysState::typed("sss").with_enter(), 10);
        assert_eq!(picker.session().selection.chosen_name.as_str(), "Home");
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 20);
        assert_eq!(picker.state(), UiState::ConnectFailed);
        assert_eq!(picker.session().fault, Some(PickerFault::ConnectionFailed));
    }

    #[test]
    fn bounded_policy_times_out_pending_attempt() {
        let policy = PickerPolicy::defaults().with_connect_timeout_ms(2_000);
        let (mut picker, mut panel) = started(radio(), policy);
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 1_000);
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 1_000);
        assert_eq!(picker.state(), UiState::Connecting);

        press(&mut picker, &mut panel, KeysState::idle(), 2_999);
        assert_eq!(picker.state(), UiState::Connecting);

        press(&mut picker, &mut panel, KeysState::idle(), 3_000);
        assert_eq!(picker.state(), UiState::ConnectFailed);
        assert_eq!(picker.session().fault, Some(PickerFault::ConnectTimedOut));
        assert_eq!(
            picker.radio().calls.last(),
            Some(&Call::Reset {
                forget: false,
                settle_ms: 100
            })
        );
    }

    #[test]
    fn unbounded_policy_keeps_waiting() {
        let (mut picker, mut panel) = started(radio(), PickerPolicy::defaults());
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 0);
        press(&mut picker, &mut panel, KeysState::default().with_enter(), 0);
        press(&mut picker, &mut panel, KeysState::idle(), 10_000_000);
        assert_eq!(picker.state(), UiState::Connecting);
    }
}
