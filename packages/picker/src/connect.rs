use crate::policy::PickerPolicy;
use crate::radio::{ConnectFailure, LinkPoll, Radio};
use crate::selection::{PasswordBuffer, SelectionState};
use crate::types::Ssid;

/// Target of one connection attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectRequest {
    pub ssid: Ssid,
    /// `None` for open networks.
    pub password: Option<PasswordBuffer>,
}

impl ConnectRequest {
    pub fn from_selection(selection: &SelectionState) -> Self {
        Self {
            ssid: selection.chosen_name.clone(),
            password: if selection.chosen_is_open {
                None
            } else {
                Some(selection.password.clone())
            },
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|password| password.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectAttempt {
    pub started_at_ms: u64,
}

impl ConnectAttempt {
    pub const fn elapsed_ms(self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }
}

/// Drops the current association (credentials kept), then fires the request.
///
/// Returns `Failed(Rejected)` when the radio refuses the request outright and
/// `Pending` otherwise; the outcome arrives through [`poll`].
pub async fn begin<R: Radio>(
    radio: &mut R,
    request: &ConnectRequest,
    policy: &PickerPolicy,
) -> LinkPoll {
    if let Err(err) = radio.reset_link(false, policy.settle_ms).await {
        log::warn!("connect: reset_failed err={:?}", err);
    }

    match radio
        .begin_connect(request.ssid.as_str(), request.password())
        .await
    {
        Ok(()) => {
            log::info!(
                "connect: requested ssid={} open={}",
                request.ssid.as_str(),
                request.password.is_none()
            );
            LinkPoll::Pending
        }
        Err(err) => {
            log::warn!(
                "connect: request_failed ssid={} err={:?}",
                request.ssid.as_str(),
                err
            );
            LinkPoll::Failed(ConnectFailure::Rejected)
        }
    }
}

/// One non-blocking look at the link, bounded by the policy timeout if any.
pub fn poll<R: Radio>(
    radio: &mut R,
    attempt: ConnectAttempt,
    now_ms: u64,
    policy: &PickerPolicy,
) -> LinkPoll {
    match radio.poll_link() {
        LinkPoll::Pending => match policy.connect_timeout_ms {
            Some(timeout_ms) if attempt.elapsed_ms(now_ms) >= u64::from(timeout_ms) => {
                log::warn!(
                    "connect: timed_out elapsed_ms={}",
                    attempt.elapsed_ms(now_ms)
                );
                LinkPoll::Failed(ConnectFailure::TimedOut)
            }
            _ => LinkPoll::Pending,
        },
        other => other,
    }
}
