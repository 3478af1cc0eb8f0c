use crate::catalog::{Catalog, InsertOutcome};
use crate::policy::PickerPolicy;
use crate::radio::Radio;
use crate::types::{NetworkRecord, PickerFault};

/// What one scan produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub catalog: Catalog,
    /// Hits reported by the radio, hidden and oversized names included.
    pub visible: usize,
}

impl ScanReport {
    pub fn fault(&self) -> Option<PickerFault> {
        if self.visible == 0 {
            Some(PickerFault::EmptyScanResult)
        } else if self.catalog.is_empty() {
            Some(PickerFault::NoEligibleNetworks)
        } else {
            None
        }
    }
}

/// Drops the current association, scans, and keeps the strongest named hits.
///
/// A radio error is reported as an empty scan.
pub async fn scan<R: Radio>(radio: &mut R, policy: &PickerPolicy) -> ScanReport {
    let mut report = ScanReport::default();

    if let Err(err) = radio.reset_link(true, policy.settle_ms).await {
        log::warn!("scan: reset_failed err={:?}", err);
    }

    let mut evicted = 0usize;
    let catalog = &mut report.catalog;
    let result = radio
        .scan(|ap| {
            if ap.ssid.is_empty() {
                return;
            }
            let Some(record) = NetworkRecord::new(ap.ssid, ap.signal_strength, ap.security) else {
                return;
            };
            if matches!(catalog.insert(record), InsertOutcome::InsertedEvicting { .. }) {
                evicted += 1;
            }
        })
        .await;

    match result {
        Ok(visible) => {
            report.visible = visible;
            log::info!(
                "scan: visible={} listed={} evicted={}",
                visible,
                report.catalog.len(),
                evicted
            );
        }
        Err(err) => {
            log::warn!("scan: failed err={:?}", err);
            report.catalog.clear();
        }
    }
    report
}
