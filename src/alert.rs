//! Auto-dismiss for flash alerts.
//!
//! DESIGN
//! ======
//! Once page content has loaded, [`AlertDismisser::arm`] schedules a single
//! task after the configured delay. The task adds the fade-out class to every
//! alert still on the page and registers a one-time transition-end handler
//! that removes the element. Alerts already fading are left alone, so a second
//! pass never stacks handlers on the same element.
//!
//! LIMITATIONS
//! ===========
//! Removal is driven entirely by the transition-end event. An alert whose
//! stylesheet defines no transition for the fade-out class never receives
//! that event and stays on the page, faded. There is no fallback timer.

use std::time::Duration;

use crate::config::UiConfig;
use crate::error::UiError;

#[cfg(test)]
#[path = "alert_test.rs"]
mod alert_test;

/// Lifecycle of an alert element as seen by the dismisser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStage {
    Visible,
    Fading,
    Removed,
}

/// A single alert element.
pub trait AlertNode: Clone + 'static {
    fn stage(&self, fade_out_class: &str) -> AlertStage;

    /// # Errors
    ///
    /// Returns `Dom` if the class list rejects the class.
    fn add_class(&self, class: &str) -> Result<(), UiError>;

    /// Run `handler` the first time this element's transition ends.
    ///
    /// # Errors
    ///
    /// Returns `Dom` if the listener cannot be registered.
    fn on_transition_end(&self, handler: Box<dyn FnOnce()>) -> Result<(), UiError>;

    /// Detach from the document. Removing a detached element is a no-op.
    fn remove(&self);
}

/// The document the alerts live in.
pub trait AlertHost {
    type Alert: AlertNode;

    /// # Errors
    ///
    /// Returns `Dom` if the selector cannot be evaluated.
    fn alerts(&self, selector: &str) -> Result<Vec<Self::Alert>, UiError>;
}

/// Non-blocking delayed execution.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Outcome of one dismissal pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DismissReport {
    pub faded: usize,
    /// Alerts that were already fading or gone.
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct AlertDismisser {
    selector: String,
    fade_out_class: String,
    delay: Duration,
}

impl AlertDismisser {
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        Self {
            selector: config.alert_selector.clone(),
            fade_out_class: config.fade_out_class.clone(),
            delay: config.dismiss_delay(),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule one dismissal pass over `host` after the configured delay.
    pub fn arm<C, H>(self, scheduler: &C, host: H)
    where
        C: Scheduler,
        H: AlertHost + 'static,
    {
        log::debug!("alerts: dismissing in {:?}", self.delay);
        let delay = self.delay;
        scheduler.schedule(
            delay,
            Box::new(move || {
                let report = self.dismiss_all(&host);
                log::debug!(
                    "alerts: faded={} skipped={} failed={}",
                    report.faded,
                    report.skipped,
                    report.failed
                );
            }),
        );
    }

    /// Fade every visible alert now and arrange for its removal.
    pub fn dismiss_all<H: AlertHost>(&self, host: &H) -> DismissReport {
        let mut report = DismissReport::default();
        let alerts = match host.alerts(&self.selector) {
            Ok(alerts) => alerts,
            Err(e) => {
                log::warn!("alerts: query {:?} failed: {e}", self.selector);
                return report;
            }
        };

        for alert in alerts {
            if alert.stage(&self.fade_out_class) != AlertStage::Visible {
                report.skipped += 1;
                continue;
            }
            match self.fade(&alert) {
                Ok(()) => report.faded += 1,
                Err(e) => {
                    log::warn!("alerts: could not dismiss alert: {e}");
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn fade<A: AlertNode>(&self, alert: &A) -> Result<(), UiError> {
        alert.add_class(&self.fade_out_class)?;
        let node = alert.clone();
        alert.on_transition_end(Box::new(move || node.remove()))
    }
}
