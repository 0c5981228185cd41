//! In-memory stand-ins for the browser: root element, storage, alerts and a
//! manually advanced clock.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::alert::{AlertHost, AlertNode, AlertStage, Scheduler};
use crate::error::UiError;
use crate::theme::{KeyValueStore, ThemeRoot};

// =============================================================================
// THEME
// =============================================================================

#[derive(Clone, Default)]
pub struct FakeRoot {
    attrs: Rc<RefCell<HashMap<String, String>>>,
    pub reject_writes: Rc<Cell<bool>>,
}

impl FakeRoot {
    pub fn with_attribute(name: &str, value: &str) -> Self {
        let root = Self::default();
        root.attrs.borrow_mut().insert(name.to_owned(), value.to_owned());
        root
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.attrs.borrow().get(name).cloned()
    }
}

impl ThemeRoot for FakeRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), UiError> {
        if self.reject_writes.get() {
            return Err(UiError::Dom("attribute write rejected".to_owned()));
        }
        self.attrs.borrow_mut().insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    pub fail_reads: Rc<Cell<bool>>,
    pub fail_writes: Rc<Cell<bool>>,
    pub writes: Rc<Cell<usize>>,
}

impl FakeStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for FakeStore {
    fn get(&self, key: &str) -> Result<Option<String>, UiError> {
        if self.fail_reads.get() {
            return Err(UiError::StorageUnavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        if self.fail_writes.get() {
            return Err(UiError::Storage("quota exceeded".to_owned()));
        }
        self.writes.set(self.writes.get() + 1);
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================================
// CLOCK
// =============================================================================

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct ClockState {
    now: Duration,
    pending: Vec<(Duration, Task)>,
}

/// Scheduler whose time only moves through [`FakeClock::advance`].
#[derive(Clone, Default)]
pub struct FakeClock {
    state: Rc<RefCell<ClockState>>,
}

impl FakeClock {
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move time forward and run every task that has come due, in due order.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= target)
                    .min_by_key(|(_, (at, _))| *at)
                    .map(|(idx, _)| idx);
                due.map(|idx| {
                    let (at, task) = state.pending.remove(idx);
                    state.now = at;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for FakeClock {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let at = state.now + delay;
        state.pending.push((at, task));
    }
}

// =============================================================================
// ALERTS
// =============================================================================

struct AlertState {
    classes: Vec<String>,
    handlers: Vec<Task>,
    connected: bool,
    has_transition: bool,
    reject_classes: bool,
    remove_calls: usize,
}

#[derive(Clone)]
pub struct FakeAlert {
    state: Rc<RefCell<AlertState>>,
}

impl FakeAlert {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(AlertState {
                classes: vec!["alert".to_owned()],
                handlers: Vec::new(),
                connected: true,
                has_transition: true,
                reject_classes: false,
                remove_calls: 0,
            })),
        }
    }

    /// An alert whose stylesheet defines no fade transition.
    pub fn without_transition() -> Self {
        let alert = Self::new();
        alert.state.borrow_mut().has_transition = false;
        alert
    }

    pub fn rejecting_classes() -> Self {
        let alert = Self::new();
        alert.state.borrow_mut().reject_classes = true;
        alert
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.state.borrow().classes.iter().filter(|c| *c == class).count()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().connected
    }

    pub fn listeners(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    pub fn remove_calls(&self) -> usize {
        self.state.borrow().remove_calls
    }

    /// Dispatch a synthetic transition-end event. Listeners are one-shot, so
    /// they are dropped once they run. Alerts without a transition never
    /// dispatch.
    pub fn end_transition(&self) {
        let handlers = {
            let mut state = self.state.borrow_mut();
            if !state.has_transition || !state.connected {
                return;
            }
            std::mem::take(&mut state.handlers)
        };
        for handler in handlers {
            handler();
        }
    }
}

impl AlertNode for FakeAlert {
    fn stage(&self, fade_out_class: &str) -> AlertStage {
        let state = self.state.borrow();
        if !state.connected {
            AlertStage::Removed
        } else if state.classes.iter().any(|c| c == fade_out_class) {
            AlertStage::Fading
        } else {
            AlertStage::Visible
        }
    }

    fn add_class(&self, class: &str) -> Result<(), UiError> {
        let mut state = self.state.borrow_mut();
        if state.reject_classes {
            return Err(UiError::Dom("class list rejected token".to_owned()));
        }
        state.classes.push(class.to_owned());
        Ok(())
    }

    fn on_transition_end(&self, handler: Box<dyn FnOnce()>) -> Result<(), UiError> {
        self.state.borrow_mut().handlers.push(handler);
        Ok(())
    }

    fn remove(&self) {
        let mut state = self.state.borrow_mut();
        state.remove_calls += 1;
        state.connected = false;
    }
}

/// A document holding a fixed set of alerts; removed alerts drop out of queries.
#[derive(Clone, Default)]
pub struct FakeDocument {
    alerts: Rc<RefCell<Vec<FakeAlert>>>,
    pub fail_queries: Rc<Cell<bool>>,
    pub queries: Rc<Cell<usize>>,
}

impl FakeDocument {
    pub fn with_alerts(alerts: &[FakeAlert]) -> Self {
        let doc = Self::default();
        doc.alerts.borrow_mut().extend(alerts.iter().cloned());
        doc
    }
}

impl AlertHost for FakeDocument {
    type Alert = FakeAlert;

    fn alerts(&self, _selector: &str) -> Result<Vec<FakeAlert>, UiError> {
        self.queries.set(self.queries.get() + 1);
        if self.fail_queries.get() {
            return Err(UiError::Dom("invalid selector".to_owned()));
        }
        Ok(self.alerts.borrow().iter().filter(|a| a.is_connected()).cloned().collect())
    }
}
