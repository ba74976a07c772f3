// ── Async action button ──
//
// Confirmation gate + remote call + notification + loading flag.
//
//   Idle ──run──▶ Loading ──Ok──▶ Idle   (invalidate, success notification)
//                        └─Err─▶ Idle   (failure notification)
//
// The loading flag is a `watch` channel so a front end can redraw the
// busy icon, and so a second trigger while loading is rejected without
// a lock.

use tokio::sync::watch;
use tracing::{info, warn};

use super::gate::{Confirmation, ConfirmGate, GateOutcome, Modifiers};
use super::kinds::Action;
use crate::error::CoreError;
use crate::notify::Notifications;
use crate::remote::{Invalidate, RemoteActions};

/// Result of clicking or confirming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Call [`ActionButton::run`].
    Fire,
    /// Show this prompt, then call `confirm` or `cancel`.
    Prompt(Confirmation),
    /// Disabled or nothing pending; no call will be issued.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIcon {
    Idle(&'static str),
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The subject's state does not allow the action.
    NotAllowed,
    /// The same button is already running.
    InFlight,
}

#[derive(Debug)]
pub enum ActionOutcome {
    Succeeded,
    /// The failure notification has been published.
    Failed(CoreError),
    Skipped(SkipReason),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

pub struct ActionButton<A: Action> {
    action: A,
    gate: ConfirmGate,
    loading: watch::Sender<bool>,
}

/// Clears the loading flag however `run` exits.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

impl<A: Action> ActionButton<A> {
    pub fn new(action: A) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            action,
            gate: ConfirmGate::new(),
            loading,
        }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn is_enabled(&self) -> bool {
        self.action.is_allowed() && !self.is_loading()
    }

    pub fn is_prompting(&self) -> bool {
        self.gate.is_open()
    }

    pub fn icon(&self) -> ButtonIcon {
        if self.is_loading() {
            ButtonIcon::Busy
        } else {
            ButtonIcon::Idle(self.action.icon())
        }
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Handle a click. Ungated actions fire directly; gated ones prompt
    /// unless shift is held.
    pub fn click(&mut self, modifiers: Modifiers) -> Trigger {
        if !self.is_enabled() {
            return Trigger::Ignored;
        }
        let Some(confirmation) = self.action.confirmation() else {
            return Trigger::Fire;
        };
        match self.gate.click(modifiers) {
            GateOutcome::Fire => Trigger::Fire,
            GateOutcome::Prompt => Trigger::Prompt(confirmation),
            GateOutcome::Ignored => Trigger::Ignored,
        }
    }

    pub fn confirm(&mut self) -> Trigger {
        match self.gate.confirm() {
            GateOutcome::Fire => Trigger::Fire,
            GateOutcome::Prompt | GateOutcome::Ignored => Trigger::Ignored,
        }
    }

    pub fn cancel(&mut self) {
        self.gate.cancel();
    }

    /// Issue the remote call and publish its outcome.
    ///
    /// No call is made when the precondition fails or the button is
    /// already loading. Failures are not retried.
    pub async fn run<R, I>(&self, remote: &R, notifications: &Notifications, cache: &I) -> ActionOutcome
    where
        R: RemoteActions,
        I: Invalidate,
    {
        if !self.action.is_allowed() {
            return ActionOutcome::Skipped(SkipReason::NotAllowed);
        }

        let acquired = self.loading.send_if_modified(|loading| {
            if *loading {
                false
            } else {
                *loading = true;
                true
            }
        });
        if !acquired {
            return ActionOutcome::Skipped(SkipReason::InFlight);
        }
        let guard = LoadingGuard(&self.loading);

        let result = self.action.execute(remote).await;
        drop(guard);

        match result {
            Ok(()) => {
                let message = self.action.success_message();
                info!(action = self.action.label(), "{message}");
                cache.invalidate(self.action.query_key());
                notifications.success(message);
                ActionOutcome::Succeeded
            }
            Err(e) => {
                let title = self.action.failure_title();
                warn!(action = self.action.label(), error = %e, "{title}");
                notifications.failure(title, &e);
                ActionOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::Notify;

    use super::*;
    use crate::action::kinds::{InstanceAction, InstanceLifecycle};
    use crate::model::{Instance, InstanceStatus, RemoteNetworkModel};
    use crate::notify::Severity;
    use crate::store::QueryKey;

    #[derive(Default)]
    struct FakeRemote {
        calls: Mutex<Vec<String>>,
        fail_with: Option<String>,
        /// When set, calls block until `release` is notified.
        hold: bool,
        entered: Notify,
        release: Notify,
    }

    impl FakeRemote {
        async fn record(&self, call: String) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(call);
            if self.hold {
                self.entered.notify_one();
                self.release.notified().await;
            }
            match &self.fail_with {
                Some(message) => Err(CoreError::OperationFailed {
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RemoteActions for FakeRemote {
        async fn start_instance(&self, name: &str) -> Result<(), CoreError> {
            self.record(format!("start({name})")).await
        }

        async fn stop_instance(&self, name: &str, force: bool) -> Result<(), CoreError> {
            self.record(format!("stop({name}, force={force})")).await
        }

        async fn restart_instance(&self, name: &str, force: bool) -> Result<(), CoreError> {
            self.record(format!("restart({name}, force={force})")).await
        }

        async fn freeze_instance(&self, name: &str) -> Result<(), CoreError> {
            self.record(format!("freeze({name})")).await
        }

        async fn unfreeze_instance(&self, name: &str) -> Result<(), CoreError> {
            self.record(format!("unfreeze({name})")).await
        }

        async fn create_network(&self, model: &RemoteNetworkModel) -> Result<(), CoreError> {
            self.record(format!("create({})", model.name)).await
        }

        async fn update_network(&self, model: &RemoteNetworkModel) -> Result<(), CoreError> {
            self.record(format!("update({})", model.name)).await
        }

        async fn delete_network(&self, name: &str) -> Result<(), CoreError> {
            self.record(format!("delete({name})")).await
        }
    }

    #[derive(Default)]
    struct RecordingCache(Mutex<Vec<QueryKey>>);

    impl Invalidate for RecordingCache {
        fn invalidate(&self, key: QueryKey) {
            self.0.lock().unwrap().push(key);
        }
    }

    fn stop_button(status: InstanceStatus) -> ActionButton<InstanceLifecycle> {
        ActionButton::new(InstanceLifecycle::new(
            &Instance::new("web-1", status),
            InstanceAction::Stop,
        ))
    }

    #[tokio::test]
    async fn shift_click_stop_end_to_end() {
        let remote = FakeRemote::default();
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let mut button = stop_button(InstanceStatus::Running);

        assert_eq!(button.click(Modifiers::SHIFT), Trigger::Fire);
        assert!(!button.is_prompting());
        let outcome = button.run(&remote, &notifications, &cache).await;

        assert!(outcome.is_success());
        assert_eq!(remote.calls(), vec!["stop(web-1, force=false)"]);
        assert_eq!(*cache.0.lock().unwrap(), vec![QueryKey::Instances]);
        let note = notifications.current().unwrap();
        assert_eq!(note.severity, Severity::Positive);
        assert!(note.message.contains("web-1"));
        assert!(!button.is_loading());
    }

    #[tokio::test]
    async fn plain_click_prompts_and_confirm_fires_once() {
        let remote = FakeRemote::default();
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let mut button = stop_button(InstanceStatus::Running);

        let trigger = button.click(Modifiers::NONE);
        assert!(matches!(trigger, Trigger::Prompt(ref c) if c.message.contains("web-1")));
        assert!(remote.calls().is_empty());

        assert_eq!(button.confirm(), Trigger::Fire);
        assert!(!button.is_prompting());
        button.run(&remote, &notifications, &cache).await;
        assert_eq!(button.confirm(), Trigger::Ignored);
        assert_eq!(remote.calls().len(), 1);
    }

    #[tokio::test]
    async fn cancel_issues_nothing() {
        let mut button = stop_button(InstanceStatus::Running);
        button.click(Modifiers::NONE);
        button.cancel();
        assert_eq!(button.confirm(), Trigger::Ignored);
    }

    #[tokio::test]
    async fn stop_disabled_unless_running() {
        let remote = FakeRemote::default();
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let mut button = stop_button(InstanceStatus::Stopped);

        assert!(!button.is_enabled());
        assert_eq!(button.click(Modifiers::SHIFT), Trigger::Ignored);
        let outcome = button.run(&remote, &notifications, &cache).await;

        assert!(matches!(outcome, ActionOutcome::Skipped(SkipReason::NotAllowed)));
        assert!(remote.calls().is_empty());
        assert!(notifications.current().is_none());
        assert!(cache.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_publishes_detail_without_invalidating() {
        let remote = FakeRemote {
            fail_with: Some("Failed shutting down instance".into()),
            ..FakeRemote::default()
        };
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let button = stop_button(InstanceStatus::Running);

        let outcome = button.run(&remote, &notifications, &cache).await;

        assert!(matches!(outcome, ActionOutcome::Failed(_)));
        let note = notifications.current().unwrap();
        assert_eq!(note.severity, Severity::Negative);
        assert_eq!(note.title, "Error on instance stop.");
        assert_eq!(note.message, "Failed shutting down instance");
        assert!(cache.0.lock().unwrap().is_empty());
        assert!(!button.is_loading());
        assert_eq!(button.icon(), ButtonIcon::Idle("power-off"));
    }

    #[tokio::test]
    async fn second_trigger_while_loading_is_ignored() {
        let remote = FakeRemote {
            hold: true,
            ..FakeRemote::default()
        };
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let button = stop_button(InstanceStatus::Running);

        let (first, second) = tokio::join!(button.run(&remote, &notifications, &cache), async {
            remote.entered.notified().await;
            assert!(button.is_loading());
            assert!(!button.is_enabled());
            assert_eq!(button.icon(), ButtonIcon::Busy);
            let second = button.run(&remote, &notifications, &cache).await;
            remote.release.notify_one();
            second
        });

        assert!(first.is_success());
        assert!(matches!(second, ActionOutcome::Skipped(SkipReason::InFlight)));
        assert_eq!(remote.calls().len(), 1);
        assert!(!button.is_loading());
    }

    #[tokio::test]
    async fn independent_buttons_do_not_block_each_other() {
        let remote = FakeRemote::default();
        let notifications = Notifications::new();
        let cache = RecordingCache::default();
        let stop = stop_button(InstanceStatus::Running);
        let start = ActionButton::new(InstanceLifecycle::new(
            &Instance::new("db-1", InstanceStatus::Stopped),
            InstanceAction::Start,
        ));

        let (a, b) = tokio::join!(
            stop.run(&remote, &notifications, &cache),
            start.run(&remote, &notifications, &cache)
        );

        assert!(a.is_success() && b.is_success());
        assert_eq!(remote.calls().len(), 2);
        assert_eq!(cache.0.lock().unwrap().len(), 2);
        // The slot holds whichever finished last.
        assert!(notifications.current().is_some());
    }
}
