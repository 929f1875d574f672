//! Per-action UI state shared by the page controllers.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ActionKind {
    Upload,
    Match,
    Suggest,
    Saliency,
    Export,
}

/// One phase per action plus the single error banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionLog {
    phases: BTreeMap<ActionKind, Phase>,
    error: Option<String>,
}

impl ActionLog {
    /// Enter `Loading` for `kind` and dismiss the banner.
    pub fn begin(&mut self, kind: ActionKind) {
        self.error = None;
        self.phases.insert(kind, Phase::Loading);
    }

    pub fn succeed(&mut self, kind: ActionKind) {
        self.phases.insert(kind, Phase::Success);
    }

    pub fn fail(&mut self, kind: ActionKind, message: impl Into<String>) {
        let message = message.into();
        self.phases.insert(kind, Phase::Failed(message.clone()));
        self.error = Some(message);
    }

    /// Local validation failure: no request was made.
    pub fn reject(&mut self, kind: ActionKind, message: impl Into<String>) {
        self.fail(kind, message);
    }

    pub fn phase(&self, kind: ActionKind) -> Phase {
        self.phases.get(&kind).cloned().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.phases.values().any(|p| *p == Phase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reset(&mut self) {
        self.phases.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_banner() {
        let mut log = ActionLog::default();
        log.fail(ActionKind::Match, "Matching failed. Try again.");
        assert_eq!(log.error(), Some("Matching failed. Try again."));

        log.begin(ActionKind::Suggest);
        assert_eq!(log.error(), None);
        assert!(log.is_loading());
        assert_eq!(
            log.phase(ActionKind::Match),
            Phase::Failed("Matching failed. Try again.".into())
        );
    }

    #[test]
    fn test_transitions() {
        let mut log = ActionLog::default();
        assert_eq!(log.phase(ActionKind::Upload), Phase::Idle);
        log.begin(ActionKind::Upload);
        log.succeed(ActionKind::Upload);
        assert!(!log.is_loading());
        assert_eq!(log.phase(ActionKind::Upload), Phase::Success);
        log.reset();
        assert_eq!(log.phase(ActionKind::Upload), Phase::Idle);
    }

    #[test]
    fn test_serializes() {
        let mut log = ActionLog::default();
        log.reject(ActionKind::Match, "nope");
        let json = serde_json::to_value(&log).expect("serialize");
        assert_eq!(json["error"], "nope");
        assert_eq!(json["phases"]["Match"]["Failed"], "nope");
    }
}
