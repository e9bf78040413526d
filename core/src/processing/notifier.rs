use crate::math::ladder::human_distance;
use crate::prelude::{AlertHandle, AlertRequest, NotificationSurface, Vehicle, WatchResult};
use log::{debug, warn};

pub const ALERT_TITLE: &str = "Car found!";

/// Actions offered on an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Open,
    Reduce,
    Stop,
}

impl AlertAction {
    pub fn key(self) -> &'static str {
        match self {
            AlertAction::Open => "open",
            AlertAction::Reduce => "reduce",
            AlertAction::Stop => "stop",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "open" => Some(AlertAction::Open),
            "reduce" => Some(AlertAction::Reduce),
            "stop" => Some(AlertAction::Stop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierState {
    Idle,
    Alerting,
}

/// What the poll loop should do after an alert closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    Open,
    Reduce(u32),
    Stop,
    Dismissed,
}

/// Tracks the alert currently on screen so the next one replaces it.
#[derive(Debug, Default)]
pub struct NotificationController {
    active: Option<AlertHandle>,
    last_action: Option<AlertAction>,
}

impl NotificationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NotifierState {
        if self.active.is_some() {
            NotifierState::Alerting
        } else {
            NotifierState::Idle
        }
    }

    pub fn active_handle(&self) -> Option<&AlertHandle> {
        self.active.as_ref()
    }

    pub fn last_action(&self) -> Option<AlertAction> {
        self.last_action
    }

    /// Builds the alert for `vehicle`; `reduce` is only offered with a rung.
    pub fn build_request(&self, vehicle: &Vehicle, next_radius: Option<u32>) -> AlertRequest {
        let mut actions = vec![
            (AlertAction::Open.key().to_string(), "Reserve".to_string()),
            (AlertAction::Stop.key().to_string(), "Stop looking".to_string()),
        ];
        if let Some(radius) = next_radius {
            actions.push((
                AlertAction::Reduce.key().to_string(),
                format!("Reduce radius to {}", human_distance(radius)),
            ));
        }

        AlertRequest {
            title: ALERT_TITLE.to_string(),
            body: format!(
                "{} {} is {}m away",
                vehicle.brand,
                vehicle.model,
                vehicle.distance_m.floor() as u64
            ),
            actions,
            replaces: self.active.clone(),
        }
    }

    /// Shows (or replaces) the alert and waits for the user's answer.
    pub async fn alert<S: NotificationSurface>(
        &mut self,
        surface: &S,
        vehicle: &Vehicle,
        next_radius: Option<u32>,
    ) -> WatchResult<AlertOutcome> {
        let request = self.build_request(vehicle, next_radius);
        let response = surface.present(&request).await?;
        debug!(
            "Alert {} answered with {:?}",
            response.handle, response.action
        );

        self.active = Some(response.handle);
        let action = response.action.as_deref().and_then(AlertAction::from_key);

        let outcome = match (action, next_radius) {
            (Some(AlertAction::Open), _) => AlertOutcome::Open,
            (Some(AlertAction::Stop), _) => AlertOutcome::Stop,
            (Some(AlertAction::Reduce), Some(radius)) => AlertOutcome::Reduce(radius),
            (Some(AlertAction::Reduce), None) => {
                warn!("Reduce requested but no smaller radius was offered");
                AlertOutcome::Dismissed
            }
            (None, _) => AlertOutcome::Dismissed,
        };
        self.last_action = match outcome {
            AlertOutcome::Dismissed => None,
            _ => action,
        };
        Ok(outcome)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::prelude::{
        AlertHandle, AlertRequest, AlertResponse, NotificationSurface, WatchError, WatchResult,
    };
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Surface that answers from a script and records every request.
    #[derive(Default)]
    pub struct ScriptedSurface {
        answers: RefCell<VecDeque<Option<&'static str>>>,
        pub requests: RefCell<Vec<AlertRequest>>,
        fail: bool,
    }

    impl ScriptedSurface {
        pub fn answering(answers: &[Option<&'static str>]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    impl NotificationSurface for ScriptedSurface {
        async fn present(&self, request: &AlertRequest) -> WatchResult<AlertResponse> {
            if self.fail {
                return Err(WatchError::Notification("notify-send missing".into()));
            }
            let mut requests = self.requests.borrow_mut();
            requests.push(request.clone());
            let action = self.answers.borrow_mut().pop_front().flatten();
            Ok(AlertResponse {
                handle: AlertHandle(format!("H{}", requests.len())),
                action: action.map(str::to_string),
            })
        }
    }
}
