use carwatch_core::prelude::{
    AlertHandle, AlertRequest, AlertResponse, NotificationSurface, WatchError, WatchResult,
};
use tokio::process::Command;

/// `notify-send` with actions; it blocks until the alert is closed.
#[derive(Debug, Clone)]
pub struct NotifySendSurface {
    program: String,
    urgency: String,
    expire_ms: u32,
}

impl NotifySendSurface {
    pub fn new() -> Self {
        Self {
            program: "notify-send".to_string(),
            urgency: "critical".to_string(),
            expire_ms: 6000,
        }
    }

    #[cfg(test)]
    fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    fn args(&self, request: &AlertRequest) -> Vec<String> {
        let mut args = vec![
            "-u".to_string(),
            self.urgency.clone(),
            "-t".to_string(),
            self.expire_ms.to_string(),
            "-p".to_string(),
        ];
        for (key, label) in &request.actions {
            args.push("-A".to_string());
            args.push(format!("{}={}", key, label));
        }
        if let Some(handle) = &request.replaces {
            args.push("-r".to_string());
            args.push(handle.0.clone());
        }
        args.push(request.title.clone());
        args.push(request.body.clone());
        args
    }
}

impl Default for NotifySendSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSurface for NotifySendSurface {
    async fn present(&self, request: &AlertRequest) -> WatchResult<AlertResponse> {
        let output = Command::new(&self.program)
            .args(self.args(request))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| WatchError::Notification(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(WatchError::Notification(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

/// First line is the notification id (`-p`), second the chosen action key.
fn parse_response(stdout: &str) -> WatchResult<AlertResponse> {
    let mut lines = stdout.lines().map(str::trim);
    let handle = lines
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| WatchError::Notification("notify-send printed no id".into()))?;
    let action = lines
        .next()
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    Ok(AlertResponse {
        handle: AlertHandle(handle.to_string()),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(replaces: Option<&str>) -> AlertRequest {
        AlertRequest {
            title: "Car found!".into(),
            body: "Kia Niro is 420m away".into(),
            actions: vec![
                ("open".into(), "Reserve".into()),
                ("stop".into(), "Stop looking".into()),
            ],
            replaces: replaces.map(|id| AlertHandle(id.into())),
        }
    }

    #[test]
    fn args_carry_actions_and_replacement_id() {
        let args = NotifySendSurface::new().args(&request(Some("17")));
        assert_eq!(
            args,
            vec![
                "-u",
                "critical",
                "-t",
                "6000",
                "-p",
                "-A",
                "open=Reserve",
                "-A",
                "stop=Stop looking",
                "-r",
                "17",
                "Car found!",
                "Kia Niro is 420m away",
            ]
        );
    }

    #[test]
    fn first_alert_has_no_replace_flag() {
        let args = NotifySendSurface::new().args(&request(None));
        assert!(!args.iter().any(|arg| arg == "-r"));
    }

    #[test]
    fn parses_id_and_action() {
        let response = parse_response("42\nreduce\n").unwrap();
        assert_eq!(response.handle, AlertHandle("42".into()));
        assert_eq!(response.action.as_deref(), Some("reduce"));
    }

    #[test]
    fn dismissed_alert_has_no_action() {
        let response = parse_response("42\n").unwrap();
        assert_eq!(response.action, None);
        assert!(parse_response("").is_err());
    }

    #[tokio::test]
    async fn missing_program_is_a_notification_error() {
        let surface = NotifySendSurface::new().with_program("/nonexistent/notify-send");
        let err = surface.present(&request(None)).await.unwrap_err();
        assert!(matches!(err, WatchError::Notification(_)));
    }

    fn is_running(pid: &str) -> bool {
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit(')')
                .next()
                .map(|rest| !matches!(rest.trim_start().chars().next(), Some('Z' | 'X')))
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    #[tokio::test]
    async fn abandoned_alert_kills_notify_send() {
        use std::os::unix::fs::PermissionsExt;
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = dir.path().join("notify-send");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho $$ > {}\nexec sleep 30\n", pid_file.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let surface = NotifySendSurface::new().with_program(script.to_str().unwrap());
        let req = request(None);
        let pending = tokio::time::timeout(Duration::from_millis(500), surface.present(&req));
        assert!(pending.await.is_err());

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();
        let mut running = true;
        for _ in 0..40 {
            running = is_running(pid);
            if !running {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(!running, "notify-send {} outlived the dropped alert", pid);
    }
}
