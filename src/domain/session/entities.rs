use super::{SessionError, SessionMode, SessionSnapshot};
use crate::domain::capture::{CaptureError, CapturedPhoto};
use crate::domain::upload::{PhotoLabel, UploadError};
use tracing::{debug, info, warn};

/// 内部状態。写真は Preview と Uploading の状態だけが所有する。
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Idle,
    Live,
    Preview {
        photo: CapturedPhoto,
        label_confirmed: bool,
    },
    Uploading {
        photo: CapturedPhoto,
    },
}

impl SessionState {
    fn mode(&self) -> SessionMode {
        match self {
            Self::Idle => SessionMode::Idle,
            Self::Live => SessionMode::Live,
            Self::Preview { .. } => SessionMode::Preview,
            Self::Uploading { .. } => SessionMode::Uploading,
        }
    }
}

/// キャプチャセッションの状態機械
///
/// すべての遷移はガード付きで、現在のモードで許されないイベントは
/// [`SessionError::InvalidTransition`] として拒否される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStateMachine {
    state: SessionState,
    label: PhotoLabel,
    last_error: Option<String>,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            label: PhotoLabel::default(),
            last_error: None,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode()
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        match &self.state {
            SessionState::Preview { photo, .. } | SessionState::Uploading { photo } => Some(photo),
            SessionState::Idle | SessionState::Live => None,
        }
    }

    pub fn label(&self) -> &PhotoLabel {
        &self.label
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 命名ダイアログを表示すべきか
    pub fn naming_visible(&self) -> bool {
        matches!(
            self.state,
            SessionState::Preview {
                label_confirmed: false,
                ..
            }
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode(),
            photo_uri: self.photo().map(|p| p.uri.clone()),
            label: self.label.title().to_string(),
            naming_visible: self.naming_visible(),
            last_error: self.last_error.clone(),
        }
    }

    /// Idle → Live。許可がなければ Idle のまま。
    pub fn activate(&mut self, permission_granted: bool) -> Result<(), SessionError> {
        self.guard("activate the camera", SessionMode::Idle)?;

        if !permission_granted {
            warn!("Camera permission denied");
            self.last_error = Some(SessionError::PermissionDenied.to_string());
            return Err(SessionError::PermissionDenied);
        }

        self.last_error = None;
        self.transition(SessionState::Live);
        Ok(())
    }

    /// Live → Idle
    pub fn close_camera(&mut self) -> Result<(), SessionError> {
        self.guard("close the camera", SessionMode::Live)?;
        self.transition(SessionState::Idle);
        Ok(())
    }

    /// 撮影を開始できるか確認する
    pub fn ensure_can_capture(&self) -> Result<(), SessionError> {
        self.guard("capture", SessionMode::Live)
    }

    /// 撮影結果を反映する。失敗時はカメラを開いたまま Live に留まる。
    pub fn complete_capture(
        &mut self,
        outcome: Result<CapturedPhoto, CaptureError>,
    ) -> Result<(), SessionError> {
        self.ensure_can_capture()?;

        match outcome {
            Ok(photo) => {
                info!(handle = %photo.handle, uri = %photo.uri, "Photo captured");
                self.label = PhotoLabel::default();
                self.last_error = None;
                self.transition(SessionState::Preview {
                    photo,
                    label_confirmed: false,
                });
                Ok(())
            }
            Err(e) => {
                warn!("Capture failed: {}", e);
                self.last_error = Some(e.to_string());
                Err(SessionError::CaptureFailed(e))
            }
        }
    }

    /// Preview → Idle。写真を破棄しラベルを初期値に戻す。
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.guard("cancel", SessionMode::Preview)?;
        self.label = PhotoLabel::default();
        self.last_error = None;
        self.transition(SessionState::Idle);
        Ok(())
    }

    /// Preview 中にタイトルを確定する
    pub fn confirm_label(&mut self, title: &str) -> Result<(), SessionError> {
        match &mut self.state {
            SessionState::Preview {
                label_confirmed, ..
            } => {
                self.label = PhotoLabel::new(title);
                *label_confirmed = true;
                debug!(label = %self.label, "Label confirmed");
                Ok(())
            }
            other => Err(SessionError::InvalidTransition {
                action: "confirm a label",
                mode: other.mode(),
            }),
        }
    }

    /// Preview → Uploading。送信する写真とラベルを返す。
    ///
    /// ラベルが正規化できなければ Preview に留まり、命名ステップを再表示する。
    pub fn begin_upload(&mut self) -> Result<(CapturedPhoto, PhotoLabel), SessionError> {
        let mode = self.mode();
        let SessionState::Preview {
            photo,
            label_confirmed,
        } = &mut self.state
        else {
            return Err(SessionError::InvalidTransition {
                action: "upload",
                mode,
            });
        };

        if let Err(e) = self.label.normalize() {
            warn!(label = %self.label, "Rejecting upload: {}", e);
            *label_confirmed = false;
            self.last_error = Some(e.to_string());
            return Err(SessionError::InvalidLabel(e.to_string()));
        }

        let photo = photo.clone();
        self.last_error = None;
        self.transition(SessionState::Uploading {
            photo: photo.clone(),
        });
        Ok((photo, self.label.clone()))
    }

    /// 送信結果を反映する。成功で Idle、失敗で写真とラベルを保ったまま Preview。
    pub fn complete_upload(&mut self, outcome: Result<(), UploadError>) -> Result<(), SessionError> {
        let mode = self.mode();
        let SessionState::Uploading { photo } = &self.state else {
            return Err(SessionError::InvalidTransition {
                action: "complete an upload",
                mode,
            });
        };

        match outcome {
            Ok(()) => {
                info!(label = %self.label, "Upload completed");
                self.label = PhotoLabel::default();
                self.last_error = None;
                self.transition(SessionState::Idle);
                Ok(())
            }
            Err(e) => {
                warn!(label = %self.label, "Upload failed: {}", e);
                let photo = photo.clone();
                let label_confirmed = !matches!(e, UploadError::InvalidLabel(_));
                self.last_error = Some(e.to_string());
                self.transition(SessionState::Preview {
                    photo,
                    label_confirmed,
                });
                Err(SessionError::Upload(e))
            }
        }
    }

    fn guard(&self, action: &'static str, expected: SessionMode) -> Result<(), SessionError> {
        let mode = self.mode();
        if mode == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { action, mode })
        }
    }

    fn transition(&mut self, next: SessionState) {
        let from = self.mode();
        self.state = next;
        debug!(from = %from, to = %self.mode(), "Session transition");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(machine: &SessionStateMachine) {
        assert_eq!(machine.mode().holds_photo(), machine.photo().is_some());
    }

    fn previewing() -> SessionStateMachine {
        let mut machine = SessionStateMachine::new();
        machine.activate(true).unwrap();
        machine
            .complete_capture(Ok(CapturedPhoto::new("captures/one.jpg")))
            .unwrap();
        machine
    }

    #[test]
    fn test_initial_state() {
        let machine = SessionStateMachine::new();
        assert_eq!(machine.mode(), SessionMode::Idle);
        assert_eq!(machine.label().title(), "Untitled");
        assert!(!machine.naming_visible());
        assert_invariant(&machine);
    }

    #[test]
    fn test_permission_denied_stays_idle() {
        let mut machine = SessionStateMachine::new();
        let result = machine.activate(false);
        assert!(matches!(result, Err(SessionError::PermissionDenied)));
        assert_eq!(machine.mode(), SessionMode::Idle);
        assert!(machine.last_error().is_some());
        assert_invariant(&machine);

        machine.activate(true).unwrap();
        assert_eq!(machine.mode(), SessionMode::Live);
        assert!(machine.last_error().is_none());
    }

    #[test]
    fn test_capture_moves_to_preview() {
        let machine = previewing();
        assert_eq!(machine.mode(), SessionMode::Preview);
        assert_eq!(machine.photo().unwrap().uri, "captures/one.jpg");
        assert!(machine.naming_visible());
        assert_invariant(&machine);
    }

    #[test]
    fn test_capture_failure_stays_live() {
        let mut machine = SessionStateMachine::new();
        machine.activate(true).unwrap();

        let result = machine.complete_capture(Err(CaptureError::DeviceBusy));
        assert!(matches!(result, Err(SessionError::CaptureFailed(_))));
        assert_eq!(machine.mode(), SessionMode::Live);
        assert!(machine.photo().is_none());
        assert_invariant(&machine);
    }

    #[test]
    fn test_capture_rejected_while_photo_pending() {
        let mut machine = previewing();
        let result = machine.complete_capture(Ok(CapturedPhoto::new("captures/two.jpg")));
        assert!(matches!(
            result,
            Err(SessionError::InvalidTransition {
                mode: SessionMode::Preview,
                ..
            })
        ));
        assert_eq!(machine.photo().unwrap().uri, "captures/one.jpg");
    }

    #[test]
    fn test_cancel_discards_photo() {
        let mut machine = previewing();
        machine.confirm_label("Holiday").unwrap();
        machine.cancel().unwrap();

        assert_eq!(machine.mode(), SessionMode::Idle);
        assert!(machine.photo().is_none());
        assert_eq!(machine.label().title(), "Untitled");
        assert_invariant(&machine);
    }

    #[test]
    fn test_close_camera() {
        let mut machine = SessionStateMachine::new();
        machine.activate(true).unwrap();
        machine.close_camera().unwrap();
        assert_eq!(machine.mode(), SessionMode::Idle);

        assert!(machine.close_camera().is_err());
    }

    #[test]
    fn test_confirm_label_is_reentrant() {
        let mut machine = previewing();
        machine.confirm_label("First").unwrap();
        assert!(!machine.naming_visible());
        machine.confirm_label("Second").unwrap();

        assert_eq!(machine.mode(), SessionMode::Preview);
        assert_eq!(machine.label().title(), "Second");
        assert_invariant(&machine);
    }

    #[test]
    fn test_confirm_label_outside_preview() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.confirm_label("Nope").is_err());
        assert_eq!(machine.label().title(), "Untitled");
    }

    #[test]
    fn test_upload_success_resets_to_idle() {
        let mut machine = previewing();
        machine.confirm_label("My Photo").unwrap();

        let (photo, label) = machine.begin_upload().unwrap();
        assert_eq!(photo.uri, "captures/one.jpg");
        assert_eq!(label.title(), "My Photo");
        assert_eq!(machine.mode(), SessionMode::Uploading);
        assert_invariant(&machine);

        machine.complete_upload(Ok(())).unwrap();
        assert_eq!(machine.mode(), SessionMode::Idle);
        assert!(machine.photo().is_none());
        assert_eq!(machine.label().title(), "Untitled");
        assert_invariant(&machine);
    }

    #[test]
    fn test_upload_failure_returns_to_preview() {
        let mut machine = previewing();
        machine.confirm_label("Test").unwrap();
        machine.begin_upload().unwrap();

        let result = machine.complete_upload(Err(UploadError::ServerRejected {
            status: 500,
            message: "disk full".to_string(),
        }));
        assert!(matches!(result, Err(SessionError::Upload(_))));
        assert_eq!(machine.mode(), SessionMode::Preview);
        assert_eq!(machine.photo().unwrap().uri, "captures/one.jpg");
        assert_eq!(machine.label().title(), "Test");
        assert!(!machine.naming_visible());
        assert!(machine.last_error().unwrap().contains("500"));
        assert_invariant(&machine);
    }

    #[test]
    fn test_invalid_label_stays_in_preview() {
        let mut machine = previewing();
        machine.confirm_label("   ").unwrap();
        assert!(!machine.naming_visible());

        let result = machine.begin_upload();
        assert!(matches!(result, Err(SessionError::InvalidLabel(_))));
        assert_eq!(machine.mode(), SessionMode::Preview);
        assert!(machine.naming_visible());
        assert_invariant(&machine);
    }

    #[test]
    fn test_concurrent_upload_rejected() {
        let mut machine = previewing();
        machine.begin_upload().unwrap();

        assert!(matches!(
            machine.begin_upload(),
            Err(SessionError::InvalidTransition {
                mode: SessionMode::Uploading,
                ..
            })
        ));
        assert!(machine.cancel().is_err());
        assert_eq!(machine.mode(), SessionMode::Uploading);
    }

    #[test]
    fn test_complete_upload_requires_uploading() {
        let mut machine = previewing();
        assert!(machine.complete_upload(Ok(())).is_err());
        assert_eq!(machine.mode(), SessionMode::Preview);
    }

    #[test]
    fn test_snapshot() {
        let mut machine = previewing();
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.mode, SessionMode::Preview);
        assert_eq!(snapshot.photo_uri.as_deref(), Some("captures/one.jpg"));
        assert!(snapshot.naming_visible);

        machine.cancel().unwrap();
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.mode, SessionMode::Idle);
        assert!(snapshot.photo_uri.is_none());
    }
}
