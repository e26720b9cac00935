use crate::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Succeeded,
    Failed,
    Reset,
}

impl SubmissionState {
    /// `Idle → Submitting → {Success, Failed}`, `Failed → Submitting`,
    /// and `Reset` back to `Idle` from any settled state.
    pub fn transition(self, event: SubmissionEvent) -> Result<Self, SessionError> {
        use SubmissionEvent as E;
        use SubmissionState as S;

        match (self, event) {
            (S::Submitting, E::Submit) => Err(SessionError::SubmissionInFlight),
            (S::Idle | S::Failed, E::Submit) => Ok(S::Submitting),
            (S::Submitting, E::Succeeded) => Ok(S::Success),
            (S::Submitting, E::Failed) => Ok(S::Failed),
            (S::Idle | S::Success | S::Failed, E::Reset) => Ok(S::Idle),
            (state, event) => Err(SessionError::InvalidTransition { state, event }),
        }
    }

    pub fn is_submitting(self) -> bool {
        self == SubmissionState::Submitting
    }
}
