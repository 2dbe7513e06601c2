/// The single deferred-exit continuation. At most one exists at a time because
/// it lives inside [`QuitPhase::QuitPending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingQuit {
    pub(crate) id: u64,
    pub(crate) exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum QuitPhase {
    #[default]
    Idle,
    Saving,
    QuitPending(PendingQuit),
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitDecision {
    Proceed,
    Defer(PendingQuit),
    AlreadyDeferred(PendingQuit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveFinishedOutcome {
    ReturnedToIdle,
    Ignored,
    CompleteQuit(PendingQuit),
}

#[derive(Debug, Default)]
pub(crate) struct QuitCoordinator {
    phase: QuitPhase,
    next_pending_id: u64,
}

impl QuitCoordinator {
    pub(crate) fn phase(&self) -> QuitPhase {
        self.phase
    }

    pub(crate) fn is_saving(&self) -> bool {
        matches!(self.phase, QuitPhase::Saving | QuitPhase::QuitPending(_))
    }

    pub(crate) fn is_quit_pending(&self) -> bool {
        matches!(self.phase, QuitPhase::QuitPending(_))
    }

    pub(crate) fn save_started(&mut self) {
        if self.phase == QuitPhase::Idle {
            self.phase = QuitPhase::Saving;
        }
    }

    pub(crate) fn save_finished(&mut self) -> SaveFinishedOutcome {
        match self.phase {
            QuitPhase::Saving => {
                self.phase = QuitPhase::Idle;
                SaveFinishedOutcome::ReturnedToIdle
            }
            QuitPhase::QuitPending(pending) => {
                self.phase = QuitPhase::Exiting;
                SaveFinishedOutcome::CompleteQuit(pending)
            }
            QuitPhase::Idle | QuitPhase::Exiting => SaveFinishedOutcome::Ignored,
        }
    }

    /// Handles one exit request. `notify` delivers the `will-quit` notice and
    /// runs before the decision is taken, once per request. The re-attempted
    /// exit issued after a completed deferral is not notified again.
    pub(crate) fn exit_requested<F>(&mut self, exit_code: i32, notify: F) -> ExitDecision
    where
        F: FnOnce(),
    {
        if self.phase == QuitPhase::Exiting {
            return ExitDecision::Proceed;
        }

        notify();

        match self.phase {
            QuitPhase::Idle | QuitPhase::Exiting => {
                self.phase = QuitPhase::Exiting;
                ExitDecision::Proceed
            }
            QuitPhase::Saving => {
                self.next_pending_id += 1;
                let pending = PendingQuit {
                    id: self.next_pending_id,
                    exit_code,
                };
                self.phase = QuitPhase::QuitPending(pending);
                ExitDecision::Defer(pending)
            }
            QuitPhase::QuitPending(pending) => ExitDecision::AlreadyDeferred(pending),
        }
    }

    pub(crate) fn quit_deadline_elapsed(&mut self, pending_id: u64) -> Option<PendingQuit> {
        match self.phase {
            QuitPhase::QuitPending(pending) if pending.id == pending_id => {
                self.phase = QuitPhase::Exiting;
                Some(pending)
            }
            _ => None,
        }
    }

    /// No window is left that could report the end of the save.
    pub(crate) fn save_host_lost(&mut self) -> Option<PendingQuit> {
        match self.phase {
            QuitPhase::Saving => {
                self.phase = QuitPhase::Idle;
                None
            }
            QuitPhase::QuitPending(pending) => {
                self.phase = QuitPhase::Exiting;
                Some(pending)
            }
            QuitPhase::Idle | QuitPhase::Exiting => None,
        }
    }
}
