use crate::types::Command;

/// Single-slot command mailbox
///
/// Input writes, the clock reads. A new command overwrites an unread one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandSlot {
    pending: Option<Command>,
}

impl CommandSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `command`, returning the unread command it replaced
    pub fn latch(&mut self, command: Command) -> Option<Command> {
        self.pending.replace(command)
    }

    pub fn take(&mut self) -> Option<Command> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Command> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
