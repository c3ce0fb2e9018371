use std::collections::VecDeque;

use glam::{Quat, Vec3};
use stagehand_common::pose::validate_rotation;
use stagehand_common::{CommandScope, MathError, Pose, TransformKind};

use crate::command::TransformCommand;

/// Counts from one [`TransformBuffer::drain_into`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    pub applied: usize,
    pub skipped: usize,
}

/// FIFO queue of pending transform requests for one pose owner.
///
/// Commands accumulate until [`TransformBuffer::drain_into`] folds them, in
/// enqueue order, into a pose. The pose is written once at the end of the
/// drain, so heading and up never reflect a half-applied queue.
#[derive(Debug, Clone, Default)]
pub struct TransformBuffer {
    queue: VecDeque<TransformCommand>,
}

impl TransformBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command. Rotation payloads that are not a usable
    /// quaternion are rejected here so the drain cannot fail.
    pub fn push(&mut self, command: TransformCommand) -> Result<(), MathError> {
        if command.kind == TransformKind::Rotation && !command.scope.is_ignored() {
            validate_rotation(command.quat())?;
        }
        self.queue.push_back(command);
        Ok(())
    }

    pub fn push_position(&mut self, value: Vec3, scope: CommandScope) {
        self.queue.push_back(TransformCommand::position(value, scope));
    }

    pub fn push_scale(&mut self, value: Vec3, scope: CommandScope) {
        self.queue.push_back(TransformCommand::scale(value, scope));
    }

    pub fn push_rotation(&mut self, value: Quat, scope: CommandScope) -> Result<(), MathError> {
        self.push(TransformCommand::rotation(value, scope))
    }

    /// Next command to be applied, if any.
    pub fn peek(&self) -> Option<&TransformCommand> {
        self.queue.front()
    }

    pub fn pop(&mut self) -> Option<TransformCommand> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformCommand> {
        self.queue.iter()
    }

    /// Empty the queue into `pose`.
    ///
    /// Absolute commands overwrite the running value for their kind,
    /// Relative commands add (position, scale) or compose
    /// `normalize(current * payload)` (rotation), Ignore and `None`-kind
    /// commands are dropped.
    pub fn drain_into(&mut self, pose: &mut Pose) -> DrainSummary {
        let mut summary = DrainSummary::default();
        let mut position = pose.position();
        let mut scale = pose.scale();
        let mut rotation = pose.rotation();
        let mut rotated = false;

        while let Some(command) = self.queue.pop_front() {
            let absolute = match command.scope {
                CommandScope::Absolute => true,
                CommandScope::Relative => false,
                CommandScope::Ignore => {
                    tracing::trace!(?command, "skipping transform command");
                    summary.skipped += 1;
                    continue;
                }
            };
            match command.kind {
                TransformKind::Position if absolute => position = command.vector(),
                TransformKind::Position => position += command.vector(),
                TransformKind::Scale if absolute => scale = command.vector(),
                TransformKind::Scale => scale += command.vector(),
                TransformKind::Rotation => {
                    rotation = if absolute {
                        command.quat()
                    } else {
                        (rotation * command.quat()).normalize()
                    };
                    rotated = true;
                }
                TransformKind::None => {
                    tracing::trace!(?command, "skipping transform command");
                    summary.skipped += 1;
                    continue;
                }
            }
            tracing::trace!(?command, "applied transform command");
            summary.applied += 1;
        }

        pose.set_position(position);
        pose.set_scale(scale);
        if rotated {
            if let Err(e) = pose.set_rotation(rotation) {
                tracing::warn!("dropping drained rotation: {e}");
            }
        }
        summary
    }
}
