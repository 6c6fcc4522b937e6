use std::sync::Arc;

use reelscript_core::ast::{RemoveTarget, Stmt};

use crate::scene::Scene;

#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    Continue,
    /// Resume after the `id <label>` line.
    Jump(i64),
    /// End the scene, naming the next one.
    Return(i64),
    /// The scene was closed under us.
    Stop,
}

/// Applies one statement to `scene`.
pub fn walk_stmt(scene: &Arc<Scene>, counter: &mut i64, stmt: &Stmt) -> NextAction {
    log::trace!("walk_stmt: {:?}", stmt);
    match stmt {
        Stmt::Add { scope, name, id, x, y, size, mode, .. } => {
            scene.add_character(*scope, name, id, *x, *y, *size, *mode);
            NextAction::Continue
        }
        Stmt::Remove { target, .. } => {
            match target {
                RemoveTarget::All => scene.remove_all(),
                RemoveTarget::Id(id) => scene.remove_character(id),
            }
            NextAction::Continue
        }
        Stmt::Move { id, x, y, speed, .. } => {
            scene.move_character(id, *x, *y, *speed);
            NextAction::Continue
        }
        Stmt::SetCharacter { id, state, .. } => {
            scene.set_character(id, state);
            NextAction::Continue
        }
        Stmt::SetBackground { name, .. } => {
            scene.set_background(name);
            NextAction::Continue
        }
        Stmt::SetOpacity { alpha, .. } => {
            scene.set_opacity(*alpha);
            NextAction::Continue
        }
        Stmt::SetSize { id, size, mode, .. } => {
            scene.resize_character(id, *size, *mode);
            NextAction::Continue
        }
        Stmt::Print { text, .. } => {
            scene.add_text(text);
            NextAction::Continue
        }
        Stmt::ClearText { .. } => {
            scene.clear_text();
            NextAction::Continue
        }
        Stmt::Wait { span, duration } => {
            if scene.sleep(*duration) {
                log::debug!("line {}: waited {} ms", span.line, duration.as_millis());
            } else {
                log::info!("line {}: wait interrupted", span.line);
            }
            NextAction::Continue
        }
        Stmt::Goto { label, condition, .. } => match condition {
            Some(cond) if !cond.holds(*counter) => NextAction::Continue,
            _ => NextAction::Jump(*label),
        },
        Stmt::Buttons { span, buttons } => {
            if buttons.is_empty() {
                log::warn!("line {}: button block without buttons, skipping", span.line);
                return NextAction::Continue;
            }
            for button in buttons {
                scene.add_button(&button.label, button.target);
            }
            let chosen = scene.wait_for_result();
            scene.destroy_buttons();
            match chosen {
                Some(target) => {
                    log::info!("button chose label {}", target);
                    NextAction::Jump(target)
                }
                None => NextAction::Stop,
            }
        }
        Stmt::Return { scene: next, .. } => NextAction::Return(*next),
        Stmt::Transition { direction, duration, .. } => {
            scene.spawn_transition(*direction, *duration);
            NextAction::Continue
        }
        Stmt::Counter { op, .. } => {
            *counter = op.apply(*counter);
            NextAction::Continue
        }
        Stmt::Label { .. } => NextAction::Continue,
        Stmt::Error { span, error } => {
            log::warn!("line {}: {}", span.line, error);
            NextAction::Continue
        }
    }
}
