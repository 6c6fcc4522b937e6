use std::io::{BufRead, stdin};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::renderer::Canvas;
use crate::scene::{ButtonView, Scene, SceneSnapshot};

/// Plays scenes on stdin/stdout: text lines are echoed as they appear,
/// button blocks are listed as numbered options.
#[derive(Default)]
pub struct TerminalCanvas {
    state: Arc<Mutex<TerminalState>>,
    input_started: AtomicBool,
}

#[derive(Default)]
struct TerminalState {
    scene: Option<Arc<Scene>>,
    shown: Shown,
}

/// What the terminal already printed for the installed scene.
#[derive(Debug, Default)]
pub struct Shown {
    text: Vec<String>,
    buttons: Vec<ButtonView>,
}

impl Shown {
    /// Lines to print so the terminal catches up with `snap`.
    pub fn update(&mut self, snap: &SceneSnapshot) -> Vec<String> {
        let mut out = Vec::new();

        if snap.text != self.text {
            let old = &self.text;
            let new = &snap.text;
            let overlap = (0..=old.len().min(new.len()))
                .rev()
                .find(|&n| old[old.len() - n..] == new[..n])
                .unwrap_or(0);
            out.extend(new[overlap..].iter().map(|line| line.trim_end().to_string()));
            self.text = new.clone();
        }

        if snap.buttons != self.buttons {
            let fresh = if snap.buttons.starts_with(&self.buttons) { self.buttons.len() } else { 0 };
            if fresh == 0 && !snap.buttons.is_empty() {
                out.push("--- choose (number, or `exit`) ---".to_string());
            }
            for (i, button) in snap.buttons.iter().enumerate().skip(fresh) {
                out.push(format!("  [{}] {}", i + 1, button.label));
            }
            self.buttons = snap.buttons.clone();
        }

        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Choose(u32),
    Invalid,
    Nothing,
}

/// Interprets one line of user input against the buttons on screen.
pub fn parse_command(line: &str, buttons: &[ButtonView]) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Nothing;
    }
    if trimmed.eq_ignore_ascii_case("exit") {
        return Command::Exit;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 && n <= buttons.len() => Command::Choose(buttons[n - 1].target),
        _ => Command::Invalid,
    }
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_input(&self) {
        if !self.input_started.swap(true, Ordering::SeqCst) {
            let state = Arc::clone(&self.state);
            crate::tasks::spawn("terminal-input", move || read_input(state));
        }
    }
}

fn current_scene(state: &Mutex<TerminalState>) -> Option<Arc<Scene>> {
    state.lock().ok().and_then(|s| s.scene.clone())
}

fn read_input(state: Arc<Mutex<TerminalState>>) {
    for line in stdin().lock().lines() {
        let Ok(line) = line else { break };
        let Some(scene) = current_scene(&state) else { continue };
        match parse_command(&line, &scene.snapshot().buttons) {
            Command::Exit => {
                scene.close();
                return;
            }
            Command::Choose(target) => {
                if !scene.set_result(i64::from(target)) {
                    println!("that choice is gone");
                }
            }
            Command::Invalid => println!("invalid"),
            Command::Nothing => {}
        }
    }
    log::info!("stdin closed");
    if let Some(scene) = current_scene(&state) {
        scene.close();
    }
}

impl Canvas for TerminalCanvas {
    fn install(&self, scene: Arc<Scene>) {
        if let Ok(mut state) = self.state.lock() {
            println!("=== scene {} ===", scene.id());
            state.scene = Some(scene);
            state.shown = Shown::default();
        }
        self.start_input();
    }

    fn request_repaint(&self) {
        let Ok(mut state) = self.state.lock() else { return };
        let Some(scene) = state.scene.clone() else { return };
        let snap = scene.snapshot();
        for line in state.shown.update(&snap) {
            println!("{}", line);
        }
    }

    fn finish(&self) {
        println!("=== the end ===");
    }
}
