use crate::config::BarConfig;
use crate::ui::Msg;
use crate::ui::model::{Model, initial_model};
use anyhow::{Result, anyhow};
use bubbletea_rs::{
    Program, command::Cmd, event::KeyMsg, event::WindowSizeMsg, model::Model as TeaModel,
    window_size,
};
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::OnceCell;
use tracing::debug;

// Program::builder constructs the model through TeaModel::init, which
// takes no arguments, so the prepared model is parked here first.
static INITIAL: OnceCell<Model> = OnceCell::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Update(Msg),
    Quit,
}

/// Maps a key press to an action. Unbound keys give `None`.
pub fn translate_key(key: &KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Up => Some(Action::Update(Msg::KeyUp)),
        KeyCode::Down => Some(Action::Update(Msg::KeyDown)),
        KeyCode::Home => Some(Action::Update(Msg::KeyHome)),
        KeyCode::End => Some(Action::Update(Msg::KeyEnd)),
        // some terminals deliver Esc and Ctrl-C as raw control characters
        KeyCode::Char('\u{1b}') | KeyCode::Char('\u{03}') => Some(Action::Quit),
        KeyCode::Char(ch) if modifiers.contains(KeyModifiers::CONTROL) => match ch {
            'c' | 'C' => Some(Action::Quit),
            'n' | 'N' => Some(Action::Update(Msg::KeyDown)),
            'p' | 'P' => Some(Action::Update(Msg::KeyUp)),
            _ => None,
        },
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

struct TeaAdapter {
    inner: Model,
}

impl TeaModel for TeaAdapter {
    fn init() -> (Self, Option<Cmd>) {
        let mut inner = INITIAL
            .get()
            .cloned()
            .unwrap_or_else(|| initial_model(Vec::new(), &BarConfig::default()));
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        inner.update(Msg::WindowSize {
            width: width as usize,
            height: height as usize,
        });
        (TeaAdapter { inner }, Some(window_size()))
    }

    fn update(&mut self, msg: bubbletea_rs::event::Msg) -> Option<Cmd> {
        if let Some(km) = msg.downcast_ref::<KeyMsg>() {
            match translate_key(&km.key, km.modifiers) {
                Some(Action::Quit) => return Some(bubbletea_rs::quit()),
                Some(Action::Update(m)) => self.inner.update(m),
                None => {}
            }
            return None;
        }
        if let Some(ws) = msg.downcast_ref::<WindowSizeMsg>() {
            self.inner.update(Msg::WindowSize {
                width: ws.width as usize,
                height: ws.height as usize,
            });
        }
        None
    }

    fn view(&self) -> String {
        self.inner.render_full()
    }
}

/// Runs the inspector until the user quits. Can only be started once per
/// process.
pub async fn run(model: Model) -> Result<()> {
    debug!(files = model.files.len(), "starting inspector");
    INITIAL
        .set(model)
        .map_err(|_| anyhow!("inspector already started"))?;

    let program = Program::<TeaAdapter>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .map_err(|e| anyhow!("failed to build program: {e:?}"))?;
    program
        .run()
        .await
        .map_err(|e| anyhow!("program error: {e:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(translate_key(&KeyCode::Esc, none), Some(Action::Quit));
        assert_eq!(translate_key(&KeyCode::Char('q'), none), Some(Action::Quit));
        assert_eq!(
            translate_key(&KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(translate_key(&KeyCode::Char('\u{03}'), none), Some(Action::Quit));
    }

    #[test]
    fn movement_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            translate_key(&KeyCode::Up, none),
            Some(Action::Update(Msg::KeyUp))
        );
        assert_eq!(
            translate_key(&KeyCode::Char('n'), KeyModifiers::CONTROL),
            Some(Action::Update(Msg::KeyDown))
        );
        assert_eq!(
            translate_key(&KeyCode::Char('p'), KeyModifiers::CONTROL),
            Some(Action::Update(Msg::KeyUp))
        );
        assert_eq!(translate_key(&KeyCode::Char('x'), none), None);
        assert_eq!(translate_key(&KeyCode::Char('q'), KeyModifiers::CONTROL), None);
    }
}
