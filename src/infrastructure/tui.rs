pub mod event_source;
pub mod real;

use std::future::Future;
use std::pin::Pin;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;

pub type IO = std::io::Stdout;
pub fn io() -> IO {
    std::io::stdout()
}
pub type Frame<'a> = ratatui::Frame<'a>;

/// Input the host reacts to. Anything else the terminal reports is dropped
/// before it reaches the runner.
#[derive(Clone, Debug)]
pub enum Event {
    /// Reading the terminal failed; surfaced as an error notification.
    Error,
    /// The terminal input stream ended.
    Closed,
    Tick,
    Render,
    /// Key press (releases and repeats are filtered out).
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Terminal surface the runner draws on and pulls input events from.
pub trait TuiLike: Send {
    fn enter(&mut self) -> Result<()>;
    fn exit(&mut self) -> Result<()>;
    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()>;
    fn resize(&mut self, area: ratatui::prelude::Rect) -> Result<()>;
    fn next(&mut self) -> Pin<Box<dyn Future<Output = Option<Event>> + Send + '_>>;
}
