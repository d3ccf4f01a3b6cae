use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::prelude::{Margin, Rect};
use tokio::sync::{watch, Mutex};

use crate::{
    action::Action,
    domain::notification::Notification,
    infrastructure::{
        config::Config,
        notification_service::{NotificationProvider, Notifier},
        tui::{event_source::EventSource, Event, Frame, TuiLike},
    },
    presentation::widgets::{KeyHelpWidget, NotificationListWidget},
};

/// Terminal host for the notification provider.
///
/// The provider is mounted in [`AppRunner::new`] and disposed when the loop
/// ends, so no expiry can fire once the host has shut down.
pub struct AppRunner {
    config: Config,
    tui: Arc<Mutex<dyn TuiLike + Send>>,
    events: EventSource,
    provider: Option<NotificationProvider>,
    notifier: Notifier,
    notifications: watch::Receiver<Vec<Notification>>,
    should_quit: bool,
}

impl AppRunner {
    /// Must be called inside a tokio runtime.
    pub fn new(config: Config, tui: Arc<Mutex<dyn TuiLike + Send>>, events: EventSource) -> Self {
        let provider = NotificationProvider::create(config.notifications);
        let notifier = provider.notifier();
        let notifications = provider.subscribe();
        Self {
            config,
            tui,
            events,
            provider: Some(provider),
            notifier,
            notifications,
            should_quit: false,
        }
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    pub fn notifications(&self) -> watch::Receiver<Vec<Notification>> {
        self.notifications.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs until a quit action, the end of the event source, or provider loss.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        let result = self.run_loop().await;
        self.tui.lock().await.exit()?;
        self.shutdown().await?;
        result
    }

    async fn run_loop(&mut self) -> Result<()> {
        self.render().await?;
        while !self.should_quit {
            self.step().await?;
        }
        Ok(())
    }

    /// Handles one terminal event or overlay change, then redraws.
    pub async fn step(&mut self) -> Result<()> {
        tokio::select! {
            biased;
            event = self.events.next() => match event {
                Some(event) => self.handle_event(event).await?,
                None => {
                    tracing::debug!("event source exhausted");
                    self.should_quit = true;
                }
            },
            changed = self.notifications.changed() => {
                if changed.is_err() {
                    tracing::warn!("notification provider stopped unexpectedly");
                    self.should_quit = true;
                }
            }
        }
        self.render().await
    }

    async fn handle_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            Event::Key(key) => self.config.keybindings.action_for(&key).cloned(),
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
            Event::Closed => Some(Action::Quit),
            Event::Error => {
                self.notifier.error("Erreur de lecture du terminal");
                None
            }
        };
        if let Some(action) = action {
            self.dispatch(action).await?;
        }
        Ok(())
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<()> {
        if !matches!(action, Action::Tick | Action::Render) {
            tracing::debug!("dispatch: {action}");
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::Notify { message, kind } => self.notifier.notify(message, kind),
            Action::Resize(w, h) => self.tui.lock().await.resize(Rect::new(0, 0, w, h))?,
            Action::Tick | Action::Render => {}
        }
        Ok(())
    }

    pub async fn render(&mut self) -> Result<()> {
        let notifications = self.notifications.borrow_and_update().clone();
        let keybindings = &self.config.keybindings;
        let mut tui = self.tui.lock().await;
        tui.draw(&mut |frame: &mut Frame<'_>| {
            let area = frame.area();
            frame.render_widget(KeyHelpWidget::new(keybindings), area);
            frame.render_widget(
                NotificationListWidget::new(&notifications),
                area.inner(Margin::new(1, 1)),
            );
        })
    }

    /// Disposes the provider, cancelling every pending expiry.
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(provider) = self.provider.take() {
            let cancelled = provider.dispose().await?;
            tracing::info!(cancelled, "runner stopped");
        }
        Ok(())
    }
}
