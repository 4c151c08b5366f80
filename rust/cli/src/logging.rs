//! Tracing setup for the binary, plus a capturing layer so tests can
//! assert on what the engine logs.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "warn,tablestakes_engine=info,tablestakes_cli=info";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Collects every event it sees.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    pub fn into_layer<S>(self) -> CaptureLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        CaptureLayer {
            logs: self,
            _phantom: PhantomData,
        }
    }
}

pub struct CaptureLayer<S> {
    logs: CapturedLogs,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for CaptureLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };
        self.logs
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestakes_engine::action::Action;
    use tablestakes_engine::config::TableConfig;
    use tablestakes_engine::game::GameState;
    use tablestakes_engine::player::Player;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture<F: FnOnce()>(f: F) -> CapturedLogs {
        let logs = CapturedLogs::new();
        let registry = Registry::default().with(logs.clone().into_layer::<Registry>());
        tracing::subscriber::with_default(registry, f);
        logs
    }

    #[test]
    fn engine_logs_hand_lifecycle() {
        let logs = capture(|| {
            let players = vec![Player::new(0, "a", 100), Player::new(1, "b", 100)];
            let mut game = GameState::new(players, TableConfig::with_blinds(5, 10).seed(1)).unwrap();
            game.start_new_hand().unwrap();
            game.apply_action(Action::fold(0)).unwrap();
        });

        let entries = logs.entries();
        let started = entries
            .iter()
            .find(|e| e.message == "hand started")
            .expect("hand start is logged");
        assert_eq!(started.level, Level::INFO);
        assert!(started.fields.iter().any(|(k, v)| k == "hand" && v == "1"));
        assert!(logs.messages().iter().any(|m| m == "hand won uncontested"));
    }

    #[test]
    fn short_stack_warning() {
        let logs = capture(|| {
            let players = vec![
                // the button is not in the blinds, so it is forced in
                Player::new(0, "short", 4),
                Player::new(1, "a", 100),
                Player::new(2, "b", 100),
            ];
            let mut game = GameState::new(players, TableConfig::with_blinds(5, 10).seed(2)).unwrap();
            game.start_new_hand().unwrap();
        });
        let warned = logs
            .entries()
            .into_iter()
            .find(|e| e.level == Level::WARN)
            .expect("forced all-in warns");
        assert_eq!(warned.message, "short stack forced all-in");
        assert!(warned.target.starts_with("tablestakes_engine"));
    }
}
