mod cli;
mod report;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::db::Store;

pub(crate) use cli::as_cli;

/// Everything a command needs: the injected store, user settings and the
/// caller's notion of "today".
pub(crate) struct Context<S: Store> {
    pub(crate) store: S,
    pub(crate) settings: Settings,
    pub(crate) today: NaiveDate,
}

impl<S: Store> Context<S> {
    pub(crate) fn new(store: S, settings: Settings, today: NaiveDate) -> Self {
        Self {
            store,
            settings,
            today,
        }
    }

    /// "YYYY-MM" of `today`.
    pub(crate) fn current_month(&self) -> String {
        self.today.format("%Y-%m").to_string()
    }
}
