use crate::error::RuntimeError;
use chrono::Utc;
use connectors::sql::base::{
    adapter::{Connector, SqlAdapter},
    executor::{delete, existence_check, select_one},
};
use engine_config::{
    context::describe,
    persist::{clear_params, restore_params, save_params},
    settings::{
        loader::{ConfigSource, load_params},
        validator::validate,
    },
};
use engine_core::{cursor::CursorTracker, state::KeyValueStore};
use model::{
    core::value::Value,
    execution::{keys::DEFAULT_PLUGIN_NAME, params::ParamSet},
    pagination::fetch::FetchResult,
    records::{envelope::Envelope, record::GenericRecord},
};
use planner::query::generator::QueryGenerator;
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};

/// How a single poll cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A row was read and is handed to the host.
    Emitted(Envelope),
    /// The existence check found nothing; the cycle idled.
    NoData,
    /// The existence check saw rows but the fetch returned none.
    Empty,
    /// Connecting or querying failed; the cycle idled.
    Failed,
}

impl CycleOutcome {
    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            CycleOutcome::Emitted(envelope) => Some(envelope),
            _ => None,
        }
    }
}

enum Stage {
    CheckExistence,
    Fetch,
    AdvanceCursor(FetchResult),
    DeleteIfConfigured {
        record: GenericRecord,
        keys: Vec<Value>,
    },
    Emit(GenericRecord),
    Sleep(CycleOutcome),
    Done(CycleOutcome),
}

/// One extraction cycle over its own short-lived connection.
///
/// ```text
/// CheckExistence -> NoData -> Sleep
///                -> Fetch -> Empty
///                         -> AdvanceCursor -> DeleteIfConfigured -> Emit
///                         -> Failed -> Sleep
/// ```
///
/// Connection and query failures are logged and turn into a sleep; nothing
/// in a cycle aborts the caller.
pub struct PollCycle<'a> {
    params: &'a mut ParamSet,
    connector: &'a dyn Connector,
    tracker: CursorTracker,
}

impl<'a> PollCycle<'a> {
    pub fn new(
        params: &'a mut ParamSet,
        connector: &'a dyn Connector,
        tracker: CursorTracker,
    ) -> Self {
        Self {
            params,
            connector,
            tracker,
        }
    }

    pub async fn run(mut self) -> CycleOutcome {
        let conn = match self.connector.open(self.params).await {
            Ok(conn) => conn,
            Err(err) => {
                error!("{} Connection failed: {}", self.params.label(), err);
                self.idle().await;
                return CycleOutcome::Failed;
            }
        };

        let generator = QueryGenerator::new(self.params);
        let count_sql = generator.select(true);
        let select_sql = generator.select(false);

        let mut stage = Stage::CheckExistence;
        loop {
            stage = match stage {
                Stage::CheckExistence => self.check_existence(conn.as_ref(), &count_sql).await,
                Stage::Fetch => self.fetch(conn.as_ref(), &select_sql).await,
                Stage::AdvanceCursor(fetched) => self.advance_cursor(fetched).await,
                Stage::DeleteIfConfigured { record, keys } => {
                    self.delete_if_configured(conn.as_ref(), &keys).await;
                    Stage::Emit(record)
                }
                Stage::Emit(record) => {
                    debug!(
                        "{} Emitting record with {} columns",
                        self.params.label(),
                        record.len()
                    );
                    return CycleOutcome::Emitted(Envelope::new(Utc::now(), record));
                }
                Stage::Sleep(outcome) => {
                    self.idle().await;
                    return outcome;
                }
                Stage::Done(outcome) => return outcome,
            };
        }
    }

    async fn check_existence(&self, conn: &dyn SqlAdapter, count_sql: &str) -> Stage {
        match existence_check(conn, count_sql).await {
            Ok(true) => Stage::Fetch,
            Ok(false) => {
                debug!("{} No data found", self.params.label());
                Stage::Sleep(CycleOutcome::NoData)
            }
            Err(err) => {
                error!("{} Existence check failed: {}", self.params.label(), err);
                Stage::Sleep(CycleOutcome::Failed)
            }
        }
    }

    async fn fetch(&self, conn: &dyn SqlAdapter, select_sql: &str) -> Stage {
        let p = &self.params;
        match select_one(conn, select_sql, &p.sequencer_column, &p.primary_key_column).await {
            Ok(fetched) if fetched.is_empty() => {
                debug!("{} Fetch returned no row", p.label());
                Stage::Done(CycleOutcome::Empty)
            }
            Ok(fetched) => Stage::AdvanceCursor(fetched),
            Err(err) => {
                error!("{} Query failed: {}", p.label(), err);
                Stage::Sleep(CycleOutcome::Failed)
            }
        }
    }

    async fn advance_cursor(&mut self, fetched: FetchResult) -> Stage {
        let FetchResult {
            record,
            keys,
            cursor,
        } = fetched;

        match self.tracker.advance(&cursor).await {
            Ok(true) => self.params.latest_sequencer_value = cursor,
            Ok(false) => {}
            Err(err) => error!(
                "{} Failed to persist cursor '{}': {}",
                self.params.label(),
                cursor,
                err
            ),
        }

        match record {
            Some(record) => Stage::DeleteIfConfigured { record, keys },
            None => Stage::Done(CycleOutcome::Empty),
        }
    }

    async fn delete_if_configured(&self, conn: &dyn SqlAdapter, keys: &[Value]) {
        if !self.params.delete_after_read {
            return;
        }
        if keys.is_empty() {
            warn!(
                "{} Delete after read is set but no '{}' value was read; row kept",
                self.params.label(),
                self.params.primary_key_column
            );
            return;
        }
        if let Err(err) = delete(conn, self.params, keys).await {
            error!(
                "{} Delete failed, row will be read again: {}",
                self.params.label(),
                err
            );
        }
    }

    async fn idle(&self) {
        tokio::time::sleep(Duration::from_secs(self.params.idle_secs())).await;
    }
}

/// Extraction-mode entry points for one instance. The instance store carries
/// the validated configuration and cursor from `init` to every `poll`.
pub struct SourcePoller {
    plugin_name: String,
    store: Arc<dyn KeyValueStore>,
    connector: Arc<dyn Connector>,
}

impl SourcePoller {
    pub fn new(
        plugin_name: &str,
        store: Arc<dyn KeyValueStore>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let plugin_name = if plugin_name.is_empty() {
            DEFAULT_PLUGIN_NAME
        } else {
            plugin_name
        };
        Self {
            plugin_name: plugin_name.to_string(),
            store,
            connector,
        }
    }

    /// Loads and validates the configuration and stores it for later polls.
    /// A cursor already persisted for this instance is kept.
    pub async fn init(&self, config: &impl ConfigSource) -> Result<ParamSet, RuntimeError> {
        let mut params = validate(load_params(&self.plugin_name, config)?)?;

        let tracker = CursorTracker::load(self.store.clone(), &self.plugin_name).await?;
        params.latest_sequencer_value = tracker.current().to_string();

        save_params(self.store.as_ref(), &params).await?;
        info!("{}", describe(&params)?);
        Ok(params)
    }

    /// Runs one cycle and returns the row it read, if any.
    pub async fn poll(&self) -> Result<Option<Envelope>, RuntimeError> {
        let mut params = restore_params(self.store.as_ref(), &self.plugin_name).await?;
        let tracker = CursorTracker::new(
            self.store.clone(),
            &self.plugin_name,
            &params.latest_sequencer_value,
        );

        let outcome = PollCycle::new(&mut params, self.connector.as_ref(), tracker)
            .run()
            .await;
        Ok(outcome.into_envelope())
    }

    /// Forgets the stored configuration and cursor.
    pub async fn exit(&self) -> Result<(), RuntimeError> {
        info!("[{}] Flushing stored params", self.plugin_name);
        clear_params(self.store.as_ref(), &self.plugin_name).await?;
        Ok(())
    }
}
