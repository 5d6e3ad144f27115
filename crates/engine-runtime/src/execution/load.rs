use crate::error::RuntimeError;
use chrono::Utc;
use connectors::sql::base::{
    adapter::Connector,
    executor::{insert, test_connection},
};
use engine_config::{
    context::{describe, params_from_json, params_to_json},
    persist::{clear_params, restore_params, save_params},
    settings::{
        loader::{ConfigSource, load_params},
        validator::validate,
    },
};
use engine_core::state::KeyValueStore;
use model::{
    execution::{keys::DEFAULT_PLUGIN_NAME, params::ParamSet},
    records::envelope::InboundEnvelope,
};
use planner::query::generator::QueryGenerator;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Load-mode entry points for one instance.
pub struct SinkLoader {
    plugin_name: String,
    store: Arc<dyn KeyValueStore>,
    connector: Arc<dyn Connector>,
}

impl SinkLoader {
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

    /// Validates the configuration, checks the database is reachable and
    /// returns the flush context to hand back on every flush.
    pub async fn init(&self, config: &impl ConfigSource) -> Result<String, RuntimeError> {
        let params = validate(load_params(&self.plugin_name, config)?)?;

        if !test_connection(self.connector.as_ref(), &params).await {
            error!("{}", describe(&params)?);
            return Err(RuntimeError::ConnectionTest(params.label()));
        }

        save_params(self.store.as_ref(), &params).await?;
        info!("{}", describe(&params)?);
        Ok(params_to_json(&params)?)
    }

    /// Builds an INSERT for every record, then writes the whole batch in one
    /// bounded transaction and returns how many rows were written. A record
    /// that cannot be turned into an INSERT rejects the batch before anything
    /// is written, and a failed write rolls every row back.
    ///
    /// Without a context the configuration saved at init is used.
    pub async fn flush(
        &self,
        context: Option<&str>,
        envelopes: &[InboundEnvelope],
    ) -> Result<usize, RuntimeError> {
        let params = self.resolve_params(context).await?;
        if envelopes.is_empty() {
            return Ok(0);
        }

        let generator = QueryGenerator::new(&params);
        let now = Utc::now();
        let statements = envelopes
            .iter()
            .enumerate()
            .map(|(idx, envelope)| -> Result<String, RuntimeError> {
                let sql = generator.insert(&envelope.record).inspect_err(|err| {
                    error!(
                        "{} Record {} rejected, nothing written: {}",
                        params.label(),
                        idx,
                        err
                    );
                })?;
                debug!(
                    "{} insert expression ({}): {}",
                    params.label(),
                    envelope.timestamp.resolve(now),
                    sql
                );
                Ok(sql)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let conn = self.connector.open(&params).await?;
        insert(conn.as_ref(), &statements).await.inspect_err(|err| {
            error!("{} Error during insert, batch rolled back: {}", params.label(), err);
        })?;

        debug!("{} Flushed {} records", params.label(), statements.len());
        Ok(statements.len())
    }

    /// With a context nothing is stored, so there is nothing to release.
    pub async fn exit(&self, context: Option<&str>) -> Result<(), RuntimeError> {
        match context {
            Some(_) => info!("[{}] Exit called with context", self.plugin_name),
            None => {
                info!("[{}] Exit called without context", self.plugin_name);
                clear_params(self.store.as_ref(), &self.plugin_name).await?;
            }
        }
        Ok(())
    }

    async fn resolve_params(&self, context: Option<&str>) -> Result<ParamSet, RuntimeError> {
        match context {
            Some(context) if !context.trim().is_empty() => {
                debug!("[{}] Flush called with context", self.plugin_name);
                Ok(params_from_json(context)?)
            }
            _ => {
                debug!("[{}] Flush called with no context", self.plugin_name);
                Ok(restore_params(self.store.as_ref(), &self.plugin_name).await?)
            }
        }
    }
}
