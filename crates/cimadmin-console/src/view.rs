//! Per-table view state and the reload cycle.

use std::collections::HashMap;

use cimadmin_client::{AdminClient, CimError, model::{Instance, decode_instances}};
use tracing::{debug, info, warn};

use crate::kind::{Record, SortPolicy, TableKind};
use crate::render;
use crate::status::{MALFORMED_RESPONSE, Status};
use crate::table::Table;

/// Identifies one reload; only the most recently issued ticket may render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReloadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadOutcome {
    Rendered(usize),
    /// A newer reload was issued after this one
    Discarded,
    /// Request or parse failure, reported on the view's status
    Failed,
}

/// One table and everything derived from its last listing
pub struct TableView<R: Record> {
    table: Table,
    references: HashMap<String, String>,
    records: HashMap<String, R>,
    status: Status,
    sort: SortPolicy,
    issued: u64,
}

impl<R: Record> Default for TableView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> TableView<R> {
    pub fn new() -> Self {
        Self::with_sort_policy(SortPolicy::default())
    }

    pub fn with_sort_policy(sort: SortPolicy) -> Self {
        let kind = R::KIND;
        Self {
            table: Table::new(kind.table_id(), kind.headers(), kind.stripe()),
            references: HashMap::new(),
            records: HashMap::new(),
            status: Status::default(),
            sort,
            issued: 0,
        }
    }

    pub fn kind(&self) -> TableKind {
        R::KIND
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Listing status; request and parse failures land here
    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn reference(&self, key: &str) -> Option<&str> {
        self.references.get(key).map(String::as_str)
    }

    pub fn references(&self) -> &HashMap<String, String> {
        &self.references
    }

    pub fn record(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    /// Start a reload: every data row and the reference map are dropped
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.issued += 1;
        self.clear();
        self.status.clear();
        ReloadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: ReloadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Finish a reload with the raw listing outcome
    pub fn apply_listing(
        &mut self,
        ticket: ReloadTicket,
        outcome: Result<String, CimError>,
    ) -> ReloadOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale listing for {} (ticket {} < {})",
                self.table.id(),
                ticket.0,
                self.issued
            );
            return ReloadOutcome::Discarded;
        }

        self.clear();
        let body = match outcome {
            Ok(body) => body,
            Err(e) => {
                warn!("Listing {} failed: {}", self.table.id(), e);
                self.status.report(&e);
                return ReloadOutcome::Failed;
            }
        };

        match decode_instances::<R>(&body) {
            Ok(instances) => {
                let count = self.render(&instances);
                info!("Rendered {} rows into {}", count, self.table.id());
                ReloadOutcome::Rendered(count)
            }
            Err(e) => {
                warn!("Malformed listing for {}: {}", self.table.id(), e);
                self.status.failure(MALFORMED_RESPONSE, e.to_string());
                ReloadOutcome::Failed
            }
        }
    }

    /// Add rows for `instances` to the current table
    pub fn render(&mut self, instances: &[Instance<R>]) -> usize {
        for instance in instances {
            self.records
                .insert(instance.properties.key(), instance.properties.clone());
        }
        render::render(&mut self.table, &mut self.references, instances, self.sort)
    }

    /// Drop all rows and re-list the table from the server
    pub async fn reload(&mut self, client: &AdminClient) -> ReloadOutcome {
        let ticket = self.begin_reload();
        let outcome = client.list_raw(R::KIND.listing_path()).await;
        self.apply_listing(ticket, outcome)
    }

    fn clear(&mut self) {
        self.table.clear_rows();
        self.references.clear();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Indicator;
    use cimadmin_client::model::{ConfigSetting, ProviderModule};

    const LISTING: &str = r#"{"instances":[
        {"self":"cfg/b","properties":{"PropertyName":"b","CurrentValue":"2"}},
        {"self":"cfg/a","properties":{"PropertyName":"a","CurrentValue":"1"}}
    ]}"#;

    #[test]
    fn test_apply_listing_renders() {
        let mut view: TableView<ConfigSetting> = TableView::new();
        let ticket = view.begin_reload();
        assert_eq!(
            view.apply_listing(ticket, Ok(LISTING.to_string())),
            ReloadOutcome::Rendered(2)
        );
        assert_eq!(view.table().len(), 2);
        assert_eq!(view.reference("a"), Some("cfg/a"));
        assert_eq!(
            view.record("b").unwrap().current_value.as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut view: TableView<ConfigSetting> = TableView::new();
        let first = view.begin_reload();
        let second = view.begin_reload();

        assert_eq!(
            view.apply_listing(second, Ok(LISTING.to_string())),
            ReloadOutcome::Rendered(2)
        );
        assert_eq!(
            view.apply_listing(first, Ok(r#"{"instances":[]}"#.to_string())),
            ReloadOutcome::Discarded
        );
        assert_eq!(view.table().len(), 2);
    }

    #[test]
    fn test_begin_reload_clears_rows_and_map() {
        let mut view: TableView<ConfigSetting> = TableView::new();
        let ticket = view.begin_reload();
        view.apply_listing(ticket, Ok(LISTING.to_string()));

        view.begin_reload();
        assert!(view.table().is_empty());
        assert!(view.references().is_empty());
        assert!(view.record("a").is_none());
        assert_eq!(view.table().headers().len(), 5);
    }

    #[test]
    fn test_malformed_listing_reports_failure() {
        let mut view: TableView<ConfigSetting> = TableView::new();
        let ticket = view.begin_reload();
        assert_eq!(
            view.apply_listing(ticket, Ok("[1,2".to_string())),
            ReloadOutcome::Failed
        );
        assert!(matches!(
            &view.status().indicator,
            Indicator::Failure { message, tooltip }
                if message == MALFORMED_RESPONSE && !tooltip.is_empty()
        ));
        assert!(view.table().is_empty());
        assert!(view.references().is_empty());
    }

    #[test]
    fn test_arrival_policy_view() {
        let mut view: TableView<ProviderModule> = TableView::with_sort_policy(SortPolicy::Arrival);
        let ticket = view.begin_reload();
        let body = r#"{"instances":[{"properties":{"Name":"z"}},{"properties":{"Name":"a"}}]}"#;
        view.apply_listing(ticket, Ok(body.to_string()));
        assert_eq!(view.table().rows()[0].key(), "z");
        assert_eq!(view.kind(), TableKind::Provider);
    }
}
