//! Per-kind table layout and the record trait that feeds the renderer.

use std::borrow::Cow;

use cimadmin_client::{
    constants::cimrs_path,
    model::{ConfigSetting, IndicationSubscription, ProviderModule},
};
use serde::de::DeserializeOwned;

use crate::table::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Config,
    Provider,
    Indication,
}

impl TableKind {
    pub fn table_id(&self) -> &'static str {
        match self {
            TableKind::Config => "configTable",
            TableKind::Provider => "providerTable",
            TableKind::Indication => "indicationTable",
        }
    }

    pub fn listing_path(&self) -> &'static str {
        match self {
            TableKind::Config => cimrs_path::CONFIG_SETTING_INSTANCES,
            TableKind::Provider => cimrs_path::PROVIDER_MODULE_INSTANCES,
            TableKind::Indication => cimrs_path::SUBSCRIPTION_INSTANCES,
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            TableKind::Config => &[
                "Property Name",
                "Current Value",
                "Default Value",
                "Planned Value",
                "Dynamic",
            ],
            TableKind::Provider => &[
                "Name",
                "Location",
                "Vendor",
                "Version",
                "Interface Type",
                "Status",
            ],
            TableKind::Indication => &["Subscription", "Handler", "Filter", "State"],
        }
    }

    pub fn stripe(&self) -> StripeRule {
        match self {
            TableKind::Config => StripeRule::new(1, "#E6ECF5"),
            TableKind::Provider => StripeRule::new(0, "#EFEFEF"),
            TableKind::Indication => StripeRule::new(0, "#F2F7EC"),
        }
    }
}

/// Where a new row lands among the existing ones
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortPolicy {
    /// Ascending by the first column
    #[default]
    Ascending,
    /// Append in arrival order, as the legacy provider and indication pages did
    Arrival,
}

/// Data row `i` (header excluded) gets `color` when `i % 2 == parity`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripeRule {
    pub parity: usize,
    pub color: &'static str,
}

impl StripeRule {
    pub const fn new(parity: usize, color: &'static str) -> Self {
        Self { parity, color }
    }

    pub fn color_for(&self, index: usize) -> Option<&'static str> {
        (index % 2 == self.parity % 2).then_some(self.color)
    }
}

/// A typed instance that can become a table row
pub trait Record: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: TableKind;

    /// Undecoded primary key as sent by the server
    fn raw_key(&self) -> &str;

    /// Display cells; the first one carries the primary key
    fn cells(&self) -> Vec<Cell>;

    /// Decoded primary key used for sorting and the reference map
    fn key(&self) -> String {
        decode(self.raw_key()).into_owned()
    }
}

/// Percent-decode a server value; malformed input is shown as-is
pub fn decode(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}

fn text(value: Option<&str>) -> Cell {
    Cell::Text(value.map(|v| decode(v).into_owned()).unwrap_or_default())
}

impl Record for ConfigSetting {
    const KIND: TableKind = TableKind::Config;

    fn raw_key(&self) -> &str {
        &self.property_name
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            text(Some(self.property_name.as_str())),
            text(self.current_value.as_deref()),
            text(self.default_value.as_deref()),
            text(self.planned_value.as_deref()),
            Cell::Flag(self.dynamic_property),
        ]
    }
}

impl Record for ProviderModule {
    const KIND: TableKind = TableKind::Provider;

    fn raw_key(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<Cell> {
        let status = self
            .operational_status
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            text(Some(self.name.as_str())),
            text(self.location.as_deref()),
            text(self.vendor.as_deref()),
            text(self.version.as_deref()),
            text(self.interface_type.as_deref()),
            Cell::Text(status),
        ]
    }
}

impl Record for IndicationSubscription {
    const KIND: TableKind = TableKind::Indication;

    fn raw_key(&self) -> &str {
        &self.subscription_info
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            text(Some(self.subscription_info.as_str())),
            text(self.handler.as_deref()),
            text(self.filter.as_deref()),
            Cell::Text(self.subscription_state.label().to_string()),
        ]
    }
}
