//! Explicit view registry owned by the application root.
//!
//! Replaces the shared-namespace component registry of the browser original:
//! the composition root owns one [`ViewRegistry`], passes it by reference to
//! whatever code needs to trigger a refresh, and nothing hangs off ambient
//! globals. Views are type-erased behind the object-safe [`View`] trait so
//! one registry can hold all four entity lists.

use crate::app::actions::Action;
use crate::app::handler::{handle_event, ViewEvent};
use crate::domain::error::{InvopakError, Result};
use crate::domain::record::Record;
use crate::view::binding::TableView;
use crate::view::viewmodel::TableViewModel;
use std::collections::HashMap;

/// Object-safe surface of a table view, independent of its record type.
pub trait View: Send {
    /// Entity type id; the registry key.
    fn data_type(&self) -> &str;

    /// Human-readable view title.
    fn display_name(&self) -> &str;

    /// Dispatches one view event; returns `(render, actions)`.
    ///
    /// # Errors
    ///
    /// Propagates dispatch-contract errors from the event handler.
    fn handle_event(&mut self, event: &ViewEvent) -> Result<(bool, Vec<Action>)>;

    /// Refetches the dataset from the view's store.
    fn reload(&mut self) -> bool;

    /// Computes the renderable snapshot.
    fn viewmodel(&self) -> TableViewModel;
}

impl<R: Record + Send + 'static> View for TableView<R> {
    fn data_type(&self) -> &str {
        TableView::data_type(self)
    }

    fn display_name(&self) -> &str {
        TableView::display_name(self)
    }

    fn handle_event(&mut self, event: &ViewEvent) -> Result<(bool, Vec<Action>)> {
        handle_event(self, event)
    }

    fn reload(&mut self) -> bool {
        TableView::reload(self)
    }

    fn viewmodel(&self) -> TableViewModel {
        TableView::viewmodel(self)
    }
}

/// Named collection of the application's table views.
#[derive(Default)]
pub struct ViewRegistry {
    views: HashMap<String, Box<dyn View>>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view under its entity type id, replacing any previous
    /// registration for the same id.
    pub fn register(&mut self, view: Box<dyn View>) {
        let name = view.data_type().to_string();
        if self.views.insert(name.clone(), view).is_some() {
            tracing::debug!(view = %name, "replaced existing view registration");
        }
    }

    /// Returns the named view, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn View> {
        self.views.get(name).map(|v| &**v)
    }

    /// Returns the named view mutably, if registered.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn View + '_)> {
        self.views.get_mut(name).map(|v| &mut **v as &mut (dyn View + '_))
    }

    /// Reloads the named view's dataset from its store.
    ///
    /// # Errors
    ///
    /// Returns [`InvopakError::Config`] when no view is registered under the
    /// name.
    pub fn refresh(&mut self, name: &str) -> Result<bool> {
        let view = self
            .get_mut(name)
            .ok_or_else(|| InvopakError::Config(format!("no view registered as '{name}'")))?;
        Ok(view.reload())
    }

    /// Registered view names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Invoice, InvoiceStatus};
    use crate::store::backend::{ExportFormat, ExportSink};
    use crate::store::memory::MemoryStore;
    use crate::view::presets;
    use chrono::NaiveDate;

    struct NullSink;

    impl<R: Record> ExportSink<R> for NullSink {
        fn export(&mut self, _: &str, _: ExportFormat, _: &[R]) -> Result<()> {
            Ok(())
        }
    }

    fn invoice(n: usize) -> Invoice {
        Invoice {
            id: format!("inv-{n}"),
            invoice_number: format!("INV-{n}"),
            invoice_type: "sale".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            seller_ntn: "1234567-8".to_string(),
            seller_name: "Acme Traders".to_string(),
            buyer_ntn: "7654321-0".to_string(),
            buyer_name: "Beta Retail".to_string(),
            taxable_value: 100.0,
            sales_tax: 18.0,
            grand_total: 118.0,
            status: InvoiceStatus::Draft,
        }
    }

    fn registry_with_invoices() -> ViewRegistry {
        let view = TableView::new(
            presets::invoices_view(),
            Box::new(MemoryStore::with_records([invoice(1), invoice(2)])),
            Box::new(NullSink),
        )
        .unwrap();
        let mut registry = ViewRegistry::new();
        registry.register(Box::new(view));
        registry
    }

    #[test]
    fn refresh_by_name() {
        let mut registry = registry_with_invoices();
        assert_eq!(registry.names(), vec!["invoices"]);
        assert!(registry.refresh("invoices").unwrap());
        let vm = registry.get("invoices").unwrap().viewmodel();
        assert_eq!(vm.rows.len(), 2);
    }

    #[test]
    fn unknown_view_is_a_config_error() {
        let mut registry = registry_with_invoices();
        assert!(matches!(
            registry.refresh("payments"),
            Err(InvopakError::Config(_))
        ));
    }

    #[test]
    fn events_dispatch_through_the_erased_surface() {
        let mut registry = registry_with_invoices();
        registry.refresh("invoices").unwrap();

        let view = registry.get_mut("invoices").unwrap();
        let (render, actions) = view
            .handle_event(&ViewEvent::FilterSelected {
                key: "status".to_string(),
                value: "paid".to_string(),
            })
            .unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(view.viewmodel().rows.is_empty());
    }
}
