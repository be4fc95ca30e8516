use contact_form_server::client::{Commune, CommuneLookup};
use contact_form_server::domain::PostalCode;
use contact_form_server::error::{LookupError, LookupResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock commune lookup backed by a fixed table.
///
/// Unknown postal codes answer an empty list; a failing lookup answers a
/// timeout for every code.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCommuneLookup {
    communes: HashMap<String, Vec<String>>,
    failing: bool,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockCommuneLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Register the communes sharing a postal code.
    pub fn with(mut self, postal_code: &str, names: &[&str]) -> Self {
        self.communes.insert(
            postal_code.to_string(),
            names.iter().map(|name| name.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CommuneLookup for MockCommuneLookup {
    fn communes_for(&self, postal_code: &PostalCode) -> LookupResult<Vec<Commune>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing {
            return Err(LookupError::Timeout);
        }

        Ok(self
            .communes
            .get(postal_code.as_str())
            .map(|names| {
                names
                    .iter()
                    .map(|name| Commune {
                        name: name.clone(),
                        code: None,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}
