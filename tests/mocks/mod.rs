mod mock_commune_lookup;
mod mock_contact_store;

pub use mock_commune_lookup::MockCommuneLookup;
pub use mock_contact_store::MockContactStore;
