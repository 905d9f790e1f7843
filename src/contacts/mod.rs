pub mod loader;
pub mod types;
pub mod writer;

pub use loader::{load_contacts, read_contacts, LoadedContacts};
pub use types::Contact;
pub use writer::{write_contacts, write_ranked, SCORE_COLUMN};
