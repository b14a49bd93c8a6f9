//! Gatherer engine: provider IO, pacing, pagination and durable state.
mod error;
mod export;
mod gate;
mod lists;
mod pager;
mod persist;
mod session;
mod store;
mod transport;
mod types;

pub use error::RetrievalError;
pub use export::{write_contacts_csv, ExportError, ExportSummary};
pub use gate::{Backoff, GateSettings, RequestGate};
pub use lists::{fetch_saved_lists, find_saved_list};
pub use pager::Pager;
pub use persist::{ensure_parent_dir, AtomicFileWriter, PersistError};
pub use session::{Session, SessionError, SessionFailure, SessionSettings};
pub use store::{FileSeenStore, MemorySeenStore, SeenStore, StoreError};
pub use transport::{ProviderSettings, ReqwestTransport, Transport, DEFAULT_BASE_URL};
pub use types::{
    ListsPage, PageRequest, Pagination, PeoplePage, Reply, SavedList,
};
