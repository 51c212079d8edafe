pub use categories::Category;
pub use currency::Currency;
pub use error::EngineError;
pub use form::{FormState, SubmitOutcome, normalize_amount};
pub use ids::{IdSource, SequenceSource, UuidSource};
pub use money::Money;
pub use records::{RecordDate, RecordId, RecordKind, TransactionRecord};
pub use session::{AuthError, AuthProvider, Session, SessionPhase, User};
pub use store::{MemoryStore, RecordStore, StoreError};

mod categories;
mod currency;
mod error;
pub mod form;
mod ids;
mod money;
mod records;
mod session;
mod store;

type ResultEngine<T> = Result<T, EngineError>;
