//! Domain data types

pub mod contact;
pub mod invoice;
pub mod outcome;

pub use contact::Contact;
pub use invoice::{InvoiceDraft, LineItem};
pub use outcome::{BatchSummary, CreatedInvoice, SubmissionOutcome};
