//! Domain layer - the contact entity and the rules a legal contact obeys.

pub mod contact;
pub mod validation;

pub use contact::{fold_name, Contact, ContactDraft, ContactId, ContactInput, MalformedContactId};
pub use validation::{validate, Field, ValidationError, ValidationErrors};
