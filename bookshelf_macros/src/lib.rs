//! Derive macros for bookshelf.
//!
//! `#[derive(Document)]` implements `bookshelf::Document` for a struct with
//! named fields. The collection defaults to the snake_cased struct name with
//! an `s` suffix; the id field defaults to a field called `id`.
//!
//! ```ignore
//! #[derive(Clone, Serialize, Deserialize, Document)]
//! #[document(collection = "library_entries")]
//! pub struct LibraryEntry {
//!     pub id: String,
//!     // ...
//! }
//! ```

mod document;

use proc_macro::TokenStream;

/// Derive macro for the `Document` trait.
///
/// Attributes:
/// - `#[document(collection = "name")]` on the struct
/// - `#[document(id)]` on the identifier field (must deref to `str`)
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
