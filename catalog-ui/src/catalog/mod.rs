pub mod actions;
pub mod client;
pub mod manager;
pub mod state;

#[cfg(test)]
mod tests;

pub use actions::CatalogAction;
pub use client::CatalogClient;
pub use manager::CatalogManager;
pub use state::{
    Activity, CatalogItem, CatalogState, Dialog, DialogKind, FormInputs, ItemDraft, ItemId,
};
