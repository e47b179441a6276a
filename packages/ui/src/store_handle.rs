use api::ApiGateway;
use dioxus::prelude::*;
use store::{RecipeStore, StoreHandle};

/// The recipe store as provided through context.
///
/// Copyable, so event handlers and spawned tasks can each hold one. Writes go through
/// [`StoreHandle::with_store`], which never keeps the signal borrowed across an await.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalStore(pub Signal<RecipeStore>);

impl StoreHandle for SignalStore {
    fn with_store<R>(&self, f: impl FnOnce(&mut RecipeStore) -> R) -> R {
        let mut signal = self.0;
        let mut store = signal.write();
        f(&mut store)
    }
}

/// Consume the recipe store from context.
pub fn use_recipe_store() -> SignalStore {
    SignalStore(use_context::<Signal<RecipeStore>>())
}

/// Consume the gateway from context.
pub fn use_gateway() -> ApiGateway {
    use_context::<ApiGateway>()
}
