mod catalog;
pub use catalog::CatalogView;

mod recipe_manager;
pub use recipe_manager::RecipeManager;
