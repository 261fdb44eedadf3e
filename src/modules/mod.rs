pub mod books;

use std::sync::Arc;

use bookshelf_kernel::ModuleRegistry;
use mongodb::Database;

/// Register all application modules with the registry, wiring each to the
/// shared database handle.
pub fn register_all(registry: &mut ModuleRegistry, database: &Database) {
    let books = Arc::new(books::store::MongoBookRepository::new(database));
    registry.register(books::create_module(books));
}
