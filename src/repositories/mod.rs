// Repositories module - data access layer

pub mod cart_repository;
pub mod item_repository;
pub mod memory;
pub mod user_repository;


pub use cart_repository::CartRepository;
pub use item_repository::ItemRepository;
pub use memory::InMemoryStore;
pub use user_repository::UserRepository;
