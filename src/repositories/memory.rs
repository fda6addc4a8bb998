use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::models::{Cart, Item, RepositoryError, RepositoryResult, User};
use crate::repositories::{CartRepository, ItemRepository, UserRepository};

/// In-process store backing all three repositories.
///
/// Users reference their cart by id, so a cart written through
/// [`CartRepository::save`] is what later user lookups return.
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    users: HashMap<String, UserRecord>,
    items: BTreeMap<i64, Item>,
    carts: HashMap<i64, Cart>,
    next_user_id: i64,
    next_item_id: i64,
    next_cart_id: i64,
}

struct UserRecord {
    id: i64,
    username: String,
    password: String,
    cart_id: i64,
}

impl StoreState {
    fn insert_item(&mut self, name: &str, description: &str, price: Decimal) -> Item {
        self.next_item_id += 1;
        let item = Item::new(self.next_item_id, name, description, price);
        self.items.insert(item.id, item.clone());
        item
    }

    fn create_user(&mut self, username: &str, password: &str) -> RepositoryResult<User> {
        if username.trim().is_empty() {
            return Err(RepositoryError::ConstraintViolation {
                message: "username cannot be empty".to_string(),
            });
        }
        if self.users.contains_key(username) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("username already exists: {}", username),
            });
        }

        self.next_user_id += 1;
        self.next_cart_id += 1;
        let user = User::new(self.next_user_id, username, password, self.next_cart_id);

        self.carts.insert(user.cart.id, user.cart.clone());
        self.users.insert(
            user.username.clone(),
            UserRecord {
                id: user.id,
                username: user.username.clone(),
                password: user.password.clone(),
                cart_id: user.cart.id,
            },
        );
        Ok(user)
    }
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Create a store seeded with the default widget catalog
    pub fn with_catalog() -> Self {
        let mut state = StoreState::default();
        state.insert_item("Round Widget", "A widget that is round", dec!(2.99));
        state.insert_item("Square Widget", "A widget that is square", dec!(1.99));
        Self {
            state: RwLock::new(state),
        }
    }

    /// Add an item to the catalog, assigning the next free id
    pub async fn insert_item(&self, name: &str, description: &str, price: Decimal) -> Item {
        self.state.write().await.insert_item(name, description, price)
    }

    /// Register a user together with an empty cart
    #[instrument(skip(self, password))]
    pub async fn create_user(&self, username: &str, password: &str) -> RepositoryResult<User> {
        let user = self.state.write().await.create_user(username, password)?;
        info!(user_id = user.id, cart_id = user.cart.id, "User created");
        Ok(user)
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let state = self.state.read().await;
        let Some(record) = state.users.get(username) else {
            return Ok(None);
        };

        let cart = state.carts.get(&record.cart_id).cloned().ok_or_else(|| {
            warn!(cart_id = record.cart_id, "User references a missing cart");
            RepositoryError::ConstraintViolation {
                message: format!("cart {} missing for user {}", record.cart_id, record.username),
            }
        })?;

        Ok(Some(User {
            id: record.id,
            username: record.username.clone(),
            password: record.password.clone(),
            cart,
        }))
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, item_id: i64) -> RepositoryResult<Option<Item>> {
        Ok(self.state.read().await.items.get(&item_id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        Ok(self.state.read().await.items.values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Item>> {
        Ok(self
            .state
            .read()
            .await
            .items
            .values()
            .filter(|item| item.name == name)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    #[instrument(skip(self, cart), fields(cart_id = cart.id, item_count = cart.items.len()))]
    async fn save(&self, cart: Cart) -> RepositoryResult<Cart> {
        let mut state = self.state.write().await;
        match state.carts.get_mut(&cart.id) {
            Some(stored) => {
                *stored = cart.clone();
                info!("Cart saved");
                Ok(cart)
            }
            None => {
                warn!("Refusing to save a cart that no user owns");
                Err(RepositoryError::NotFound)
            }
        }
    }

    async fn find_cart(&self, cart_id: i64) -> RepositoryResult<Option<Cart>> {
        Ok(self.state.read().await.carts.get(&cart_id).cloned())
    }
}
