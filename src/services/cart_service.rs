use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{Cart, Item, ModifyCartRequest, ServiceError, ServiceResult, User};
use crate::repositories::{CartRepository, ItemRepository, UserRepository};

/// Largest quantity a single request may carry unless configured otherwise
pub const DEFAULT_MAX_QUANTITY: u32 = 1000;

/// Service for modifying users' shopping carts
pub struct CartService {
    user_repository: Arc<dyn UserRepository>,
    item_repository: Arc<dyn ItemRepository>,
    cart_repository: Arc<dyn CartRepository>,
    max_quantity: u32,
}

impl CartService {
    /// Create a new CartService
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        item_repository: Arc<dyn ItemRepository>,
        cart_repository: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            user_repository,
            item_repository,
            cart_repository,
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }

    /// Reject requests whose quantity is above `max_quantity`
    pub fn with_max_quantity(mut self, max_quantity: u32) -> Self {
        self.max_quantity = max_quantity;
        self
    }

    /// Append `quantity` copies of an item to the user's cart
    #[instrument(skip(self, request), fields(
        username = %request.username,
        item_id = request.item_id,
        quantity = request.quantity,
    ))]
    pub async fn add_to_cart(&self, request: ModifyCartRequest) -> ServiceResult<Cart> {
        info!("Adding item to cart");

        self.check_quantity(&request)?;
        let (user, item) = self.resolve(&request).await?;
        let mut cart = owned_cart(user);

        for _ in 0..request.copies() {
            cart.add_item(&item);
        }

        let saved = self.cart_repository.save(cart).await?;

        info!(
            cart_id = saved.id,
            item_count = saved.len(),
            total = %saved.total,
            "Item added to cart successfully"
        );
        Ok(saved)
    }

    /// Remove up to `quantity` copies of an item from the user's cart
    #[instrument(skip(self, request), fields(
        username = %request.username,
        item_id = request.item_id,
        quantity = request.quantity,
    ))]
    pub async fn remove_from_cart(&self, request: ModifyCartRequest) -> ServiceResult<Cart> {
        info!("Removing item from cart");

        self.check_quantity(&request)?;
        let (user, item) = self.resolve(&request).await?;
        let mut cart = owned_cart(user);

        let removed = (0..request.copies())
            .take_while(|_| cart.remove_item(&item))
            .count();
        if removed < request.copies() {
            info!(
                requested = request.copies(),
                removed, "Cart held fewer copies than requested"
            );
        }

        let saved = self.cart_repository.save(cart).await?;

        info!(
            cart_id = saved.id,
            item_count = saved.len(),
            total = %saved.total,
            "Item removed from cart successfully"
        );
        Ok(saved)
    }

    fn check_quantity(&self, request: &ModifyCartRequest) -> ServiceResult<()> {
        if i64::from(request.quantity) > i64::from(self.max_quantity) {
            warn!(max_quantity = self.max_quantity, "Quantity over limit");
            return Err(ServiceError::QuantityTooLarge {
                quantity: request.quantity,
                max_quantity: self.max_quantity,
            });
        }
        Ok(())
    }

    /// Look up the user and then the item named by the request
    async fn resolve(&self, request: &ModifyCartRequest) -> ServiceResult<(User, Item)> {
        let user = match self
            .user_repository
            .find_by_username(&request.username)
            .await?
        {
            Some(user) => user,
            None => {
                warn!("User not found");
                return Err(ServiceError::UserNotFound {
                    username: request.username.clone(),
                });
            }
        };

        let item = match self.item_repository.find_by_id(request.item_id).await? {
            Some(item) => item,
            None => {
                warn!("Item not found");
                return Err(ServiceError::ItemNotFound {
                    item_id: request.item_id,
                });
            }
        };

        Ok((user, item))
    }
}

/// Take the user's cart, making sure it points back at the user
fn owned_cart(user: User) -> Cart {
    let owner = user.as_owner();
    let mut cart = user.cart;
    cart.user = Some(owner);
    cart
}
