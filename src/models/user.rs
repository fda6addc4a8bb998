use serde::Serialize;

use super::{Cart, CartOwner};

/// Account that owns exactly one cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub cart: Cart,
}

impl User {
    /// Create a user together with its empty cart
    pub fn new(id: i64, username: impl Into<String>, password: impl Into<String>, cart_id: i64) -> Self {
        let username = username.into();
        let owner = CartOwner {
            id,
            username: username.clone(),
        };
        Self {
            id,
            username,
            password: password.into(),
            cart: Cart::for_owner(cart_id, owner),
        }
    }

    /// Back-reference value a cart keeps for this user
    pub fn as_owner(&self) -> CartOwner {
        CartOwner {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_owns_empty_cart() {
        let user = User::new(1, "john", "secret", 7);

        assert_eq!(user.cart.id, 7);
        assert!(user.cart.is_empty());
        assert_eq!(user.cart.user, Some(user.as_owner()));
    }

    #[test]
    fn test_password_and_cart_are_not_serialized() {
        let user = User::new(1, "john", "secret", 7);

        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("john"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("cart"));
    }
}
