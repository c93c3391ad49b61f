//! Checkout service converting carts into committed orders.
//!
//! CheckoutService coordinates between the CartStore and the OrderLedger:
//! it reads the cart, writes the order to the ledger, and clears the cart
//! only once the ledger holds every line.

use botique_types::cart::UserId;
use botique_types::error::CheckoutError;
use botique_types::order::{OrderId, OrderRecord, UserProfile};
use tracing::{debug, info, warn};

use crate::cart::store::CartStore;
use crate::checkout::ledger::OrderLedger;

/// Orchestrates the cart-to-order transition.
///
/// Generic over `CartStore` and `OrderLedger` to maintain clean
/// architecture (botique-core never depends on botique-infra).
pub struct CheckoutService<C: CartStore, L: OrderLedger> {
    carts: C,
    ledger: L,
}

impl<C: CartStore, L: OrderLedger> CheckoutService<C, L> {
    /// Create a new checkout service over the given store and ledger.
    pub fn new(carts: C, ledger: L) -> Self {
        Self { carts, ledger }
    }

    /// Access the cart store.
    pub fn carts(&self) -> &C {
        &self.carts
    }

    /// Access the order ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Convert the user's cart into a committed order and empty the cart.
    ///
    /// The cart is read once at the start; items added concurrently after
    /// that read are dropped by the final clearance. Callers submit checkout
    /// from a single chat session, so the window is acceptable.
    ///
    /// An empty cart is rejected with [`CheckoutError::EmptyCart`] before
    /// any ledger call. If the ledger fails partway, the cart keeps every
    /// item so the user can retry; an order header without lines may remain
    /// in the ledger and is reconciled out of band.
    pub async fn checkout(
        &self,
        user: UserId,
        profile: &UserProfile,
    ) -> Result<OrderId, CheckoutError> {
        let cart = self.carts.get_cart(user).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart.total();
        debug!(user = %user, total, lines = cart.len(), "Writing order to ledger");

        self.ledger.upsert_user(user, profile).await?;
        let order_id = self.ledger.create_order(user, total).await?;
        for line in cart.items() {
            self.ledger.add_order_line(order_id, line).await?;
        }

        // The ledger holds the full order; only now may the cart be dropped.
        if let Err(err) = self.carts.clear_cart(user).await {
            warn!(
                user = %user,
                order = %order_id,
                "Order committed but cart clearance failed"
            );
            return Err(err.into());
        }

        info!(
            user = %user,
            order = %order_id,
            total,
            lines = cart.len(),
            "Checkout committed"
        );
        Ok(order_id)
    }

    /// List the user's committed orders, most recent first.
    pub async fn order_history(&self, user: UserId) -> Result<Vec<OrderRecord>, CheckoutError> {
        Ok(self.ledger.list_orders(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use botique_types::cart::{Cart, LineItem};
    use botique_types::error::{CartError, LedgerError};
    use botique_types::order::OrderLine;
    use chrono::Utc;

    use super::*;

    /// In-memory cart store double with an optional scripted clear failure.
    #[derive(Default)]
    struct MemoryCartStore {
        table: Mutex<BTreeMap<UserId, Cart>>,
        fail_clear: bool,
    }

    impl CartStore for MemoryCartStore {
        async fn load(&self) -> Result<(), CartError> {
            Ok(())
        }

        async fn get_cart(&self, user: UserId) -> Result<Cart, CartError> {
            Ok(self
                .table
                .lock()
                .unwrap()
                .get(&user)
                .cloned()
                .unwrap_or_default())
        }

        async fn set_cart(&self, user: UserId, items: Vec<LineItem>) -> Result<(), CartError> {
            self.table
                .lock()
                .unwrap()
                .insert(user, Cart::from_items(items));
            Ok(())
        }

        async fn clear_cart(&self, user: UserId) -> Result<(), CartError> {
            if self.fail_clear {
                return Err(CartError::Persist("scripted clear failure".to_string()));
            }
            self.table.lock().unwrap().insert(user, Cart::new());
            Ok(())
        }

        async fn add_item(&self, user: UserId, item: LineItem) -> Result<(), CartError> {
            if item.quantity == 0 {
                return Err(CartError::InvalidQuantity);
            }
            self.table.lock().unwrap().entry(user).or_default().add(item);
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum LedgerCall {
        UpsertUser(i64),
        CreateOrder(i64, i64),
        AddLine(i64, String, u32),
    }

    #[derive(Clone, Copy, PartialEq)]
    enum FailPoint {
        UpsertUser,
        CreateOrder,
        AddLine,
    }

    /// Ledger double recording every call, failing at a scripted point.
    #[derive(Default)]
    struct ScriptedLedger {
        calls: Mutex<Vec<LedgerCall>>,
        fail_at: Option<FailPoint>,
        history: Vec<OrderRecord>,
    }

    impl ScriptedLedger {
        fn failing_at(fail_at: FailPoint) -> Self {
            Self {
                fail_at: Some(fail_at),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<LedgerCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl OrderLedger for ScriptedLedger {
        async fn upsert_user(
            &self,
            user: UserId,
            _profile: &UserProfile,
        ) -> Result<(), LedgerError> {
            self.calls
                .lock()
                .unwrap()
                .push(LedgerCall::UpsertUser(user.0));
            if self.fail_at == Some(FailPoint::UpsertUser) {
                return Err(LedgerError::Connection("scripted failure".to_string()));
            }
            Ok(())
        }

        async fn create_order(&self, user: UserId, total: i64) -> Result<OrderId, LedgerError> {
            self.calls
                .lock()
                .unwrap()
                .push(LedgerCall::CreateOrder(user.0, total));
            if self.fail_at == Some(FailPoint::CreateOrder) {
                return Err(LedgerError::Query("scripted failure".to_string()));
            }
            Ok(OrderId(1))
        }

        async fn add_order_line(&self, order: OrderId, line: &LineItem) -> Result<(), LedgerError> {
            self.calls.lock().unwrap().push(LedgerCall::AddLine(
                order.0,
                line.code.clone(),
                line.quantity,
            ));
            if self.fail_at == Some(FailPoint::AddLine) {
                return Err(LedgerError::Query("scripted failure".to_string()));
            }
            Ok(())
        }

        async fn list_orders(&self, _user: UserId) -> Result<Vec<OrderRecord>, LedgerError> {
            Ok(self.history.clone())
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            username: Some("ivan_petrov".to_string()),
            first_name: "Ivan".to_string(),
            last_name: Some("Petrov".to_string()),
        }
    }

    async fn seed(service: &CheckoutService<MemoryCartStore, ScriptedLedger>, user: UserId) {
        service
            .carts()
            .set_cart(
                user,
                vec![
                    LineItem::new("cpu-7700", "Ryzen 7 7700", 1, 27990),
                    LineItem::new("ssd-980", "Samsung 980 Pro", 2, 10490),
                ],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_checkout_commits_order_and_clears_cart() {
        let service = CheckoutService::new(MemoryCartStore::default(), ScriptedLedger::default());
        let user = UserId::new(7);
        seed(&service, user).await;

        let order_id = service.checkout(user, &profile()).await.unwrap();
        assert_eq!(order_id, OrderId(1));

        assert_eq!(
            service.ledger().calls(),
            vec![
                LedgerCall::UpsertUser(7),
                LedgerCall::CreateOrder(7, 27990 + 2 * 10490),
                LedgerCall::AddLine(1, "cpu-7700".to_string(), 1),
                LedgerCall::AddLine(1, "ssd-980".to_string(), 2),
            ]
        );

        let cart = service.carts().get_cart(user).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_makes_no_ledger_calls() {
        let service = CheckoutService::new(MemoryCartStore::default(), ScriptedLedger::default());
        let user = UserId::new(8);

        let err = service.checkout(user, &profile()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert!(service.ledger().calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_user_upsert_leaves_cart_intact() {
        let service = CheckoutService::new(
            MemoryCartStore::default(),
            ScriptedLedger::failing_at(FailPoint::UpsertUser),
        );
        let user = UserId::new(9);
        seed(&service, user).await;

        let err = service.checkout(user, &profile()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Ledger(_)));

        let cart = service.carts().get_cart(user).await.unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(service.ledger().calls(), vec![LedgerCall::UpsertUser(9)]);
    }

    #[tokio::test]
    async fn test_failed_order_create_leaves_cart_intact() {
        let service = CheckoutService::new(
            MemoryCartStore::default(),
            ScriptedLedger::failing_at(FailPoint::CreateOrder),
        );
        let user = UserId::new(10);
        seed(&service, user).await;

        let err = service.checkout(user, &profile()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Ledger(_)));

        let cart = service.carts().get_cart(user).await.unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_order_line_leaves_cart_intact() {
        let service = CheckoutService::new(
            MemoryCartStore::default(),
            ScriptedLedger::failing_at(FailPoint::AddLine),
        );
        let user = UserId::new(11);
        seed(&service, user).await;

        let err = service.checkout(user, &profile()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Ledger(_)));

        // The header went in before the line failed; the cart must survive
        // so the user can retry.
        assert_eq!(
            service.ledger().calls(),
            vec![
                LedgerCall::UpsertUser(11),
                LedgerCall::CreateOrder(11, 27990 + 2 * 10490),
                LedgerCall::AddLine(1, "cpu-7700".to_string(), 1),
            ]
        );
        let cart = service.carts().get_cart(user).await.unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_failure_after_commit_surfaces_error() {
        let store = MemoryCartStore {
            fail_clear: true,
            ..MemoryCartStore::default()
        };
        let service = CheckoutService::new(store, ScriptedLedger::default());
        let user = UserId::new(12);
        seed(&service, user).await;

        let err = service.checkout(user, &profile()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Cart(_)));

        // The order stands in the ledger even though clearance failed.
        assert_eq!(service.ledger().calls().len(), 4);
    }

    #[tokio::test]
    async fn test_order_history_passes_through() {
        let record = OrderRecord {
            order_id: OrderId(3),
            total: 48970,
            created_at: Utc::now(),
            lines: vec![OrderLine {
                code: "cpu-7700".to_string(),
                quantity: 1,
                unit_price: 27990,
            }],
        };
        let ledger = ScriptedLedger {
            history: vec![record.clone()],
            ..ScriptedLedger::default()
        };
        let service = CheckoutService::new(MemoryCartStore::default(), ledger);

        let history = service.order_history(UserId::new(7)).await.unwrap();
        assert_eq!(history, vec![record]);
    }
}
