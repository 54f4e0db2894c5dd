use crate::config::CheckoutConfig;
use crate::domain::cart::Cart;
use crate::domain::customer::{CustomerField, CustomerInfo};
use crate::domain::money::Money;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{
    Authorization, AuthorizationMetadata, OrderStoreRef, PaymentGatewayRef,
};
use crate::error::{OrderError, Result};
use chrono::Utc;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Which payment call a failed session gave up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStep {
    Authorization,
    Confirmation,
    /// Payment went through but the order could not be stored.
    Recording,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFailure {
    pub step: FailedStep,
    pub reason: String,
    pub retryable: bool,
}

/// Where a checkout session stands.
///
/// ```text
/// Idle -> RequestingAuthorization -> AwaitingCustomerInfo <-> Ready -> Submitting -> Completed
///                  |                                                     |
///                  +-------------------------> Failed <------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    RequestingAuthorization,
    AwaitingCustomerInfo,
    Ready,
    Submitting,
    Completed(OrderId),
    Failed(CheckoutFailure),
}

impl CheckoutState {
    fn in_flight(&self) -> bool {
        matches!(self, Self::RequestingAuthorization | Self::Submitting)
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::RequestingAuthorization => "requesting authorization",
            Self::AwaitingCustomerInfo => "awaiting customer info",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        };
        f.write_str(name)
    }
}

/// What the payment-capture widget needs. Only handed out while `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStep {
    pub handle: String,
    pub reference: String,
    pub amount: Money,
}

#[derive(Debug)]
struct Session {
    state: CheckoutState,
    cart: Cart,
    customer: CustomerInfo,
    authorization: Option<(Authorization, Money)>,
}

impl Session {
    fn regate(&mut self) {
        if matches!(
            self.state,
            CheckoutState::AwaitingCustomerInfo | CheckoutState::Ready
        ) {
            self.state = if self.customer.is_valid() {
                CheckoutState::Ready
            } else {
                CheckoutState::AwaitingCustomerInfo
            };
        }
    }

    fn fail(&mut self, step: FailedStep, reason: &str, retryable: bool) {
        self.state = CheckoutState::Failed(CheckoutFailure {
            step,
            reason: reason.to_string(),
            retryable,
        });
    }
}

/// Drives one customer's checkout from cart to recorded order.
///
/// The session owns the cart for its lifetime, so the authorized amount
/// always matches what gets frozen into the order. Payment calls run without
/// holding the session lock; while one is in flight every other trigger is
/// turned away with [`OrderError::CheckoutInProgress`] and has no effect.
pub struct CheckoutSession {
    inner: Mutex<Session>,
    gateway: PaymentGatewayRef,
    orders: OrderStoreRef,
    config: CheckoutConfig,
    school: Option<String>,
}

impl CheckoutSession {
    /// Opens a session over a non-empty cart. An empty cart never enters
    /// checkout and is returned to the caller as [`OrderError::EmptyCart`].
    pub fn new(
        cart: Cart,
        gateway: PaymentGatewayRef,
        orders: OrderStoreRef,
        config: CheckoutConfig,
    ) -> Result<Self> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        Ok(Self {
            inner: Mutex::new(Session {
                state: CheckoutState::Idle,
                cart,
                customer: CustomerInfo::default(),
                authorization: None,
            }),
            gateway,
            orders,
            config,
            school: None,
        })
    }

    /// School recorded on the resulting order.
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> CheckoutState {
        self.session().state.clone()
    }

    pub fn customer(&self) -> CustomerInfo {
        self.session().customer.clone()
    }

    /// A copy of the cart as it currently stands.
    pub fn cart(&self) -> Cart {
        self.session().cart.clone()
    }

    /// Asks the gateway to authorize the cart's grand total.
    ///
    /// Valid from `Idle`, and again after a failed authorization. On success
    /// the session waits for customer details, or is `Ready` straight away if
    /// they are already complete.
    pub async fn start(&self) -> Result<CheckoutState> {
        let (amount, metadata) = {
            let mut session = self.session();
            match &session.state {
                CheckoutState::Idle => {}
                CheckoutState::Failed(failure) if failure.step == FailedStep::Authorization => {}
                state if state.in_flight() => {
                    debug!(%state, "authorization trigger ignored");
                    return Err(OrderError::CheckoutInProgress);
                }
                state => {
                    return Err(OrderError::InvalidTransition {
                        state: state.to_string(),
                        action: "request authorization",
                    });
                }
            }

            session.state = CheckoutState::RequestingAuthorization;
            let metadata = AuthorizationMetadata {
                item_count: session.cart.item_count(),
                submitted_at: Utc::now(),
            };
            (session.cart.grand_total(), metadata)
        };

        info!(%amount, item_count = metadata.item_count, "requesting payment authorization");
        let guard = InFlightGuard::new(self, FailedStep::Authorization);
        let outcome = self
            .call_gateway(self.gateway.create_authorization(amount, &metadata))
            .await;
        guard.disarm();

        let mut session = self.session();
        match outcome {
            Ok(authorization) => {
                info!(reference = %authorization.reference, "payment authorized");
                session.authorization = Some((authorization, amount));
                session.state = CheckoutState::AwaitingCustomerInfo;
                session.regate();
                Ok(session.state.clone())
            }
            Err(reason) => {
                warn!(%amount, %reason, "payment authorization failed");
                session.fail(FailedStep::Authorization, &reason, true);
                Err(OrderError::AuthorizationFailed { amount, reason })
            }
        }
    }

    /// Changes one customer field and re-evaluates the payment gate.
    pub fn update_customer(
        &self,
        field: CustomerField,
        value: impl Into<String>,
    ) -> Result<CheckoutState> {
        let mut session = self.session();
        Self::check_editable(&session.state)?;
        session.customer.set(field, value);
        session.regate();
        Ok(session.state.clone())
    }

    /// Replaces all customer fields at once.
    pub fn set_customer(&self, customer: CustomerInfo) -> Result<CheckoutState> {
        let mut session = self.session();
        Self::check_editable(&session.state)?;
        session.customer = customer;
        session.regate();
        Ok(session.state.clone())
    }

    fn check_editable(state: &CheckoutState) -> Result<()> {
        match state {
            CheckoutState::Submitting => Err(OrderError::CheckoutInProgress),
            CheckoutState::Completed(_) => Err(OrderError::InvalidTransition {
                state: state.to_string(),
                action: "edit customer details",
            }),
            _ => Ok(()),
        }
    }

    /// The payment surface, exposed only while the session is `Ready`.
    pub fn payment_step(&self) -> Option<PaymentStep> {
        let session = self.session();
        match (&session.state, &session.authorization) {
            (CheckoutState::Ready, Some((authorization, amount))) => Some(PaymentStep {
                handle: authorization.handle.clone(),
                reference: authorization.reference.clone(),
                amount: *amount,
            }),
            _ => None,
        }
    }

    /// Confirms the payment and records the order.
    ///
    /// Valid from `Ready`, and again after a failed confirmation as long as
    /// the customer details are still complete. A failed confirmation leaves
    /// the cart and customer details exactly as they were.
    pub async fn submit(&self) -> Result<Order> {
        let (authorization, cart, customer) = {
            let mut session = self.session();
            match &session.state {
                CheckoutState::Ready => {}
                CheckoutState::Failed(failure) if failure.step == FailedStep::Confirmation => {
                    if !session.customer.is_valid() {
                        return Err(OrderError::ValidationIncomplete);
                    }
                }
                CheckoutState::AwaitingCustomerInfo => {
                    return Err(OrderError::ValidationIncomplete);
                }
                state if state.in_flight() => {
                    debug!(%state, "submit trigger ignored");
                    return Err(OrderError::CheckoutInProgress);
                }
                state => {
                    return Err(OrderError::InvalidTransition {
                        state: state.to_string(),
                        action: "submit payment",
                    });
                }
            }

            let Some((authorization, _)) = session.authorization.clone() else {
                return Err(OrderError::InvalidTransition {
                    state: session.state.to_string(),
                    action: "submit payment",
                });
            };
            session.state = CheckoutState::Submitting;
            (authorization, session.cart.clone(), session.customer.clone())
        };

        info!(reference = %authorization.reference, "confirming payment");
        let mut guard = InFlightGuard::new(self, FailedStep::Confirmation);
        if let Err(reason) = self
            .call_gateway(self.gateway.confirm(&authorization.handle))
            .await
        {
            guard.disarm();
            warn!(reference = %authorization.reference, %reason, "payment confirmation failed");
            self.session()
                .fail(FailedStep::Confirmation, &reason, true);
            return Err(OrderError::ConfirmationFailed {
                reference: authorization.reference,
                reason,
            });
        }

        // Payment is confirmed; a cancellation from here on is not retryable.
        guard.advance(FailedStep::Recording, false);
        let recorded = match Order::freeze(
            &cart,
            customer,
            authorization.reference.clone(),
            self.school.clone(),
            Utc::now().date_naive(),
        ) {
            Ok(order) => self.orders.append(order.clone()).await.map(|_| order),
            Err(e) => Err(e),
        };
        guard.disarm();

        let mut session = self.session();
        match recorded {
            Ok(order) => {
                session.cart.clear();
                session.state = CheckoutState::Completed(order.id);
                info!(order_id = %order.id, total = %order.total, "order recorded");
                Ok(order)
            }
            Err(e) => {
                error!(reference = %authorization.reference, error = %e, "paid order could not be recorded");
                session.fail(FailedStep::Recording, &e.to_string(), false);
                Err(e)
            }
        }
    }

    /// Walks away from the checkout and hands the cart back untouched.
    pub fn abandon(self) -> Cart {
        let session = self
            .inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        info!(state = %session.state, "checkout abandoned");
        session.cart
    }

    async fn call_gateway<T>(
        &self,
        call: impl Future<Output = Result<T>>,
    ) -> std::result::Result<T, String> {
        match tokio::time::timeout(self.config.gateway_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "payment gateway did not respond within {:?}",
                self.config.gateway_timeout
            )),
        }
    }
}

/// Moves a session out of an in-flight state if the future driving the
/// payment call is dropped before the call finishes.
struct InFlightGuard<'a> {
    checkout: &'a CheckoutSession,
    step: FailedStep,
    retryable: bool,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(checkout: &'a CheckoutSession, step: FailedStep) -> Self {
        Self {
            checkout,
            step,
            retryable: true,
            armed: true,
        }
    }

    fn advance(&mut self, step: FailedStep, retryable: bool) {
        self.step = step;
        self.retryable = retryable;
    }

    /// Must run before the session lock is taken again.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.checkout.session();
        if session.state.in_flight() {
            warn!(step = ?self.step, "checkout call cancelled before it finished");
            session.fail(self.step, "cancelled before the call finished", self.retryable);
        }
    }
}
