use crate::domain::cart::LineId;
use crate::domain::money::Money;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i32 },
    #[error("Cart line {0} not found")]
    LineNotFound(LineId),
    #[error("Payment authorization for {amount} failed: {reason}")]
    AuthorizationFailed { amount: Money, reason: String },
    #[error("Payment confirmation for {reference} failed: {reason}")]
    ConfirmationFailed { reference: String, reason: String },
    #[error("Customer information is incomplete")]
    ValidationIncomplete,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("A payment request is already in flight")]
    CheckoutInProgress,
    #[error("Cannot {action} while checkout is {state}")]
    InvalidTransition { state: String, action: &'static str },
    #[error("Menu item {0} does not exist")]
    UnknownMenuItem(u32),
    #[error("Invalid amount: {0}")]
    InvalidMoney(String),
    #[error("Payment gateway error: {0}")]
    Gateway(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    DateError(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, OrderError>;
