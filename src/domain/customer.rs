use serde::{Deserialize, Serialize};

/// Parent or guardian details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// The editable fields of [`CustomerInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    FullName,
    Email,
    Phone,
}

impl CustomerInfo {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let slot = match field {
            CustomerField::FullName => &mut self.full_name,
            CustomerField::Email => &mut self.email,
            CustomerField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    /// All fields present and the email looks like an address. Anything
    /// stricter is left to the form.
    pub fn is_valid(&self) -> bool {
        !self.full_name.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
            && self.email.contains('@')
    }
}
