use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered customer. Orders hold a reference to a customer but do not
/// own it; deleting a customer leaves historical orders with a dangling
/// reference, which callers must tolerate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// CPF or CNPJ tax identifier. Format is checked at the HTTP boundary.
    pub cpf_cnpj: String,
    pub cep: Option<String>,
    pub street: Option<String>,
    pub district: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Whether the customer can receive quote documents by e-mail.
    pub fn has_email(&self) -> bool {
        self.email
            .as_deref()
            .map(|e| !e.trim().is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(email: Option<&str>) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: "Maria Silva".into(),
            phone: None,
            email: email.map(String::from),
            cpf_cnpj: "123.456.789-09".into(),
            cep: None,
            street: None,
            district: None,
            number: None,
            city: None,
            state: None,
            inscricao_estadual: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn has_email_rejects_missing_and_blank() {
        assert!(!customer(None).has_email());
        assert!(!customer(Some("")).has_email());
        assert!(!customer(Some("   ")).has_email());
        assert!(customer(Some("maria@example.com")).has_email());
    }
}
