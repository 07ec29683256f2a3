use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Creates payment intents against the Stripe API
pub struct Payments {
    client: Client,
    secret_key: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment gateway refused the request: {0}")]
    Gateway(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// The part of a created intent the client needs to finish the payment
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub client_secret: String,
}

impl Payments {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
        }
    }

    /// Creates an intent over the given amount, in the currency's smallest
    /// unit
    pub async fn create_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .post(format!("{}/payment_intents", STRIPE_API_BASE))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", currency.to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway(body));
        }

        Ok(response.json().await?)
    }
}
