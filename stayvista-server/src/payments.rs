use axum::{extract::State, routing::post, Json};

use crate::{
    auth::Session,
    context::ServerContext,
    errors::ServerResult,
    schemas::{PaymentIntentSchema, ValidatedJson},
    serialized::ClientSecret,
    Router,
};

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "payments",
    request_body = PaymentIntentSchema,
    security(
        ("CookieAuth" = [])
    ),
    responses(
        (status = 200, body = ClientSecret)
    )
)]
pub(crate) async fn create_payment_intent(
    _session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<PaymentIntentSchema>,
) -> ServerResult<Json<ClientSecret>> {
    let amount = (body.price * 100.0).round() as i64;

    let intent = context
        .stayvista
        .payments
        .create_intent(amount, "usd")
        .await?;

    Ok(Json(ClientSecret {
        client_secret: intent.client_secret,
    }))
}

pub fn router() -> Router {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}
