/// Request body extractor
///
/// [`JsonBody`] is `axum::Json` with one difference: a body that is valid
/// JSON but does not fit the target type (`"phone": null`, `"firstName": 42`)
/// is reported as a `422` field error naming the offending key, the same
/// shape field validation uses. Malformed JSON and a missing
/// `Content-Type: application/json` stay `400`.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use orgauth_shared::validation::FieldError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use crate::error::ApiError;

/// JSON request body deserialized into `T`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;

        serde_path_to_error::deserialize(value)
            .map(JsonBody)
            .map_err(|err| {
                let field = err.path().iter().find_map(|segment| match segment {
                    Segment::Map { key } => Some(key.clone()),
                    _ => None,
                });

                match field {
                    Some(field) => {
                        ApiError::Validation(vec![FieldError::new(field, err.inner().to_string())])
                    }
                    None => ApiError::BadRequest("Request body must be a JSON object".to_string()),
                }
            })
    }
}
