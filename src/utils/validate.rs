//! Request extractors that turn body rejections into `AppError`s.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// A url-encoded form, deserialized (repeated keys become `Vec`s) and then
/// checked with `validator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.to_string()))?;
        value.validate()?;
        Ok(ValidatedForm(value))
    }
}

/// A JSON body whose rejections answer with the plain "bad request" error.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(reason = %rejection.body_text(), "JSON body rejected");
                AppError::bad_request("bad request")
            })?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct ProfileForm {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[serde(default)]
        genres: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Search {
        #[serde(rename = "searchTerm")]
        search_term: String,
    }

    fn form_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/venues/create")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/questions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_repeated_keys_collect_into_vec() {
        let request = form_request("name=The+Musical+Hop&genres=Jazz&genres=Reggae&genres=Swing");
        let ValidatedForm(form) = ValidatedForm::<ProfileForm>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(form.name, "The Musical Hop");
        assert_eq!(form.genres, vec!["Jazz", "Reggae", "Swing"]);
    }

    #[tokio::test]
    async fn test_validator_failure_reports_field() {
        let request = form_request("name=&genres=Jazz");
        match ValidatedForm::<ProfileForm>::from_request(request, &()).await {
            Err(AppError::ValidationErrors { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Name is required");
            }
            other => panic!("Expected ValidationErrors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undeserializable_form_is_bad_request() {
        let request = form_request("genres=Jazz");
        let result = ValidatedForm::<ProfileForm>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_json_body() {
        let JsonBody(search) = JsonBody::<Search>::from_request(json_request(r#"{"searchTerm":"title"}"#), &())
            .await
            .unwrap();
        assert_eq!(search.search_term, "title");
    }

    #[tokio::test]
    async fn test_malformed_json_is_plain_bad_request() {
        let result = JsonBody::<Search>::from_request(json_request("{not json"), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { message }) if message == "bad request"));

        let missing_type = Request::builder()
            .method(Method::POST)
            .uri("/questions")
            .body(Body::from(r#"{"searchTerm":"x"}"#))
            .unwrap();
        let result = JsonBody::<Search>::from_request(missing_type, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
