//! Query string extraction

use axum::{
    extract::{FromRequestParts, Query as AxumQuery},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize};

use super::error::ApiError;
use crate::domain::recipe::RecipeFilter;

/// Query extractor whose rejections use the API error envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(value)) => Ok(Query(value)),
            Err(rejection) => Err(ApiError::bad_request(format!(
                "Invalid query parameters: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// `GET /recipes` parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeQuery {
    pub diet_type: Option<String>,
    pub cuisine_type: Option<String>,
    pub keyword: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl RecipeQuery {
    pub fn filter(&self) -> RecipeFilter {
        RecipeFilter::from_options(self.diet_type.clone(), self.cuisine_type.clone())
    }

    /// Keyword as sent; only an empty value means no keyword
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_absent() {
        let query = RecipeQuery {
            diet_type: Some("keto".to_string()),
            cuisine_type: Some(" ".to_string()),
            keyword: Some(String::new()),
            ..RecipeQuery::default()
        };

        assert_eq!(query.filter(), RecipeFilter::new().with_diet_type("keto"));
        assert_eq!(query.keyword(), None);
    }

    #[test]
    fn test_keyword_keeps_surrounding_spaces() {
        let query = RecipeQuery {
            keyword: Some(" soup".to_string()),
            ..RecipeQuery::default()
        };

        assert_eq!(query.keyword(), Some(" soup"));
    }

    #[tokio::test]
    async fn test_invalid_number_is_bad_request() {
        let request = axum::http::Request::builder()
            .uri("/recipes?page=abc")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let err = Query::<RecipeQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(err.response.error.message.starts_with("Invalid query parameters"));
    }
}
