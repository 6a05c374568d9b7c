//! User and authentication endpoints.

use reqwest::Method;
use userhub_api_models::{
    LoginRequest, MessageResponse, Page, PageQuery, PasswordResetRequest, PasswordSetRequest,
    SignUpRequest, User, UserUpdate, UserUpdateResponse,
};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /api/v1/users`: create an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for rejected fields, or any transport/domain failure.
    pub async fn sign_up(&self, body: &SignUpRequest) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["users"])?;
        self.send_json(self.request(Method::POST, url).json(body))
            .await
    }

    /// `POST /api/v1/auth`: exchange credentials for the user record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] on wrong credentials, or any other failure.
    pub async fn login(&self, body: &LoginRequest) -> Result<User, ApiError> {
        let url = self.endpoint(&["auth"])?;
        self.send_json(self.request(Method::POST, url).json(body))
            .await
    }

    /// `PATCH /api/v1/users/:token/active`: activate an account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for unknown tokens, or any other failure.
    pub async fn activate(&self, token: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["users", token, "active"])?;
        self.send_json(
            self.request(Method::PATCH, url)
                .json(&serde_json::json!({})),
        )
        .await
    }

    /// `POST /api/v1/users/password-reset`: request a reset e-mail.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad address, [`ApiError::Rejected`]
    /// for an unknown one, or any other failure.
    pub async fn request_password_reset(
        &self,
        body: &PasswordResetRequest,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["users", "password-reset"])?;
        self.send_json(self.request(Method::POST, url).json(body))
            .await
    }

    /// `PATCH /api/v1/users/:token/password`: set a new password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] or [`ApiError::Rejected`] on refusal,
    /// or any other failure.
    pub async fn set_password(
        &self,
        token: &str,
        body: &PasswordSetRequest,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["users", token, "password"])?;
        self.send_json(self.request(Method::PATCH, url).json(body))
            .await
    }

    /// `GET /api/v1/users?page&size`: one page of users.
    ///
    /// # Errors
    ///
    /// Returns any transport or decode failure.
    pub async fn load_users(&self, query: PageQuery) -> Result<Page<User>, ApiError> {
        let url = self.endpoint(&["users"])?;
        self.send_json(self.request(Method::GET, url).query(&query))
            .await
    }

    /// `GET /api/v1/users/:id`: fetch a profile.
    ///
    /// The id is forwarded as the raw route segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the user does not exist, or any other failure.
    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let url = self.endpoint(&["users", id])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// `PUT /api/v1/users/:id`: update username and optionally the image.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a rejected username, or any other failure.
    pub async fn update_user(
        &self,
        id: u64,
        body: &UserUpdate,
    ) -> Result<UserUpdateResponse, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["users", &id])?;
        self.send_json(self.request(Method::PUT, url).json(body))
            .await
    }

    /// `DELETE /api/v1/users/:id`: delete an account.
    ///
    /// # Errors
    ///
    /// Returns any transport or domain failure.
    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["users", &id])?;
        self.send_empty(self.request(Method::DELETE, url)).await
    }
}
