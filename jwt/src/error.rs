// Marquee
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Errors raised by the auth gate.

use http::StatusCode;
use marquee_core::rest::RestError;

/// An authentication or authorization failure.
///
/// Every failure carries the status code to answer with and a machine-readable `code` that
/// clients can use to tell apart, for example, an expired token from a missing permission.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{description}")]
pub struct AuthError {
    /// HTTP status code to return.
    status: StatusCode,

    /// Machine-readable code of the failure.
    code: &'static str,

    /// Human-readable description of the failure.
    description: String,
}

impl AuthError {
    /// Creates a failure caused by missing or invalid credentials.
    pub(crate) fn unauthorized<S: Into<String>>(code: &'static str, description: S) -> Self {
        Self { status: StatusCode::UNAUTHORIZED, code, description: description.into() }
    }

    /// Creates a failure caused by valid credentials that lack the necessary permissions.
    pub(crate) fn forbidden<S: Into<String>>(code: &'static str, description: S) -> Self {
        Self { status: StatusCode::FORBIDDEN, code, description: description.into() }
    }

    /// Creates a failure caused by the inability to obtain the signing keys.
    pub(crate) fn unavailable<S: Into<String>>(description: S) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: "jwks_unavailable",
            description: description.into(),
        }
    }

    /// Returns the HTTP status code of the failure.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the machine-readable code of the failure.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<AuthError> for RestError {
    fn from(e: AuthError) -> Self {
        RestError::AuthFailed { status: e.status, code: e.code.to_owned(), message: e.description }
    }
}

/// Result type for this crate.
pub type AuthResult<T> = Result<T, AuthError>;
