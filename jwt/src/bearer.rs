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

//! Extraction of bearer tokens from the `Authorization` header.

use crate::{AuthError, AuthResult};
use http::header::{AUTHORIZATION, HeaderMap};
use marquee_core::rest::get_unique_header;

/// Shorthand to create an `invalid_header` error.
fn invalid_header<S: Into<String>>(description: S) -> AuthError {
    AuthError::unauthorized("invalid_header", description)
}

/// Validates that the `Authorization` HTTP header in `headers` holds a bearer token and returns
/// the raw token.  The scheme name is matched case-insensitively.
pub fn get_bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let authz = match get_unique_header(headers, &AUTHORIZATION) {
        Ok(Some(value)) => value,
        Ok(None) => {
            return Err(AuthError::unauthorized(
                "authorization_header_missing",
                "Authorization header is expected",
            ));
        }
        Err(e) => return Err(invalid_header(e.to_string())),
    };

    let authz = match authz.to_str() {
        Ok(value) => value,
        Err(e) => {
            return Err(invalid_header(format!("Bad encoding in Authorization header: {}", e)));
        }
    };

    let mut fields = authz.splitn(2, ' ');
    let scheme = match fields.next() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(invalid_header("Authorization header must start with \"Bearer\"")),
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(invalid_header("Authorization header must start with \"Bearer\""));
    }

    let token = match fields.next() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(invalid_header("Token not found")),
    };
    if token.contains(' ') {
        return Err(invalid_header("Authorization header must be bearer token"));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_get_bearer_token_ok() {
        let mut headers = HeaderMap::new();
        headers.append("Authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!("abc.def.ghi", get_bearer_token(&headers).unwrap());
    }

    #[test]
    fn test_get_bearer_token_scheme_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.append("Authorization", "bearer abc".parse().unwrap());
        assert_eq!("abc", get_bearer_token(&headers).unwrap());
    }

    /// Runs `get_bearer_token` with an invalid set of header `values` and ensures that the call
    /// fails with a 401 error of type `exp_code` that contains `exp_error` in its description.
    fn do_get_bearer_token_error_test(exp_code: &str, exp_error: &str, values: &[&[u8]]) {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append("Authorization", HeaderValue::from_bytes(value).unwrap());
        }
        match get_bearer_token(&headers) {
            Err(e) => {
                assert_eq!(http::StatusCode::UNAUTHORIZED, e.status());
                assert_eq!(exp_code, e.code());
                assert!(
                    e.to_string().contains(exp_error),
                    "message '{}' does not contain '{}'",
                    e,
                    exp_error
                );
            }
            e => panic!("{:?}", e),
        }
    }

    #[test]
    fn test_get_bearer_token_missing() {
        do_get_bearer_token_error_test(
            "authorization_header_missing",
            "Authorization header is expected",
            &[],
        );
    }

    #[test]
    fn test_get_bearer_token_duplicate() {
        do_get_bearer_token_error_test(
            "invalid_header",
            "cannot have more than one value",
            &[b"Bearer a", b"Bearer b"],
        );
    }

    #[test]
    fn test_get_bearer_token_invalid_encoding() {
        do_get_bearer_token_error_test(
            "invalid_header",
            "Bad encoding in Authorization",
            &[b"Bearer \xc5"],
        );
    }

    #[test]
    fn test_get_bearer_token_missing_scheme() {
        do_get_bearer_token_error_test("invalid_header", "must start with \"Bearer\"", &[b""]);
    }

    #[test]
    fn test_get_bearer_token_unsupported_scheme() {
        do_get_bearer_token_error_test(
            "invalid_header",
            "must start with \"Bearer\"",
            &[b"Basic 123"],
        );
    }

    #[test]
    fn test_get_bearer_token_missing_token() {
        do_get_bearer_token_error_test("invalid_header", "Token not found", &[b"Bearer"]);
        do_get_bearer_token_error_test("invalid_header", "Token not found", &[b"Bearer "]);
    }

    #[test]
    fn test_get_bearer_token_too_many_fields() {
        do_get_bearer_token_error_test(
            "invalid_header",
            "must be bearer token",
            &[b"Bearer abc def"],
        );
    }
}
