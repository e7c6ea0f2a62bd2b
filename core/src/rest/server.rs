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

//! HTTP server lifecycle shared by all services.

use crate::env::get_optional_var;
use axum::Router;
use axum::http::{Method, header};
use log::{info, warn};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

/// Default value for the `port` configuration property.
const DEFAULT_PORT: u16 = 3000;

/// Default value for the `request_timeout` configuration property.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration of the HTTP server.
#[derive(Debug, PartialEq)]
pub struct ServerOptions {
    /// Address to bind to.
    pub address: IpAddr,

    /// Port to listen on.
    pub port: u16,

    /// Maximum time a request can take before the server answers with a timeout.
    pub request_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use the optional variables `<prefix>_ADDRESS`, `<prefix>_PORT` and
    /// `<prefix>_REQUEST_TIMEOUT`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let defaults = ServerOptions::default();
        Ok(Self {
            address: get_optional_var::<IpAddr>(prefix, "ADDRESS")?.unwrap_or(defaults.address),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
            request_timeout: get_optional_var::<Duration>(prefix, "REQUEST_TIMEOUT")?
                .unwrap_or(defaults.request_timeout),
        })
    }

    /// Returns the socket address to bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Returns a CORS layer suitable for JSON APIs consumed by browser frontends.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested; draining in-flight requests"),
        Err(e) => {
            warn!("Cannot listen for the shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Serves `app` as configured by `opts` until the process is asked to terminate.
///
/// Every request is subject to the configured timeout.
pub async fn serve(opts: &ServerOptions, app: Router) -> io::Result<()> {
    let app = app.layer(TimeoutLayer::new(opts.request_timeout));

    let listener = tokio::net::TcpListener::bind(opts.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_options_from_env_defaults() {
        temp_env::with_vars(
            [
                ("SRV_ADDRESS", None::<&str>),
                ("SRV_PORT", None),
                ("SRV_REQUEST_TIMEOUT", None),
            ],
            || {
                assert_eq!(ServerOptions::default(), ServerOptions::from_env("SRV").unwrap());
            },
        );
    }

    #[test]
    fn test_server_options_from_env_all_present() {
        temp_env::with_vars(
            [
                ("SRV_ADDRESS", Some("0.0.0.0")),
                ("SRV_PORT", Some("8080")),
                ("SRV_REQUEST_TIMEOUT", Some("5s")),
            ],
            || {
                let opts = ServerOptions::from_env("SRV").unwrap();
                assert_eq!(
                    ServerOptions {
                        address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                        port: 8080,
                        request_timeout: Duration::from_secs(5),
                    },
                    opts
                );
                assert_eq!("0.0.0.0:8080", opts.bind_addr().to_string());
            },
        );
    }

    #[test]
    fn test_server_options_from_env_bad_port() {
        temp_env::with_var("SRV_PORT", Some("http"), || {
            let err = ServerOptions::from_env("SRV").unwrap_err();
            assert!(err.contains("SRV_PORT"));
        });
    }
}
